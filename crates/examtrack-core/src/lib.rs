//! Question parsing, topic statistics, and the local store behind examtrack.
//!
//! Pasted lines go through [`parser`] into drafts, the [`store::Store`]
//! assigns ids and persists them, and [`statistics`] rolls any subset of
//! questions up into marks, percentage, time and confidence.

pub mod error;
pub mod model;
pub mod parser;
pub mod snapshot;
pub mod statistics;
pub mod storage;
pub mod store;
pub mod taxonomy;

pub use error::StoreError;
pub use store::Store;
