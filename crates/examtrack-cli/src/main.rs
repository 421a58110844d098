//! The `examtrack` binary: record exam attempts and read back topic accuracy.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;

#[derive(Parser)]
#[command(
    name = "examtrack",
    version,
    about = "Track exam attempts and topic accuracy"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file path (overrides `data_file` from the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and seed sample data
    Init,

    /// Overall accuracy by topic and per-exam percentages
    Dashboard,

    /// Manage subjects
    Subject {
        #[command(subcommand)]
        action: SubjectCommand,
    },

    /// Manage exams
    Exam {
        #[command(subcommand)]
        action: ExamCommand,
    },

    /// Manage pages of an exam
    Page {
        #[command(subcommand)]
        action: PageCommand,
    },

    /// Parse pasted question lines and add them to a page
    Paste {
        /// Exam id, id prefix, or title
        #[arg(long)]
        exam: String,

        /// Page id, id prefix, or ref
        #[arg(long)]
        page: String,

        /// Section for the pasted questions (A or B)
        #[arg(long)]
        section: Option<String>,

        /// Read lines from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Manage exam subsections
    Subsection {
        #[command(subcommand)]
        action: SubsectionCommand,
    },

    /// Record externally reported percentages
    Score {
        #[command(subcommand)]
        action: ScoreCommand,
    },

    /// Toggle between light and dark theme
    Theme,

    /// Write all data as a JSON document
    Export {
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with a JSON document
    Import {
        /// Input JSON file
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Subcommand)]
enum SubjectCommand {
    /// Add a subject with the default topic taxonomy
    Add {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand)]
enum ExamCommand {
    /// Add an exam
    Add {
        #[arg(long)]
        title: String,

        /// Subject id (defaults to the first subject)
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        provider: Option<String>,

        /// Exam date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List exams with their percentage
    List,

    /// Show one exam in detail
    Show {
        /// Exam id, id prefix, or title
        exam: String,
    },
}

#[derive(Subcommand)]
enum PageCommand {
    /// Add a page to an exam
    Add {
        #[arg(long)]
        exam: String,

        /// Page ref (defaults to page<N+1>)
        #[arg(long = "ref")]
        reference: Option<String>,

        /// Sort order (defaults to N+1)
        #[arg(long)]
        order: Option<i64>,
    },
}

#[derive(Subcommand)]
enum SubsectionCommand {
    /// Add a subsection to an exam
    Add {
        #[arg(long)]
        exam: String,

        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand)]
enum ScoreCommand {
    /// Add a reported percentage (0..100)
    Add {
        #[arg(long)]
        exam: String,

        #[arg(long, allow_hyphen_values = true)]
        percentage: String,

        #[arg(long)]
        label: Option<String>,

        /// Subsection id, id prefix, or name
        #[arg(long)]
        subsection: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("examtrack=warn,examtrack_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        data_path: cli.data,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(&ctx),
        Commands::Dashboard => commands::dashboard::execute(&ctx),
        Commands::Subject {
            action: SubjectCommand::Add { name },
        } => commands::subject::add(&ctx, name),
        Commands::Exam { action } => match action {
            ExamCommand::Add {
                title,
                subject,
                provider,
                date,
                notes,
            } => commands::exam::add(&ctx, title, subject, provider, date, notes),
            ExamCommand::List => commands::exam::list(&ctx),
            ExamCommand::Show { exam } => commands::exam::show(&ctx, exam),
        },
        Commands::Page {
            action:
                PageCommand::Add {
                    exam,
                    reference,
                    order,
                },
        } => commands::page::add(&ctx, exam, reference, order),
        Commands::Paste {
            exam,
            page,
            section,
            file,
        } => commands::paste::execute(&ctx, exam, page, section, file),
        Commands::Subsection {
            action: SubsectionCommand::Add { exam, name },
        } => commands::subsection::add(&ctx, exam, name),
        Commands::Score {
            action:
                ScoreCommand::Add {
                    exam,
                    percentage,
                    label,
                    subsection,
                    notes,
                },
        } => commands::score::add(&ctx, exam, percentage, label, subsection, notes),
        Commands::Theme => commands::theme::execute(&ctx),
        Commands::Export { output } => commands::transfer::export(&ctx, output),
        Commands::Import { input } => commands::transfer::import(&ctx, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
