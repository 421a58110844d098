//! The `examtrack init` command.

use anyhow::Result;

use super::{open_session, Context};

pub fn execute(ctx: &Context) -> Result<()> {
    let config_path = ctx
        .config_path
        .clone()
        .unwrap_or_else(|| "examtrack.toml".into());

    if config_path.exists() {
        println!("{} already exists, skipping.", config_path.display());
    } else {
        std::fs::write(&config_path, SAMPLE_CONFIG)?;
        println!("Created {}", config_path.display());
    }

    let mut session = open_session(&Context {
        config_path: Some(config_path),
        data_path: ctx.data_path.clone(),
    })?;

    if session.store.seed_if_empty()? {
        println!("Seeded sample data in {}", session.data_path.display());
    } else {
        println!(
            "{} already has data, skipping sample data.",
            session.data_path.display()
        );
    }

    println!("\nNext steps:");
    println!("  1. Run: examtrack dashboard");
    println!("  2. Run: examtrack exam add --title \"NEAP 2024\"");
    println!("  3. Run: examtrack paste --exam \"NEAP 2024\" --page page1 --file answers.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examtrack configuration

# Where exams, pages, questions and reported scores are saved.
data_file = "examtrack-data.json"

# Section stamped on pasted questions when --section is not given.
default_section = "A"
"#;
