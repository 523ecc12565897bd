use anyhow::Context;
use clap::Parser;
use listscraper::concat::{concat_dir, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_NAME};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "concat")]
#[command(about = "Merge every CSV in a directory into one deduplicated file")]
struct Cli {
    #[arg(long, env = "LISTSCRAPER_CONCAT_DIR", default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Written inside the input directory and never read as an input.
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    output_name: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let report = concat_dir(&cli.input_dir, &cli.output_name)
        .with_context(|| format!("failed to concatenate {}", cli.input_dir.display()))?;

    for skipped in &report.skipped {
        println!("Skipped: {} - {}", skipped.path.display(), skipped.reason);
    }
    match &report.written {
        Some(path) => println!(
            "{} files, {} rows, {} duplicates removed -> {}",
            report.files_read.len(),
            report.final_rows,
            report.duplicates,
            path.display()
        ),
        None => println!("Nothing written"),
    }

    Ok(())
}
