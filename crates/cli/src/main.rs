mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use precis_core::config::{load_dotenv, Config};
use precis_core::CompressionRate;
use precis_summarize::Pipeline;
use tracing::info;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before the log filter and the config are read.
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env();
    args.apply(&mut config);
    config.log_summary();

    let rate = CompressionRate::new(config.summary.compression_rate)
        .context("invalid compression rate")?;
    let output = args.output_path(&config.server.output_dir);

    let pipeline = Pipeline::from_config(&config).context("failed to set up summarizer")?;
    let report = pipeline
        .run(&args.input, Some(&output), rate)
        .await
        .with_context(|| format!("failed to summarize '{}'", args.input.display()))?;

    info!(
        "{} chunk(s), strategy {:?}, {} combine round(s)",
        report.outcome.chunks, report.outcome.strategy, report.outcome.combine_rounds
    );

    println!("Book length: {} words", report.stats.source_words);
    println!("Summary length: {} words", report.stats.summary_words);
    println!(
        "Actual compression rate: {:.2}%",
        report.stats.actual_rate * 100.0
    );
    println!("Summary saved to: {}", output.display());

    if args.print {
        println!();
        println!("{}", report.summary);
    }

    Ok(())
}
