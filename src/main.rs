use anyhow::Result;
use clap::Parser;
use tracing::info;

use image_batch::{BatchOutcome, Cli, CommandTransform, Coordinator, list_files};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stderr)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let cli = Cli::parse();
    cli.validate()?;

    info!("Starting conversion run");
    let files = list_files(&cli.input).await?;
    let transform = CommandTransform::new(cli.converter.as_str());
    let mut coordinator = Coordinator::new(transform);
    let outcome = coordinator
        .run(files, cli.context(), cli.worker_count())
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let BatchOutcome::Completed(summary) = &outcome {
        info!(
            "Elapsed: {:.2}s, handled: {}, succeeded: {}, failed: {}",
            summary.elapsed_secs, summary.total_files, summary.succeeded, summary.failed
        );
    }
    Ok(())
}
