use clap::Parser;
use container_registry_client::cli::{Args, Runner};
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling request");
            on_interrupt.cancel();
        }
    });

    let runner = Runner::new(args)?;
    let mut stdout = std::io::stdout();
    runner.run(&mut stdout, &cancel).await?;
    stdout.flush()?;

    Ok(())
}
