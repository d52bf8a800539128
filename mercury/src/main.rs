use args::Args;
use clap::Parser;

mod args;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config()?;

    // Dropping the guard flushes pending records, so it lives until serving ends.
    let (log_path, log_guard) = match logger::init(&args, config.log.file_path()) {
        Ok(initialized) => initialized,
        Err(e) => {
            eprintln!("[init] {e:#}");
            std::process::exit(1);
        }
    };

    log::info!("Mercury {} starting, logging to {}", env!("CARGO_PKG_VERSION"), log_path.display());

    if let Err(e) = mcp::serve_stdio(&config).await {
        log::error!("Server failed: {e:#}");
        drop(log_guard);
        std::process::exit(1);
    }

    drop(log_guard);

    Ok(())
}
