use clap::Parser;
use sitewatch::config::{ConfigLoader, MonitorConfig, OutputFormat};
use sitewatch::monitor::Monitor;
use sitewatch::output;

#[derive(Parser)]
#[command(name = "sitewatch")]
#[command(version = "0.1.0")]
#[command(about = "Polls URLs and shows live latency and size statistics", long_about = None)]
struct Cli {
    /// URLs to monitor (http or https)
    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,

    /// Seconds to wait after a request completes before polling the URL again
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Table refresh period in milliseconds
    #[arg(long, default_value_t = 1000)]
    refresh: u64,

    /// How each frame is written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

impl Cli {
    fn into_config(self) -> MonitorConfig {
        let defaults = MonitorConfig::default();
        MonitorConfig {
            urls: self.urls,
            interval_secs: self.interval,
            timeout_secs: self.timeout,
            refresh_ms: self.refresh,
            format: self.format,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; keep them quiet by default so they don't scroll the table.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match ConfigLoader::build(cli.into_config()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let sink = output::sink_for(config.format);
    let monitor = Monitor::new(config, sink)?;
    monitor.start().await?;

    shutdown_signal().await?;

    println!("\nShutting down... Waiting for running requests to complete.");
    monitor.stop().await?;
    println!("\nApplication has been successfully shut down.");

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => log::info!("Received SIGTERM"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
