use banter::core::config;
use banter::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "banter", about = "Terminal client for a chat-session server")]
struct Args {
    /// Base URL of the chat API (overrides config file and BANTER_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to banter.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("banter.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        config::BanterConfig::default()
    });
    let resolved = config::resolve(&config, args.api_url.as_deref());

    log::info!("Banter starting up against {}", resolved.api_base_url);

    tui::run(resolved)
}
