//! netcheck - network diagnostics CLI

use clap::Parser;
use netcheck::{
    app::App,
    cli::Cli,
    config::{load_config, load_env_file},
    error::Result,
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // .env must be in the process environment before clap reads env-backed
    // arguments
    if let Err(e) = load_env_file(std::env::args().any(|a| a == "--debug")) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }

    let cli = Cli::parse();

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);
        eprintln!();
        eprintln!("{}", e.user_friendly_message());
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    if config.debug {
        eprintln!("{} v{}", netcheck::PKG_NAME, netcheck::VERSION);
        eprintln!("IP provider: {}", config.ip_provider);
        eprintln!("Geo provider: {}", config.geo_provider);
        eprintln!("Timeout: {}s", config.timeout.as_secs());
        eprintln!("Color output: {}", config.enable_color);
        eprintln!();
    }

    let app = App::new(config)?;
    app.run(cli.command).await
}
