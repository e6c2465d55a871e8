use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use wayfinder::core::config::{self, CliOverrides};
use wayfinder::tui;

#[derive(Parser)]
#[command(name = "wayfinder", about = "Nested route navigation with a focus-aware history")]
struct Args {
    /// Route to start at when there is no saved history
    #[arg(short, long)]
    initial_route: Option<String>,

    /// Log level written to wayfinder.log
    #[arg(short, long)]
    log_level: Option<String>,

    /// Start fresh and don't save history on exit
    #[arg(long)]
    no_persist: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}; falling back to defaults");
            config::WayfinderConfig::default()
        }
    };
    let cli = CliOverrides {
        initial_route: args.initial_route,
        log_level: args.log_level,
        no_persist: args.no_persist,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to wayfinder.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("wayfinder.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Wayfinder starting up with {} declared routes",
        resolved.routes.len()
    );

    tui::run(resolved)
}
