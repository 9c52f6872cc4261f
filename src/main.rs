//! Binary entry point: resolve the data directory, start logging, and hand the
//! store to the TUI.
use clap::Parser;
use hotel_manager::{run_app, App, AppConfig, Cli, Store};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_cli(Cli::parse());
    config.init_logging()?;
    log::info!("starting with data directory {}", config.data_dir.display());

    let store = Store::open(&config.data_dir)?;
    let mut app = App::new(store);
    run_app(&mut app)
}
