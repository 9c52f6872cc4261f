//! Command-line options and data directory resolution.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".hotel-manager";
/// Log file written next to the data files; the terminal belongs to the UI.
const LOG_FILE_NAME: &str = "hotel-manager.log";

#[derive(Parser, Debug)]
#[command(name = "hotel-manager", version, about = "Manage hotel rooms, guests and reservations")]
pub struct Cli {
    /// Directory holding rooms.json, customers.json and reservations.json
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
        Self { data_dir }
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    /// Route `log` output to the log file. The level comes from `RUST_LOG`
    /// and defaults to `info`.
    pub fn init_logging(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).context("failed to create data directory")?;
        let path = self.log_file();
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()
            .context("failed to initialize logging")
    }
}

/// `~/.hotel-manager`, or the working directory when no home is known.
fn default_data_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let cli = Cli::parse_from(["hotel-manager", "--data-dir", "/tmp/hotel"]);
        let config = AppConfig::from_cli(cli);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/hotel"));
        assert_eq!(config.log_file(), PathBuf::from("/tmp/hotel/hotel-manager.log"));
    }

    #[test]
    fn default_data_dir_is_hidden_folder() {
        let config = AppConfig::from_cli(Cli::parse_from(["hotel-manager"]));
        assert!(config.data_dir.ends_with(DATA_DIR_NAME) || config.data_dir == PathBuf::from("."));
    }
}
