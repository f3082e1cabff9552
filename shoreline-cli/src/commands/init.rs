//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the shoreline data directory and database.

use std::path::PathBuf;

use clap::Args;
use shoreline::database::{default_data_dir, Database, DatabaseConfig};

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Default configuration file contents written by `init --with-config`.
const DEFAULT_CONFIG: &str = "\
# shoreline property configuration
#listing_id: 49599459
#currency: usd
#nightly_rate: 300
#cleaning_fee: 199
#service_fee: 0
#calendar_id: primary
";

/// Initialize shoreline data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "dir", value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > default
        let data_dir = self
            .dir
            .or_else(|| global.data_dir.clone())
            .or_else(|| default_data_dir().ok())
            .ok_or_else(|| {
                CliError::Config(
                    "Could not determine data directory (home directory not found)".to_string(),
                )
            })?;

        let created_dir = !data_dir.exists();
        std::fs::create_dir_all(&data_dir)?;

        let db_path = data_dir.join("shoreline.db");
        let created_db = !db_path.exists();
        Database::open(DatabaseConfig::new(&db_path))?;

        println!("Initialized shoreline in: {}", data_dir.display());
        if created_dir {
            println!("  - Created data directory");
        }
        if created_db {
            println!("  - Created database");
        }

        if self.with_config {
            let config_path = data_dir.join("config.yaml");
            if config_path.exists() {
                println!("  - Configuration file already exists (not overwritten)");
            } else {
                std::fs::write(&config_path, DEFAULT_CONFIG)?;
                println!("  - Created default configuration file");
            }
        }

        Ok(())
    }
}
