use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::Text;
use tracker_core::{
    Config, IngestRequest, MemoryObservationStore, SqliteObservationStore, Tracker,
    provider_from_config,
};

use crate::menu::run_menu;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tracker", version, about = "Local Weather Tracker")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive numbered menu. Observations live in memory unless `--database` is given.
    Menu {
        /// Keep observations in this SQLite database instead of memory.
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Record the current weather for a city.
    Add { city: String, country: String },

    /// List stored observations.
    List,

    /// Replace the note of an observation.
    Update { id: i64, notes: String },

    /// Delete an observation.
    Delete { id: i64 },

    /// Interactively set API endpoints, database path and server address.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command.unwrap_or(Command::Menu { database: None }) {
            Command::Menu { database: None } => {
                let mut tracker =
                    Tracker::new(MemoryObservationStore::new(), provider_from_config(&config));
                run_menu(&mut tracker, io::stdin().lock(), io::stdout()).await
            }
            Command::Menu { database: Some(path) } => {
                let mut tracker = Tracker::new(open_store(path)?, provider_from_config(&config));
                run_menu(&mut tracker, io::stdin().lock(), io::stdout()).await
            }
            Command::Add { city, country } => {
                let mut tracker = sqlite_tracker(&config)?;
                let obs = tracker.add(&IngestRequest::new(city, country)).await?;
                println!("Added observation: {obs}");
                Ok(())
            }
            Command::List => {
                let observations = sqlite_tracker(&config)?.list()?;
                if observations.is_empty() {
                    println!("No observations available.");
                }
                for obs in observations {
                    println!("{obs}");
                }
                Ok(())
            }
            Command::Update { id, notes } => {
                sqlite_tracker(&config)?.update_note(id, &notes)?;
                println!("Note updated for observation {id}.");
                Ok(())
            }
            Command::Delete { id } => {
                sqlite_tracker(&config)?.delete(id)?;
                println!("Observation {id} deleted.");
                Ok(())
            }
            Command::Configure => configure(config, self.config),
        }
    }
}

fn sqlite_tracker(config: &Config) -> Result<Tracker<SqliteObservationStore>> {
    let store = open_store(config.database_path()?)?;
    Ok(Tracker::new(store, provider_from_config(config)))
}

fn open_store(path: PathBuf) -> Result<SqliteObservationStore> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
    }

    tracing::debug!("Opening observation database at {}", path.display());
    SqliteObservationStore::open(&path)
        .with_context(|| format!("Failed to open database: {}", path.display()))
}

fn configure(mut config: Config, path: Option<PathBuf>) -> Result<()> {
    config.api.geocoding_url =
        Text::new("Geocoding URL:").with_default(&config.api.geocoding_url).prompt()?;
    config.api.forecast_url =
        Text::new("Forecast URL:").with_default(&config.api.forecast_url).prompt()?;

    let current_db = config.database_path()?.display().to_string();
    let database = Text::new("Database path:").with_default(&current_db).prompt()?;
    config.storage.database_path = Some(PathBuf::from(database));

    config.server.bind =
        Text::new("Server bind address:").with_default(&config.server.bind).prompt()?;

    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };
    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
