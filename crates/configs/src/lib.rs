//! # Configs
//!
//! Server settings: every tunable the coordination services consume, read
//! from `VIV_`-prefixed environment variables over built-in defaults. A
//! `.env` file is honored before the environment is read.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Root directory for stored species artifacts.
    pub artifact_root: PathBuf,
    /// Line-oriented blacklist file; unset disables moderation.
    pub word_list_file: Option<PathBuf>,
    /// Connection string for the metadata database.
    pub database_url: String,
    /// Minutes a submitter waits between species uploads.
    pub introduction_wait_minutes: i64,
    /// Species uploads allowed per submitter per day.
    pub introduction_daily_limit: u32,
    /// How far ahead a peer lease is dated, in minutes.
    pub peer_lease_minutes: i64,
    /// Window, in days, for "recent" species listings.
    pub recent_species_days: i64,
    /// Latest client version this server knows about.
    pub latest_version: String,
    pub welcome_message: String,
    pub motd: String,
}

impl ServerSettings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let settings: Self = config::Config::builder()
            .set_default("artifact_root", "data/artifacts")?
            .set_default("word_list_file", None::<String>)?
            .set_default("database_url", "sqlite:vivarium.db")?
            .set_default("introduction_wait_minutes", 5)?
            .set_default("introduction_daily_limit", 30)?
            .set_default("peer_lease_minutes", 30)?
            .set_default("recent_species_days", 30)?
            .set_default("latest_version", "1.0.0")?
            .set_default("welcome_message", "Welcome to the vivarium!")?
            .set_default("motd", "Have fun!")?
            .add_source(config::Environment::with_prefix("VIV").try_parsing(true))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            "settings loaded: artifacts at {}, wait {}m, daily limit {}",
            settings.artifact_root.display(),
            settings.introduction_wait_minutes,
            settings.introduction_daily_limit
        );
        Ok(settings)
    }
}
