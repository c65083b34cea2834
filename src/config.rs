use rocket::figment::Figment;
use serde::Deserialize;

use crate::internal_error::InternalResult;

/// Application settings read from the same figment as Rocket's own
/// (`Rocket.toml`, then `ROCKET_*` environment variables).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            database_path: "goalflow.db".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> InternalResult<AppConfig> {
        Ok(figment.extract()?)
    }
}
