use crate::config::{parse_policy, validate_offset_minutes, Settings};
use crate::core::normalize::ParseErrorPolicy;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{
    validate_non_empty, validate_url, validate_window_days, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// TOML file settings for scheduled runs, e.g.
///
/// ```toml
/// [api]
/// endpoint = "http://api.football-data.org/alpha"
/// token = "…"           # optional, falls back to FOOTBALL_DATA_API_KEY
/// timeout_seconds = 10
///
/// [sync]
/// days_back = 3
/// days_ahead = 3
/// on_parse_error = "reuse-previous"
///
/// [store]
/// path = "/var/lib/score-sync/fixtures.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiSection,
    pub sync: Option<SyncSection>,
    pub store: StoreSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSection {
    pub days_back: Option<u8>,
    pub days_ahead: Option<u8>,
    pub utc_offset_minutes: Option<i32>,
    pub on_parse_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: PathBuf,
}

impl TomlConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SyncError::Config {
            message: format!("failed to parse {}: {e}", path.display()),
        })
    }

    /// Resolves file values into runnable settings. A missing token falls
    /// back to the `FOOTBALL_DATA_API_KEY` environment variable.
    pub fn into_settings(self) -> Result<Settings> {
        self.validate()?;

        let token = match self.api.token {
            Some(token) => token,
            None => std::env::var("FOOTBALL_DATA_API_KEY").map_err(|_| SyncError::Config {
                message: "no api.token in config and FOOTBALL_DATA_API_KEY is not set".to_string(),
            })?,
        };

        let sync = self.sync.unwrap_or(SyncSection {
            days_back: None,
            days_ahead: None,
            utc_offset_minutes: None,
            on_parse_error: None,
        });

        let on_parse_error = match sync.on_parse_error {
            Some(value) => parse_policy("sync.on_parse_error", &value)?,
            None => ParseErrorPolicy::default(),
        };

        Ok(Settings {
            api_url: self.api.endpoint,
            api_token: token,
            timeout: Duration::from_secs(self.api.timeout_seconds.unwrap_or(10)),
            store_path: self.store.path,
            days_back: sync.days_back.unwrap_or(3),
            days_ahead: sync.days_ahead.unwrap_or(3),
            utc_offset_minutes: sync.utc_offset_minutes,
            on_parse_error,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.api.endpoint)?;
        if let Some(token) = &self.api.token {
            validate_non_empty("api.token", token)?;
        }
        if let Some(sync) = &self.sync {
            if let Some(days) = sync.days_back {
                validate_window_days("sync.days_back", days)?;
            }
            if let Some(days) = sync.days_ahead {
                validate_window_days("sync.days_ahead", days)?;
            }
            if let Some(minutes) = sync.utc_offset_minutes {
                validate_offset_minutes("sync.utc_offset_minutes", minutes)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: TomlConfig = toml::from_str(
            r#"
            [api]
            endpoint = "http://api.football-data.org/alpha"
            token = "secret"
            timeout_seconds = 5

            [sync]
            days_back = 7
            days_ahead = 1
            utc_offset_minutes = 120
            on_parse_error = "skip-record"

            [store]
            path = "/tmp/fixtures.json"
            "#,
        )
        .unwrap();

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.days_back, 7);
        assert_eq!(settings.days_ahead, 1);
        assert_eq!(settings.utc_offset_minutes, Some(120));
        assert_eq!(settings.on_parse_error, ParseErrorPolicy::SkipRecord);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn sync_section_is_optional() {
        let config: TomlConfig = toml::from_str(
            r#"
            [api]
            endpoint = "http://api.football-data.org/alpha"
            token = "secret"

            [store]
            path = "/tmp/fixtures.json"
            "#,
        )
        .unwrap();

        let settings = config.into_settings().unwrap();
        assert_eq!(settings.days_back, 3);
        assert_eq!(settings.days_ahead, 3);
        assert_eq!(settings.on_parse_error, ParseErrorPolicy::ReusePrevious);
    }

    #[test]
    fn rejects_out_of_range_window() {
        let config: TomlConfig = toml::from_str(
            r#"
            [api]
            endpoint = "http://api.football-data.org/alpha"
            token = "secret"

            [sync]
            days_back = 100

            [store]
            path = "/tmp/fixtures.json"
            "#,
        )
        .unwrap();

        assert!(config.into_settings().is_err());
    }
}
