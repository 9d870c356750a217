use crate::config::{parse_policy, Settings};
use crate::core::normalize::ParseErrorPolicy;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://api.football-data.org/alpha";
const DEFAULT_STORE_PATH: &str = "./fixtures.json";
const DEFAULT_WINDOW_DAYS: u8 = 3;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Flags are optional so that, when `--config` supplies a TOML file, only
/// the flags actually passed override the file's values.
#[derive(Debug, Clone, Parser)]
#[command(name = "score-sync")]
#[command(about = "Sync football fixtures from a football-data style API into a local store")]
pub struct CliConfig {
    #[arg(long, help = "API base URL (default: the football-data alpha endpoint)")]
    pub api_url: Option<String>,

    #[arg(long, env = "FOOTBALL_DATA_API_KEY", hide_env_values = true)]
    pub api_token: Option<String>,

    #[arg(long, help = "Store file location (default: ./fixtures.json)")]
    pub store_path: Option<PathBuf>,

    #[arg(long, help = "Days of recent past fixtures to sync (default: 3)")]
    pub days_back: Option<u8>,

    #[arg(long, help = "Days of upcoming fixtures to sync (default: 3)")]
    pub days_ahead: Option<u8>,

    #[arg(
        long,
        help = "Normalize kickoffs to this UTC offset instead of the process timezone"
    )]
    pub utc_offset_minutes: Option<i32>,

    #[arg(
        long,
        help = "Policy for unparseable kickoff timestamps: reuse-previous, skip-record or fail-run"
    )]
    pub on_parse_error: Option<String>,

    #[arg(long, help = "Per-request timeout (default: 10)")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Load api/sync/store settings from a TOML file; flags passed alongside win")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs (for scheduled runs)")]
    pub log_json: bool,
}

impl CliConfig {
    /// Resolves settings from flags alone, filling the gaps with defaults.
    pub fn into_settings(self) -> Result<Settings> {
        let api_token = self.api_token.ok_or_else(|| SyncError::Config {
            message: "an API token is required (--api-token or FOOTBALL_DATA_API_KEY)".to_string(),
        })?;
        let on_parse_error = match self.on_parse_error {
            Some(value) => parse_policy("on_parse_error", &value)?,
            None => ParseErrorPolicy::default(),
        };

        let settings = Settings {
            api_url: self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token,
            timeout: Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            store_path: self
                .store_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            days_back: self.days_back.unwrap_or(DEFAULT_WINDOW_DAYS),
            days_ahead: self.days_ahead.unwrap_or(DEFAULT_WINDOW_DAYS),
            utc_offset_minutes: self.utc_offset_minutes,
            on_parse_error,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Overlays explicitly-passed flags onto file-derived settings; anything
    /// the user did not pass keeps the file's value.
    pub fn overlay(self, base: Settings) -> Result<Settings> {
        let on_parse_error = match self.on_parse_error {
            Some(value) => parse_policy("on_parse_error", &value)?,
            None => base.on_parse_error,
        };

        let settings = Settings {
            api_url: self.api_url.unwrap_or(base.api_url),
            api_token: self.api_token.unwrap_or(base.api_token),
            timeout: self
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(base.timeout),
            store_path: self.store_path.unwrap_or(base.store_path),
            days_back: self.days_back.unwrap_or(base.days_back),
            days_ahead: self.days_ahead.unwrap_or(base.days_ahead),
            utc_offset_minutes: self.utc_offset_minutes.or(base.utc_offset_minutes),
            on_parse_error,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;

    fn parse(args: &[&str]) -> CliConfig {
        let mut full = vec!["score-sync"];
        full.extend_from_slice(args);
        CliConfig::parse_from(full)
    }

    fn file_settings() -> Settings {
        let config: TomlConfig = toml::from_str(
            r#"
            [api]
            endpoint = "http://api.football-data.org/alpha"
            token = "file-token"

            [sync]
            days_back = 5
            days_ahead = 5
            on_parse_error = "skip-record"

            [store]
            path = "/var/lib/score-sync/fixtures.json"
            "#,
        )
        .unwrap();
        config.into_settings().unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let settings = parse(&["--api-token", "secret"]).into_settings().unwrap();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.days_back, 3);
        assert_eq!(settings.days_ahead, 3);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.on_parse_error, ParseErrorPolicy::ReusePrevious);
    }

    #[test]
    fn rejects_zero_day_window() {
        let config = parse(&["--api-token", "secret", "--days-ahead", "0"]);
        assert!(config.into_settings().is_err());
    }

    #[test]
    fn rejects_unknown_parse_policy() {
        let config = parse(&["--api-token", "secret", "--on-parse-error", "explode"]);
        assert!(config.into_settings().is_err());
    }

    #[test]
    fn rejects_bad_api_url() {
        let config = parse(&["--api-token", "secret", "--api-url", "ftp://nope"]);
        assert!(config.into_settings().is_err());
    }

    #[test]
    fn rejects_unrepresentable_utc_offset() {
        let config = parse(&["--api-token", "secret", "--utc-offset-minutes", "1440"]);
        assert!(config.into_settings().is_err());
    }

    #[test]
    fn explicit_flags_override_file_settings() {
        std::env::remove_var("FOOTBALL_DATA_API_KEY");
        let config = parse(&["--api-token", "cli-token", "--days-back", "7"]);

        let settings = config.overlay(file_settings()).unwrap();
        assert_eq!(settings.api_token, "cli-token");
        assert_eq!(settings.days_back, 7);
        // Everything not passed keeps the file's values.
        assert_eq!(settings.days_ahead, 5);
        assert_eq!(settings.on_parse_error, ParseErrorPolicy::SkipRecord);
        assert_eq!(
            settings.store_path,
            PathBuf::from("/var/lib/score-sync/fixtures.json")
        );
    }

    #[test]
    fn unset_flags_keep_file_settings() {
        std::env::remove_var("FOOTBALL_DATA_API_KEY");
        let settings = parse(&[]).overlay(file_settings()).unwrap();
        assert_eq!(settings.api_token, "file-token");
        assert_eq!(settings.days_back, 5);
        assert_eq!(settings.days_ahead, 5);
    }

    #[test]
    fn overlayed_flags_are_still_validated() {
        let config = parse(&["--days-ahead", "0"]);
        assert!(config.overlay(file_settings()).is_err());
    }
}
