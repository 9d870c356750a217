#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::normalize::ParseErrorPolicy;
use crate::core::sync::SyncOptions;
use crate::domain::model::TimeWindow;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{
    validate_non_empty, validate_url, validate_window_days, Validate,
};
use chrono::{FixedOffset, Local, Offset};
use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved settings for one sync run, whichever source they came from.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub api_token: String,
    pub timeout: Duration,
    pub store_path: PathBuf,
    pub days_back: u8,
    pub days_ahead: u8,
    pub utc_offset_minutes: Option<i32>,
    pub on_parse_error: ParseErrorPolicy,
}

impl Settings {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            base_url: self.api_url.clone(),
            past_window: TimeWindow::Previous(self.days_back),
            future_window: TimeWindow::Next(self.days_ahead),
            tz_offset: self.tz_offset(),
            on_parse_error: self.on_parse_error,
        }
    }

    fn tz_offset(&self) -> FixedOffset {
        match self.utc_offset_minutes {
            // Validation already bounded the offset, so the conversion
            // cannot fail for settings that passed it.
            Some(minutes) => FixedOffset::east_opt(minutes * 60)
                .unwrap_or_else(|| Local::now().offset().fix()),
            None => Local::now().offset().fix(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;
        validate_non_empty("api_token", &self.api_token)?;
        validate_window_days("days_back", self.days_back)?;
        validate_window_days("days_ahead", self.days_ahead)?;
        if let Some(minutes) = self.utc_offset_minutes {
            validate_offset_minutes("utc_offset_minutes", minutes)?;
        }
        Ok(())
    }
}

pub(crate) fn parse_policy(field: &str, value: &str) -> Result<ParseErrorPolicy> {
    value
        .parse()
        .map_err(|reason: String| SyncError::InvalidConfigValue {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        })
}

pub(crate) fn validate_offset_minutes(field: &str, minutes: i32) -> Result<()> {
    // FixedOffset only represents offsets strictly inside a day (±86400
    // seconds exclusive); the bound here must match so config errors surface
    // before the run starts instead of degrading to the local offset.
    if !(-(24 * 60 - 1)..=(24 * 60 - 1)).contains(&minutes) {
        return Err(SyncError::InvalidConfigValue {
            field: field.to_string(),
            value: minutes.to_string(),
            reason: "UTC offset must be strictly within a day of UTC".to_string(),
        });
    }
    Ok(())
}
