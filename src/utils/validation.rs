use crate::utils::error::{Result, SyncError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SyncError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SyncError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SyncError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "value cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// The API's timeFrame parameter accepts 1..=99 days.
pub fn validate_window_days(field_name: &str, days: u8) -> Result<()> {
    if !(1..=99).contains(&days) {
        return Err(SyncError::InvalidConfigValue {
            field: field_name.to_string(),
            value: days.to_string(),
            reason: "window must cover between 1 and 99 days".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("api_url", "http://api.football-data.org/alpha").is_ok());
        assert!(validate_url("api_url", "https://api.football-data.org/alpha").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(validate_url("api_url", "ftp://example.com").is_err());
        assert!(validate_url("api_url", "not a url").is_err());
        assert!(validate_url("api_url", "").is_err());
    }

    #[test]
    fn window_day_bounds() {
        assert!(validate_window_days("days_ahead", 1).is_ok());
        assert!(validate_window_days("days_ahead", 99).is_ok());
        assert!(validate_window_days("days_ahead", 0).is_err());
        assert!(validate_window_days("days_ahead", 100).is_err());
    }
}
