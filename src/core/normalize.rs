//! Kickoff timestamp normalization.
//!
//! The API reports kickoffs as combined UTC strings (`2015-03-14T19:45:00Z`);
//! the store wants a local-timezone date and time split apart.

use crate::utils::error::{Result, SyncError};
use chrono::{FixedOffset, NaiveDateTime};
use std::str::FromStr;

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// What to do when a kickoff timestamp fails to parse.
///
/// Under `ReusePrevious` (the default) the record keeps the previous
/// fixture's date and time instead of being dropped; the stricter policies
/// are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorPolicy {
    #[default]
    ReusePrevious,
    SkipRecord,
    FailRun,
}

impl FromStr for ParseErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "reuse-previous" => Ok(ParseErrorPolicy::ReusePrevious),
            "skip-record" => Ok(ParseErrorPolicy::SkipRecord),
            "fail-run" => Ok(ParseErrorPolicy::FailRun),
            other => Err(format!(
                "unknown parse-error policy {other:?} (expected reuse-previous, skip-record or fail-run)"
            )),
        }
    }
}

/// A local-timezone `(date, time)` pair, `YYYY-MM-DD` / `HH:MM`.
pub type LocalDateTime = (String, String);

pub struct TimestampNormalizer {
    tz: FixedOffset,
    policy: ParseErrorPolicy,
    last_good: Option<LocalDateTime>,
}

impl TimestampNormalizer {
    pub fn new(tz: FixedOffset, policy: ParseErrorPolicy) -> Self {
        Self {
            tz,
            policy,
            last_good: None,
        }
    }

    /// Converts one raw UTC timestamp into local date and time components.
    ///
    /// `Ok(Some(_))` is a usable pair, `Ok(None)` means the record should be
    /// skipped (per policy), `Err` only under `ParseErrorPolicy::FailRun`.
    pub fn normalize(&mut self, raw: &str) -> Result<Option<LocalDateTime>> {
        match NaiveDateTime::parse_from_str(raw, UTC_FORMAT) {
            Ok(naive) => {
                let local = naive.and_utc().with_timezone(&self.tz);
                let pair = (
                    local.format(DATE_FORMAT).to_string(),
                    local.format(TIME_FORMAT).to_string(),
                );
                self.last_good = Some(pair.clone());
                Ok(Some(pair))
            }
            Err(source) => match self.policy {
                ParseErrorPolicy::ReusePrevious => match &self.last_good {
                    Some(stale) => {
                        tracing::warn!(
                            timestamp = raw,
                            error = %source,
                            "unparseable kickoff, reusing previous date/time"
                        );
                        Ok(Some(stale.clone()))
                    }
                    None => {
                        tracing::warn!(
                            timestamp = raw,
                            error = %source,
                            "unparseable kickoff with no previous value, skipping record"
                        );
                        Ok(None)
                    }
                },
                ParseErrorPolicy::SkipRecord => {
                    tracing::warn!(timestamp = raw, error = %source, "unparseable kickoff, skipping record");
                    Ok(None)
                }
                ParseErrorPolicy::FailRun => Err(SyncError::Parse {
                    value: raw.to_string(),
                    source,
                }),
            },
        }
    }
}
