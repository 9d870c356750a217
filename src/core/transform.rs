//! Joins raw fixtures against the reference caches into normalized records.

use crate::core::extract::{extract_id, LinkPrefixes};
use crate::core::normalize::{ParseErrorPolicy, TimestampNormalizer};
use crate::domain::model::{
    MatchId, NormalizedFixture, RawFixture, Season, SeasonId, Team, TeamId,
};
use crate::utils::error::{Result, SyncError};
use chrono::FixedOffset;
use std::collections::HashMap;

/// Per-fixture transform result. The two skip variants are counted
/// separately by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    Loaded(NormalizedFixture),
    /// The fixture belongs to a league absent from the season cache.
    UnknownLeague,
    /// The kickoff timestamp was unusable under a skipping policy.
    UnusableTimestamp,
}

/// Stateful per-run transformer. Holds the timestamp normalizer (whose
/// stale-value fallback is iteration-order dependent) and the per-date
/// diagnostics counters.
pub struct FixtureTransformer<'a> {
    prefixes: &'a LinkPrefixes,
    normalizer: TimestampNormalizer,
    date_counts: HashMap<String, u32>,
}

impl<'a> FixtureTransformer<'a> {
    pub fn new(prefixes: &'a LinkPrefixes, tz: FixedOffset, policy: ParseErrorPolicy) -> Self {
        Self {
            prefixes,
            normalizer: TimestampNormalizer::new(tz, policy),
            date_counts: HashMap::new(),
        }
    }

    /// Transforms one raw fixture.
    ///
    /// Skips (unknown league, unusable timestamp under a skipping policy)
    /// come back as their own outcome variants. A team missing from the
    /// cache is a per-fixture `Reference` error; the caller logs it and
    /// moves on to the next fixture.
    pub fn transform(
        &mut self,
        raw: &RawFixture,
        seasons: &HashMap<SeasonId, Season>,
        teams: &HashMap<TeamId, Team>,
    ) -> Result<TransformOutcome> {
        let match_id = MatchId::from(extract_id(&raw.self_link, &self.prefixes.fixtures).as_str());
        let league_id =
            SeasonId::from(extract_id(&raw.season_link, &self.prefixes.seasons).as_str());

        // Fixtures for leagues we don't track are dropped, not fatal.
        let Some(season) = seasons.get(&league_id) else {
            tracing::warn!(league = %league_id, match_id = %match_id, "unknown league, skipping fixture");
            return Ok(TransformOutcome::UnknownLeague);
        };

        let Some((date, time)) = self.normalizer.normalize(&raw.date)? else {
            return Ok(TransformOutcome::UnusableTimestamp);
        };

        let home_crest = self.resolve_crest(&raw.home_team_link, teams)?;
        let away_crest = self.resolve_crest(&raw.away_team_link, teams)?;

        *self.date_counts.entry(date.clone()).or_insert(0) += 1;

        Ok(TransformOutcome::Loaded(NormalizedFixture {
            match_id,
            date,
            time,
            home_team: raw.home_team_name.clone(),
            away_team: raw.away_team_name.clone(),
            home_crest,
            away_crest,
            league_id,
            league_caption: season.caption.clone(),
            home_goals: raw.goals_home,
            away_goals: raw.goals_away,
            matchday: raw.matchday,
        }))
    }

    fn resolve_crest(
        &self,
        team_link: &str,
        teams: &HashMap<TeamId, Team>,
    ) -> Result<Option<String>> {
        let team_id = TeamId::from(extract_id(team_link, &self.prefixes.teams).as_str());
        match teams.get(&team_id) {
            Some(team) => Ok(team.crest_url.clone()),
            None => Err(SyncError::Reference(team_id)),
        }
    }

    /// Logs how many fixtures landed on each local date. Diagnostics only.
    pub fn log_date_counts(&self) {
        let mut dates: Vec<_> = self.date_counts.iter().collect();
        dates.sort();
        for (date, count) in dates {
            tracing::debug!(%date, count, "fixtures per date");
        }
    }

    #[cfg(test)]
    pub(crate) fn date_counts(&self) -> &HashMap<String, u32> {
        &self.date_counts
    }
}
