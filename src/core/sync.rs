//! The sync orchestrator: two windowed fixture fetches, one shared reference
//! cache, one bulk upsert.

use crate::core::extract::LinkPrefixes;
use crate::core::normalize::ParseErrorPolicy;
use crate::core::reference::ReferenceCache;
use crate::core::transform::{FixtureTransformer, TransformOutcome};
use crate::domain::model::{RawFixture, TimeWindow};
use crate::domain::ports::{FixtureStore, FootballApi};
use crate::utils::error::Result;
use chrono::{FixedOffset, Local, Offset};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub base_url: String,
    pub past_window: TimeWindow,
    pub future_window: TimeWindow,
    pub tz_offset: FixedOffset,
    pub on_parse_error: ParseErrorPolicy,
}

impl SyncOptions {
    /// Defaults: previous and next 3 days, kickoffs normalized into the
    /// process-local timezone.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            past_window: TimeWindow::Previous(3),
            future_window: TimeWindow::Next(3),
            tz_offset: Local::now().offset().fix(),
            on_parse_error: ParseErrorPolicy::default(),
        }
    }
}

/// Outcome counters for one run. Nothing here is persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Raw fixtures received across both windows.
    pub fetched: usize,
    /// Fixtures normalized into the batch.
    pub loaded: usize,
    /// Fixtures for leagues absent from the season cache.
    pub skipped_unknown_league: usize,
    /// Fixtures dropped because their kickoff timestamp was unusable.
    pub skipped_unparseable: usize,
    /// Fixtures dropped by a per-item reference failure.
    pub failed: usize,
    /// Records the store reported inserted or updated.
    pub upserted: usize,
}

pub struct SyncEngine<A: FootballApi, S: FixtureStore> {
    api: A,
    store: S,
    options: SyncOptions,
}

impl<A: FootballApi, S: FixtureStore> SyncEngine<A, S> {
    pub fn new(api: A, store: S, options: SyncOptions) -> Self {
        Self {
            api,
            store,
            options,
        }
    }

    /// Runs one full sync. Window-level fetch failures are logged and that
    /// window contributes nothing; the run itself only fails if the
    /// reference data cannot be fetched (nothing can be resolved without it)
    /// or the store rejects the batch.
    pub async fn sync_fixtures(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        let (future, past) = tokio::join!(
            self.fetch_window(self.options.future_window),
            self.fetch_window(self.options.past_window),
        );

        let mut raw: Vec<RawFixture> = Vec::new();
        raw.extend(future);
        raw.extend(past);
        report.fetched = raw.len();

        let prefixes = LinkPrefixes::from_base_url(&self.options.base_url);
        let cache = ReferenceCache::new(&self.api, &prefixes);
        let mut transformer =
            FixtureTransformer::new(&prefixes, self.options.tz_offset, self.options.on_parse_error);

        let mut batch = Vec::with_capacity(raw.len());
        if !raw.is_empty() {
            // Reference data is fetched lazily: an empty run never touches
            // the seasons or teams resources.
            let seasons = cache.seasons().await?;
            let teams = cache.teams().await?;

            for fixture in &raw {
                match transformer.transform(fixture, seasons, teams) {
                    Ok(TransformOutcome::Loaded(normalized)) => batch.push(normalized),
                    Ok(TransformOutcome::UnknownLeague) => report.skipped_unknown_league += 1,
                    Ok(TransformOutcome::UnusableTimestamp) => report.skipped_unparseable += 1,
                    Err(err) => {
                        tracing::warn!(self_link = %fixture.self_link, error = %err, "dropping fixture");
                        report.failed += 1;
                    }
                }
            }
        }

        report.loaded = batch.len();
        transformer.log_date_counts();

        report.upserted = self.store.bulk_upsert(&batch).await?;
        tracing::info!(
            fetched = report.fetched,
            loaded = report.loaded,
            skipped_unknown_league = report.skipped_unknown_league,
            skipped_unparseable = report.skipped_unparseable,
            failed = report.failed,
            upserted = report.upserted,
            "sync complete"
        );

        Ok(report)
    }

    async fn fetch_window(&self, window: TimeWindow) -> Vec<RawFixture> {
        match self.api.fixtures(window).await {
            Ok(fixtures) => {
                tracing::info!(window = %window, count = fixtures.len(), "fixtures fetched");
                fixtures
            }
            Err(err) => {
                // One bad window never sinks the run.
                tracing::warn!(window = %window, error = %err, "window fetch failed, contributing zero fixtures");
                Vec::new()
            }
        }
    }
}
