use crate::domain::model::{NormalizedFixture, RawFixture, Season, SeasonId, Team, TimeWindow};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view of the remote football API: three resources, all GETs,
/// authenticated out-of-band by the implementation.
#[async_trait]
pub trait FootballApi: Send + Sync {
    async fn seasons(&self) -> Result<Vec<Season>>;
    async fn teams(&self, season: &SeasonId) -> Result<Vec<Team>>;
    async fn fixtures(&self, window: TimeWindow) -> Result<Vec<RawFixture>>;
}

/// Local store collaborator. One call per sync run; replace-on-conflict by
/// match id, so re-syncing identical data is a no-op.
#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// Returns the number of records inserted or updated.
    async fn bulk_upsert(&self, fixtures: &[NormalizedFixture]) -> Result<usize>;
}
