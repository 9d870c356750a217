//! File-backed fixture store.
//!
//! Keeps a JSON map of match id → normalized fixture. One bulk upsert per
//! sync run, replace on conflict by match id; duplicates never error.

use crate::domain::model::{MatchId, NormalizedFixture};
use crate::domain::ports::FixtureStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole store. Missing file means an empty store.
    pub fn load(&self) -> Result<BTreeMap<MatchId, NormalizedFixture>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&self, records: &BTreeMap<MatchId, NormalizedFixture>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[async_trait]
impl FixtureStore for JsonFileStore {
    async fn bulk_upsert(&self, fixtures: &[NormalizedFixture]) -> Result<usize> {
        let mut records = self.load()?;
        for fixture in fixtures {
            records.insert(fixture.match_id.clone(), fixture.clone());
        }
        self.save(&records)?;

        tracing::debug!(
            upserted = fixtures.len(),
            total = records.len(),
            "store updated"
        );
        Ok(fixtures.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SeasonId;
    use tempfile::TempDir;

    fn fixture(id: &str, time: &str) -> NormalizedFixture {
        NormalizedFixture {
            match_id: MatchId::from(id),
            date: "2015-03-14".into(),
            time: time.into(),
            home_team: "Arsenal FC".into(),
            away_team: "Chelsea FC".into(),
            home_crest: None,
            away_crest: None,
            league_id: SeasonId::from("354"),
            league_caption: "Premier League 2015/16".into(),
            home_goals: None,
            away_goals: None,
            matchday: Some(29),
        }
    }

    #[tokio::test]
    async fn upsert_replaces_on_conflict() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("fixtures.json"));

        store.bulk_upsert(&[fixture("1", "19:45")]).await.unwrap();
        store.bulk_upsert(&[fixture("1", "20:00")]).await.unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records.get(&MatchId::from("1")).unwrap().time, "20:00");
    }

    #[tokio::test]
    async fn empty_batch_leaves_store_intact() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("fixtures.json"));

        store.bulk_upsert(&[fixture("1", "19:45")]).await.unwrap();
        let count = store.bulk_upsert(&[]).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep/fixtures.json"));
        store.bulk_upsert(&[fixture("1", "19:45")]).await.unwrap();
        assert!(store.path().exists());
    }
}
