//! Per-run memoized season and team lookup tables.
//!
//! One cache instance lives for exactly one sync run and is passed by
//! reference into the transformer; it is never shared across runs, so stale
//! reference data cannot leak between invocations.

use crate::core::extract::{extract_id, LinkPrefixes};
use crate::domain::model::{Season, SeasonId, Team, TeamId};
use crate::domain::ports::FootballApi;
use crate::utils::error::Result;
use std::collections::HashMap;
use tokio::sync::OnceCell;

pub struct ReferenceCache<'a, A: FootballApi> {
    api: &'a A,
    prefixes: &'a LinkPrefixes,
    seasons: OnceCell<HashMap<SeasonId, Season>>,
    teams: OnceCell<HashMap<TeamId, Team>>,
}

impl<'a, A: FootballApi> ReferenceCache<'a, A> {
    pub fn new(api: &'a A, prefixes: &'a LinkPrefixes) -> Self {
        Self {
            api,
            prefixes,
            seasons: OnceCell::new(),
            teams: OnceCell::new(),
        }
    }

    /// Season id → season, fetched at most once per cache lifetime.
    pub async fn seasons(&self) -> Result<&HashMap<SeasonId, Season>> {
        self.seasons
            .get_or_try_init(|| async {
                let seasons = self.api.seasons().await?;
                tracing::debug!(count = seasons.len(), "seasons loaded");

                let map = seasons
                    .into_iter()
                    .map(|season| {
                        let id =
                            SeasonId::from(extract_id(&season.self_link, &self.prefixes.seasons).as_str());
                        (id, season)
                    })
                    .collect();
                Ok(map)
            })
            .await
    }

    /// Team id → team across every known season, fetched at most once.
    ///
    /// Rosters are fetched in sorted season-id order so a team appearing in
    /// several seasons resolves deterministically (last season wins).
    pub async fn teams(&self) -> Result<&HashMap<TeamId, Team>> {
        self.teams
            .get_or_try_init(|| async {
                let seasons = self.seasons().await?;
                let mut season_ids: Vec<&SeasonId> = seasons.keys().collect();
                season_ids.sort();

                let mut map = HashMap::new();
                for season_id in season_ids {
                    let roster = self.api.teams(season_id).await?;
                    tracing::debug!(season = %season_id, count = roster.len(), "roster loaded");

                    for team in roster {
                        let id =
                            TeamId::from(extract_id(&team.self_link, &self.prefixes.teams).as_str());
                        map.insert(id, team);
                    }
                }

                tracing::debug!(count = map.len(), "team cache built");
                Ok(map)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawFixture, TimeWindow};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "http://api.test/alpha";

    struct CountingApi {
        season_calls: AtomicUsize,
        team_calls: AtomicUsize,
    }

    impl CountingApi {
        fn new() -> Self {
            Self {
                season_calls: AtomicUsize::new(0),
                team_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FootballApi for CountingApi {
        async fn seasons(&self) -> Result<Vec<Season>> {
            self.season_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                Season {
                    self_link: format!("{BASE}/soccerseasons/354"),
                    caption: "Premier League 2015/16".into(),
                },
                Season {
                    self_link: format!("{BASE}/soccerseasons/351"),
                    caption: "Bundesliga 2015/16".into(),
                },
            ])
        }

        async fn teams(&self, season: &SeasonId) -> Result<Vec<Team>> {
            self.team_calls.fetch_add(1, Ordering::SeqCst);
            // Team 5 appears in both rosters with a season-specific crest.
            Ok(vec![Team {
                self_link: format!("{BASE}/teams/5"),
                name: "FC Shared".into(),
                crest_url: Some(format!("http://crests.test/{season}.svg")),
            }])
        }

        async fn fixtures(&self, _window: TimeWindow) -> Result<Vec<RawFixture>> {
            unimplemented!("not used by cache tests")
        }
    }

    #[tokio::test]
    async fn seasons_fetched_exactly_once() {
        let api = CountingApi::new();
        let prefixes = LinkPrefixes::from_base_url(BASE);
        let cache = ReferenceCache::new(&api, &prefixes);

        let first = cache.seasons().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(
            first.get(&SeasonId::from("354")).unwrap().caption,
            "Premier League 2015/16"
        );

        cache.seasons().await.unwrap();
        assert_eq!(api.season_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn teams_merge_is_deterministic_last_write_wins() {
        let api = CountingApi::new();
        let prefixes = LinkPrefixes::from_base_url(BASE);
        let cache = ReferenceCache::new(&api, &prefixes);

        let teams = cache.teams().await.unwrap();
        assert_eq!(teams.len(), 1);
        // Sorted season order is 351 then 354, so 354's roster wins.
        assert_eq!(
            teams.get(&TeamId::from("5")).unwrap().crest_url.as_deref(),
            Some("http://crests.test/354.svg")
        );

        cache.teams().await.unwrap();
        assert_eq!(api.team_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.season_calls.load(Ordering::SeqCst), 1);
    }
}
