//! reqwest-backed client for football-data.org "alpha" style APIs.

use crate::domain::model::{RawFixture, Season, SeasonId, Team, TimeWindow};
use crate::domain::ports::FootballApi;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const AUTH_HEADER: &str = "X-Auth-Token";

pub struct FootballDataClient {
    client: Client,
    base_url: String,
}

impl FootballDataClient {
    /// The auth token is attached to every request as a default header, so
    /// call sites never see credentials.
    pub fn new(base_url: &str, api_token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(api_token).map_err(|_| {
            SyncError::InvalidConfigValue {
                field: "api_token".to_string(),
                value: "<redacted>".to_string(),
                reason: "token contains characters not valid in a header".to_string(),
            }
        })?;
        token.set_sensitive(true);
        headers.insert(AUTH_HEADER, token);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: Option<(&str, String)>,
    ) -> Result<T> {
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(url.as_str());
        if let Some((key, value)) = query {
            request = request.query(&[(key, value)]);
        }

        let response = request.send().await.map_err(SyncError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                message: format!("{url} returned {status}"),
            });
        }

        // A decode failure here is a malformed payload, not a network fault.
        response.json::<T>().await.map_err(|e| SyncError::Api {
            message: format!("{url} returned malformed payload: {e}"),
        })
    }
}

#[async_trait]
impl FootballApi for FootballDataClient {
    async fn seasons(&self) -> Result<Vec<Season>> {
        let url = format!("{}/soccerseasons", self.base_url);
        let seasons: Vec<SeasonWire> = self.get_json(url, None).await?;
        Ok(seasons.into_iter().map(Season::from).collect())
    }

    async fn teams(&self, season: &SeasonId) -> Result<Vec<Team>> {
        let url = format!("{}/soccerseasons/{}/teams", self.base_url, season);
        let response: TeamsWire = self.get_json(url, None).await?;
        Ok(response.teams.into_iter().map(Team::from).collect())
    }

    async fn fixtures(&self, window: TimeWindow) -> Result<Vec<RawFixture>> {
        let url = format!("{}/fixtures", self.base_url);
        let response: FixturesWire = self
            .get_json(url, Some(("timeFrame", window.as_query())))
            .await?;
        Ok(response.fixtures.into_iter().map(RawFixture::from).collect())
    }
}

// Wire shapes. Every resource carries its cross-references as `_links`
// hyperlink objects; ids are extracted downstream.

#[derive(Debug, Deserialize)]
struct Href {
    href: String,
}

#[derive(Debug, Deserialize)]
struct SelfLink {
    #[serde(rename = "self")]
    this: Href,
}

#[derive(Debug, Deserialize)]
struct SeasonWire {
    #[serde(rename = "_links")]
    links: SelfLink,
    caption: String,
}

impl From<SeasonWire> for Season {
    fn from(wire: SeasonWire) -> Self {
        Season {
            self_link: wire.links.this.href,
            caption: wire.caption,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamsWire {
    teams: Vec<TeamWire>,
}

#[derive(Debug, Deserialize)]
struct TeamWire {
    #[serde(rename = "_links")]
    links: SelfLink,
    name: String,
    #[serde(rename = "crestUrl")]
    crest_url: Option<String>,
}

impl From<TeamWire> for Team {
    fn from(wire: TeamWire) -> Self {
        Team {
            self_link: wire.links.this.href,
            name: wire.name,
            crest_url: wire.crest_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FixturesWire {
    fixtures: Vec<FixtureWire>,
}

#[derive(Debug, Deserialize)]
struct FixtureLinks {
    #[serde(rename = "self")]
    this: Href,
    soccerseason: Href,
    #[serde(rename = "homeTeam")]
    home_team: Href,
    #[serde(rename = "awayTeam")]
    away_team: Href,
}

#[derive(Debug, Deserialize)]
struct FixtureResult {
    #[serde(rename = "goalsHomeTeam")]
    goals_home_team: Option<i64>,
    #[serde(rename = "goalsAwayTeam")]
    goals_away_team: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct FixtureWire {
    #[serde(rename = "_links")]
    links: FixtureLinks,
    date: String,
    #[serde(rename = "homeTeamName")]
    home_team_name: String,
    #[serde(rename = "awayTeamName")]
    away_team_name: String,
    #[serde(default)]
    result: Option<FixtureResult>,
    matchday: Option<i64>,
}

impl From<FixtureWire> for RawFixture {
    fn from(wire: FixtureWire) -> Self {
        let (goals_home, goals_away) = match wire.result {
            Some(result) => (result.goals_home_team, result.goals_away_team),
            None => (None, None),
        };
        RawFixture {
            self_link: wire.links.this.href,
            season_link: wire.links.soccerseason.href,
            home_team_link: wire.links.home_team.href,
            away_team_link: wire.links.away_team.href,
            home_team_name: wire.home_team_name,
            away_team_name: wire.away_team_name,
            date: wire.date,
            goals_home,
            goals_away,
            matchday: wire.matchday,
        }
    }
}
