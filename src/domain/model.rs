use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

// Seasons double as leagues in the alpha API, so a fixture's league id
// is a SeasonId.
id_type!(SeasonId);
id_type!(TeamId);
id_type!(MatchId);

/// A soccer season (one league campaign) as fetched from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub self_link: String,
    pub caption: String,
}

/// A team within a season's roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub self_link: String,
    pub name: String,
    pub crest_url: Option<String>,
}

/// One fixture exactly as the API describes it: all cross-references are
/// still hyperlink strings, the kickoff is a raw UTC timestamp string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFixture {
    pub self_link: String,
    pub season_link: String,
    pub home_team_link: String,
    pub away_team_link: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub date: String,
    pub goals_home: Option<i64>,
    pub goals_away: Option<i64>,
    pub matchday: Option<i64>,
}

/// The persisted unit: a fixture with every reference resolved and the
/// kickoff split into local-timezone date and time. Keyed by `match_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFixture {
    pub match_id: MatchId,
    pub date: String,
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub home_crest: Option<String>,
    pub away_crest: Option<String>,
    pub league_id: SeasonId,
    pub league_caption: String,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub matchday: Option<i64>,
}

/// Symbolic relative date range for a fixtures query, matching the API's
/// `timeFrame` parameter ("n3" = next 3 days, "p3" = previous 3 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    Next(u8),
    Previous(u8),
}

impl TimeWindow {
    pub fn as_query(&self) -> String {
        match self {
            TimeWindow::Next(days) => format!("n{days}"),
            TimeWindow::Previous(days) => format!("p{days}"),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Next(days) => write!(f, "next {days} days"),
            TimeWindow::Previous(days) => write!(f, "previous {days} days"),
        }
    }
}
