pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{toml_config::TomlConfig, Settings};

pub use adapters::{http::FootballDataClient, store::JsonFileStore};
pub use core::normalize::ParseErrorPolicy;
pub use core::sync::{SyncEngine, SyncOptions, SyncReport};
pub use domain::model::{MatchId, NormalizedFixture, TimeWindow};
pub use domain::ports::{FixtureStore, FootballApi};
pub use utils::error::{Result, SyncError};
