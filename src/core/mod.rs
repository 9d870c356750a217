pub mod extract;
pub mod normalize;
pub mod reference;
pub mod sync;
pub mod transform;

pub use crate::domain::model::{NormalizedFixture, RawFixture, Season, Team, TimeWindow};
pub use crate::domain::ports::{FixtureStore, FootballApi};
pub use crate::utils::error::Result;
