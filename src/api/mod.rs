pub mod score_source;
pub mod scores_api;

pub use score_source::ScoreSource;
pub use scores_api::{GameRecord, PlayerScores, ScoreDocument};
