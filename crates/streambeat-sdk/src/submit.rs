//! Score submission validation.
//!
//! The backend relay bound-checks a candidate score before forwarding it to
//! the chain; the contract's backend-validator key handles the rest. Only the
//! checks live here; the relay itself is external.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Upper bound on a submittable score.
pub const MAX_SCORE: u64 = 1_000_000;

/// Minimum game duration, in milliseconds.
pub const MIN_GAME_TIME_MS: u64 = 10_000;

/// A candidate score with its gameplay metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    /// Submitting player.
    pub player: Address,
    /// Claimed score.
    pub score: u64,
    /// Game duration in milliseconds.
    #[serde(rename = "gameTime")]
    pub game_time_ms: u64,
    /// Perfect hits.
    pub perfect: u32,
    /// Good hits.
    pub good: u32,
    /// Misses.
    pub miss: u32,
}

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Score outside `0..=1_000_000`.
    #[error("score out of bounds: {0}")]
    ScoreOutOfBounds(u64),
    /// Game shorter than the 10 second minimum.
    #[error("game time too short: {0}ms (minimum {MIN_GAME_TIME_MS}ms)")]
    GameTooShort(u64),
}

/// Validate a submission, returning the verified score to forward on-chain.
pub fn validate(submission: &ScoreSubmission) -> Result<u64, ValidationError> {
    if submission.score > MAX_SCORE {
        return Err(ValidationError::ScoreOutOfBounds(submission.score));
    }
    if submission.game_time_ms < MIN_GAME_TIME_MS {
        return Err(ValidationError::GameTooShort(submission.game_time_ms));
    }
    Ok(submission.score)
}
