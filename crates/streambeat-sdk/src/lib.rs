#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # StreamBeat SDK
//!
//! Off-chain client core for the StreamBeat rhythm game: live event
//! subscriptions, leaderboard reconciliation with an HTTP fallback snapshot,
//! and score submission validation.
//!
//! Nothing in this crate raises past the public `subscribe` / `reduce` /
//! `fetch_snapshot` / `refresh` boundary uncaught: failures degrade to a
//! self-healing transport, the fallback path, or an explicitly empty result.

/// Error type.
pub mod error;

/// Client configuration.
pub mod config;

/// Leaderboard types and the ranking reducer.
pub mod leaderboard;

/// On-chain read boundary.
pub mod chain;

/// HTTP fallback snapshot source.
pub mod fallback;

/// Leaderboard refresh pipeline.
pub mod client;

/// Live event subscriptions.
pub mod subscription;

/// Score submission validation.
pub mod submit;

pub use crate::{
    chain::ChainReader,
    client::{Client, Leaderboard, RefreshSource},
    config::Config,
    error::Error,
    leaderboard::{reduce, LeaderboardEntry, RankedLeaderboard, UserRank},
    subscription::{PushTransport, StreamFilter, SubscriptionHandle, SubscriptionManager},
};

pub use streambeat_decode as decode;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;
