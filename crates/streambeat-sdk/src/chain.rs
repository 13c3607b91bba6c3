//! On-chain read boundary.
//!
//! The rewards contract exposes two read-only calls: the total entry count and
//! a bulk read of the top entries. The concrete JSON-RPC plumbing lives behind
//! this trait; the refresh pipeline only cares that failures surface as
//! [`Error::Read`](crate::Error::Read) so it can fall back.

use std::future::Future;

use crate::leaderboard::LeaderboardEntry;

/// Read-only access to the rewards contract leaderboard.
pub trait ChainReader {
    /// Total number of leaderboard entries stored on chain.
    fn leaderboard_length(&self) -> impl Future<Output = crate::Result<u64>> + Send;

    /// The top `count` leaderboard entries, unranked and possibly containing
    /// multiple entries per player.
    fn top_players(
        &self,
        count: u64,
    ) -> impl Future<Output = crate::Result<Vec<LeaderboardEntry>>> + Send;
}
