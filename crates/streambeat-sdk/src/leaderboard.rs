//! Leaderboard types and the ranking reducer.
//!
//! The reducer is pure: given the raw entries from either source it produces a
//! deduplicated, ranked top-N view plus the viewer's rank. Entries are
//! transient and recomputed on every refresh; the contract is authoritative.

use alloy_primitives::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single leaderboard entry, as returned by the on-chain bulk read or the
/// fallback snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player address. Addresses compare byte-wise, so hex casing on the wire
    /// is irrelevant.
    pub player: Address,
    /// Submitted score.
    pub score: u64,
    /// Submission time in unix seconds.
    pub timestamp: u64,
    /// Whether the reward for this entry was claimed.
    #[serde(default)]
    pub claimed: bool,
}

/// An ordered top-N view: at most N entries, one per unique player, score
/// descending with ties broken by later timestamp first.
pub type RankedLeaderboard = Vec<LeaderboardEntry>;

/// The viewer's position in the full ranked set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRank {
    /// 1-based rank.
    pub rank: usize,
    /// The viewer's surviving entry.
    pub entry: LeaderboardEntry,
}

/// Reduce raw entries to a ranked top-N view and the viewer's rank.
///
/// Deduplicates by player: a later entry replaces an earlier one only on a
/// strictly higher score, or an equal score with a later timestamp. The
/// deduplicated set is then stably sorted by score descending, ties broken by
/// timestamp descending, and truncated to `top_n`. The rank lookup runs
/// against the full sorted set before truncation, so a viewer outside the
/// top N still gets a rank.
pub fn reduce(
    entries: impl IntoIterator<Item = LeaderboardEntry>,
    top_n: usize,
    viewer: Option<Address>,
) -> (RankedLeaderboard, Option<UserRank>) {
    // IndexMap keeps first-seen order so the stable sort below preserves it
    // for entries tied on both score and timestamp.
    let mut best: IndexMap<Address, LeaderboardEntry> = IndexMap::new();
    for entry in entries {
        match best.entry(entry.player) {
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            indexmap::map::Entry::Occupied(mut slot) => {
                let current = slot.get();
                let improves = entry.score > current.score
                    || (entry.score == current.score && entry.timestamp > current.timestamp);
                if improves {
                    slot.insert(entry);
                }
            }
        }
    }

    let mut ranked: Vec<LeaderboardEntry> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });

    let user_rank = viewer.and_then(|viewer| {
        ranked
            .iter()
            .position(|entry| entry.player == viewer)
            .map(|index| UserRank {
                rank: index + 1,
                entry: ranked[index],
            })
    });

    ranked.truncate(top_n);
    (ranked, user_rank)
}
