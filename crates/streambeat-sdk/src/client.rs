//! Leaderboard refresh pipeline.
//!
//! A refresh walks `Loading -> { on-chain | fallback | empty }`: try the
//! on-chain bulk read first, fall back to the backend snapshot on any failure,
//! and degrade to an explicitly empty board when both sources are down.
//! [`Client::refresh`] therefore never returns an error, so the UI always has a
//! defined state. Refreshes are idempotent snapshot reads, so concurrent
//! triggers need no mutual exclusion; the last writer wins.

use alloy_primitives::Address;
use tokio::time::timeout;

use crate::{
    chain::ChainReader,
    config::Config,
    fallback::FallbackClient,
    leaderboard::{reduce, LeaderboardEntry, RankedLeaderboard, UserRank},
};

/// Cap on the on-chain bulk read.
pub const MAX_BULK_READ: u64 = 100;

/// Which source produced a refreshed leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSource {
    /// The on-chain bulk read succeeded.
    OnChain,
    /// The on-chain read failed and the backend snapshot was used.
    Fallback,
    /// Both sources failed; the board is explicitly empty.
    Empty,
}

/// A refreshed leaderboard view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    /// Ranked top-N entries.
    pub top: RankedLeaderboard,
    /// The viewer's rank in the full ranked set, when requested and present.
    pub viewer: Option<UserRank>,
    /// Which source produced this view.
    pub source: RefreshSource,
}

/// Leaderboard client tying the on-chain reader and the fallback source
/// together.
#[derive(Debug)]
pub struct Client<R> {
    config: Config,
    chain: R,
    fallback: FallbackClient,
}

impl<R> Client<R> {
    /// Create a client over the given on-chain reader.
    pub fn new(config: Config, chain: R) -> Self {
        let fallback = FallbackClient::new(&config);
        Self {
            config,
            chain,
            fallback,
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The fallback client.
    pub fn fallback(&self) -> &FallbackClient {
        &self.fallback
    }
}

impl<R: ChainReader> Client<R> {
    /// Refresh the leaderboard.
    ///
    /// Tries the on-chain bulk read, then the fallback snapshot, then gives up
    /// with an empty board. Each read is bounded by the configured request
    /// timeout so the caller is never left loading forever.
    pub async fn refresh(&self, top_n: usize, viewer: Option<Address>) -> Leaderboard {
        match self.read_onchain().await {
            Ok(entries) => {
                let (top, viewer) = reduce(entries, top_n, viewer);
                Leaderboard {
                    top,
                    viewer,
                    source: RefreshSource::OnChain,
                }
            }
            Err(error) => {
                tracing::warn!(%error, "on-chain leaderboard read failed, trying fallback");
                match self.read_fallback().await {
                    Ok(entries) => {
                        let (top, viewer) = reduce(entries, top_n, viewer);
                        Leaderboard {
                            top,
                            viewer,
                            source: RefreshSource::Fallback,
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "fallback snapshot failed, presenting empty leaderboard");
                        Leaderboard {
                            top: Vec::new(),
                            viewer: None,
                            source: RefreshSource::Empty,
                        }
                    }
                }
            }
        }
    }

    async fn read_onchain(&self) -> crate::Result<Vec<LeaderboardEntry>> {
        let deadline = self.config.request_timeout;
        let length = timeout(deadline, self.chain.leaderboard_length()).await??;
        if length == 0 {
            // An empty contract leaderboard is a successful read, not a reason
            // to fall back.
            return Ok(Vec::new());
        }
        let count = length.min(MAX_BULK_READ);
        tracing::trace!(length, count, "bulk reading leaderboard");
        timeout(deadline, self.chain.top_players(count)).await?
    }

    async fn read_fallback(&self) -> crate::Result<Vec<LeaderboardEntry>> {
        timeout(self.config.request_timeout, self.fallback.fetch_snapshot()).await?
    }
}
