//! Rewards-contract event signatures and topic0 hashes.
//!
//! The hashes are pre-computed keccak256 digests of the canonical event
//! signatures, used both to build subscription filters and to verify the
//! signature topic of raw logs. [`verify_topic_hashes`] recomputes them at
//! runtime to catch signature drift.

use alloy_primitives::{b256, B256};

/// keccak256("ScoreSubmitted(address,uint256,uint256)")
pub const SCORE_SUBMITTED_TOPIC: B256 =
    b256!("b7f20d0949b6a8bc59d005af4a52f7ff5d0cfcde9056fa556adb0e4b24dcb6d2");

/// keccak256("PrizePoolUpdated(uint256)")
pub const PRIZE_POOL_UPDATED_TOPIC: B256 =
    b256!("7bc22304ac771f50d6cc29b56387cb4855f284e7a1f83e6420fe9b8bbdaf45c9");

/// keccak256("RewardsDistributed(address,uint256)")
pub const REWARDS_DISTRIBUTED_TOPIC: B256 =
    b256!("df29796aad820e4bb192f3a8d631b76519bcd2cbe77cc85af20e9df53cece086");

/// Compute the keccak256 hash of a byte slice.
pub fn keccak256(data: &[u8]) -> B256 {
    use tiny_keccak::{Hasher, Keccak};
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    B256::from(output)
}

/// Recompute every topic0 constant from its signature and report mismatches.
pub fn verify_topic_hashes() -> Vec<(&'static str, bool)> {
    crate::events::EventKind::ALL
        .iter()
        .map(|kind| {
            let signature = kind.signature();
            (signature, keccak256(signature.as_bytes()) == kind.topic0())
        })
        .collect()
}
