//! Typed rewards-contract events.
//!
//! [`decode`] is the strict decoder. The subscription path goes through
//! [`decode_or_placeholder`] instead: a malformed payload is logged and
//! downgraded to a best-effort placeholder so the refresh signal still fires;
//! decoding never fails past this module's boundary.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    error::DecodeError,
    payload::{EventPayload, FieldValue, RawLog},
    topics,
};

/// Kinds of events emitted by the rewards contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A player submitted a score.
    ScoreSubmitted,
    /// The prize pool balance changed.
    PrizePoolUpdated,
    /// A reward payout was made.
    RewardsDistributed,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [Self; 3] = [
        Self::ScoreSubmitted,
        Self::PrizePoolUpdated,
        Self::RewardsDistributed,
    ];

    /// Canonical event signature.
    pub const fn signature(self) -> &'static str {
        match self {
            Self::ScoreSubmitted => "ScoreSubmitted(address,uint256,uint256)",
            Self::PrizePoolUpdated => "PrizePoolUpdated(uint256)",
            Self::RewardsDistributed => "RewardsDistributed(address,uint256)",
        }
    }

    /// keccak256 of [`signature`](Self::signature), the log filter topic.
    pub const fn topic0(self) -> B256 {
        match self {
            Self::ScoreSubmitted => topics::SCORE_SUBMITTED_TOPIC,
            Self::PrizePoolUpdated => topics::PRIZE_POOL_UPDATED_TOPIC,
            Self::RewardsDistributed => topics::REWARDS_DISTRIBUTED_TOPIC,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ScoreSubmitted => "ScoreSubmitted",
            Self::PrizePoolUpdated => "PrizePoolUpdated",
            Self::RewardsDistributed => "RewardsDistributed",
        };
        f.write_str(name)
    }
}

/// A decoded score submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Submitting player.
    pub player: Address,
    /// Submitted score. `0` when the payload carried only the player address.
    pub score: u64,
    /// Submission time in unix seconds.
    pub timestamp: u64,
}

impl ScoreEvent {
    /// Whether this event carries no authoritative score and should be treated
    /// purely as a refresh signal.
    pub fn is_placeholder(&self) -> bool {
        self.score == 0
    }
}

/// A typed event decoded from a push payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEvent {
    /// A player submitted a score.
    ScoreSubmitted(ScoreEvent),
    /// The prize pool balance changed.
    PrizePoolUpdated {
        /// New pool balance, in wei.
        amount: U256,
    },
    /// A reward payout was made.
    RewardsDistributed {
        /// Receiving player.
        player: Address,
        /// Paid amount, in wei.
        amount: U256,
    },
}

impl StreamEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ScoreSubmitted(_) => EventKind::ScoreSubmitted,
            Self::PrizePoolUpdated { .. } => EventKind::PrizePoolUpdated,
            Self::RewardsDistributed { .. } => EventKind::RewardsDistributed,
        }
    }
}

/// Decode a push payload into a typed event.
pub fn decode(kind: EventKind, payload: &EventPayload) -> Result<StreamEvent, DecodeError> {
    match payload {
        EventPayload::RawLog(log) => decode_raw(kind, log),
        EventPayload::DecodedFields(_) => decode_fields(kind, payload),
    }
}

/// Decode a push payload, downgrading any failure to a placeholder event.
///
/// This is the total variant used on the subscription path: the error is logged
/// and the placeholder still signals "something changed, refresh".
pub fn decode_or_placeholder(kind: EventKind, payload: &EventPayload) -> StreamEvent {
    match decode(kind, payload) {
        Ok(event) => event,
        Err(error) => {
            tracing::warn!(%kind, %error, "malformed event payload, emitting placeholder");
            placeholder(kind, payload)
        }
    }
}

fn decode_raw(kind: EventKind, log: &RawLog) -> Result<StreamEvent, DecodeError> {
    // The transport filters by topic0 already; verify when present but tolerate
    // payloads that strip it.
    if let Some(found) = log.topics.first().copied() {
        if found != kind.topic0() {
            return Err(DecodeError::TopicMismatch {
                expected: kind.topic0(),
                found,
            });
        }
    }

    match kind {
        EventKind::ScoreSubmitted => {
            let player = log.address_topic(1)?;
            // Player-only variant: an empty data blob means this is a bare
            // refresh signal, not a decode failure.
            if log.data.is_empty() {
                return Ok(StreamEvent::ScoreSubmitted(ScoreEvent {
                    player,
                    score: 0,
                    timestamp: now_seconds(),
                }));
            }
            Ok(StreamEvent::ScoreSubmitted(ScoreEvent {
                player,
                score: log.word(0)?.saturating_to(),
                timestamp: log.word(1)?.saturating_to(),
            }))
        }
        EventKind::PrizePoolUpdated => Ok(StreamEvent::PrizePoolUpdated {
            amount: log.word(0)?,
        }),
        EventKind::RewardsDistributed => Ok(StreamEvent::RewardsDistributed {
            player: log.address_topic(1)?,
            amount: log.word(0)?,
        }),
    }
}

fn decode_fields(kind: EventKind, payload: &EventPayload) -> Result<StreamEvent, DecodeError> {
    match kind {
        EventKind::ScoreSubmitted => Ok(StreamEvent::ScoreSubmitted(ScoreEvent {
            player: required_address(payload, "player")?,
            // The registered push schema indexes only the player; score and
            // timestamp are present only in the contract-event shape.
            score: optional_u64(payload, "score")?.unwrap_or(0),
            timestamp: optional_u64(payload, "timestamp")?.unwrap_or_else(now_seconds),
        })),
        EventKind::PrizePoolUpdated => {
            let amount = payload
                .field("amount")
                .or_else(|| payload.field("newAmount"))
                .ok_or(DecodeError::MissingField("amount"))?
                .as_uint()
                .ok_or(DecodeError::InvalidFieldType("amount"))?;
            Ok(StreamEvent::PrizePoolUpdated { amount })
        }
        EventKind::RewardsDistributed => Ok(StreamEvent::RewardsDistributed {
            player: required_address(payload, "player")?,
            amount: payload
                .field("amount")
                .ok_or(DecodeError::MissingField("amount"))?
                .as_uint()
                .ok_or(DecodeError::InvalidFieldType("amount"))?,
        }),
    }
}

fn required_address(payload: &EventPayload, name: &'static str) -> Result<Address, DecodeError> {
    payload
        .field(name)
        .ok_or(DecodeError::MissingField(name))?
        .as_address()
        .ok_or(DecodeError::InvalidFieldType(name))
}

fn optional_u64(payload: &EventPayload, name: &'static str) -> Result<Option<u64>, DecodeError> {
    match payload.field(name) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or(DecodeError::InvalidFieldType(name)),
    }
}

fn placeholder(kind: EventKind, payload: &EventPayload) -> StreamEvent {
    let player = best_effort_player(payload);
    match kind {
        EventKind::ScoreSubmitted => StreamEvent::ScoreSubmitted(ScoreEvent {
            player,
            score: 0,
            timestamp: now_seconds(),
        }),
        EventKind::PrizePoolUpdated => StreamEvent::PrizePoolUpdated {
            amount: U256::ZERO,
        },
        EventKind::RewardsDistributed => StreamEvent::RewardsDistributed {
            player,
            amount: U256::ZERO,
        },
    }
}

fn best_effort_player(payload: &EventPayload) -> Address {
    match payload {
        EventPayload::RawLog(log) => log.address_topic(1).unwrap_or_default(),
        EventPayload::DecodedFields(_) => payload
            .field("player")
            .and_then(FieldValue::as_address)
            .unwrap_or_default(),
    }
}

fn now_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
