#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # StreamBeat Decode
//!
//! Typed decoding of StreamBeat rewards-contract events. Push payloads arrive either
//! as raw logs (`topics` + `data`) or as field lists pre-decoded by the streaming
//! SDK; both shapes decode into the same [`StreamEvent`](events::StreamEvent) type.

/// Error type.
pub mod error;

/// Event signatures and topic hashes.
pub mod topics;

/// Wire payload shapes.
pub mod payload;

/// Typed events and their decoders.
pub mod events;

pub use crate::{
    error::DecodeError,
    events::{decode, decode_or_placeholder, EventKind, ScoreEvent, StreamEvent},
    payload::{EventPayload, Field, FieldValue, RawLog},
};

pub use alloy_primitives;
