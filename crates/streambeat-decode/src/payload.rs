//! Wire shapes delivered by the push transport.
//!
//! Depending on the delivery mode, a notification carries either a raw log
//! (indexed parameters in `topics`, the rest packed into `data`) or a list of
//! `{name, value}` fields pre-decoded by the streaming SDK. [`EventPayload`] is
//! the tagged union over both; decoders branch on the variant explicitly.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// A raw, undecoded event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// `topics[0]` is the event signature hash; indexed parameters follow.
    pub topics: Vec<B256>,
    /// Non-indexed parameters, packed sequentially as 32-byte big-endian words.
    #[serde(default)]
    pub data: Bytes,
}

impl RawLog {
    /// Topic slot at `index` (`0` is the signature hash).
    pub fn topic(&self, index: usize) -> Result<B256, DecodeError> {
        self.topics
            .get(index)
            .copied()
            .ok_or(DecodeError::MissingTopic(index))
    }

    /// Address carried by the topic at `index`: the low 20 bytes of the slot.
    pub fn address_topic(&self, index: usize) -> Result<Address, DecodeError> {
        Ok(Address::from_word(self.topic(index)?))
    }

    /// The `index`-th 32-byte big-endian word of `data`.
    pub fn word(&self, index: usize) -> Result<U256, DecodeError> {
        let start = index * 32;
        let end = start + 32;
        let slice = self
            .data
            .get(start..end)
            .ok_or(DecodeError::ShortData {
                expected: index + 1,
                found: self.words(),
            })?;
        Ok(U256::from_be_slice(slice))
    }

    /// Number of complete data words.
    pub fn words(&self) -> usize {
        self.data.len() / 32
    }
}

/// A single pre-decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Parameter name as declared in the event schema.
    pub name: String,
    /// Parameter value.
    pub value: FieldValue,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Value shapes the streaming SDK delivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A 20-byte account address.
    Address(Address),
    /// An unsigned 256-bit integer.
    Uint(U256),
    /// An uninterpreted string.
    Text(String),
}

impl FieldValue {
    /// The address carried by this value, if any. Text values are re-parsed
    /// since some transports stringify addresses.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            Self::Text(text) => text.parse().ok(),
            Self::Uint(_) => None,
        }
    }

    /// The integer carried by this value, if any.
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            Self::Text(text) => text.parse().ok(),
            Self::Address(_) => None,
        }
    }

    /// The integer carried by this value, saturated to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.as_uint().map(|value| value.saturating_to())
    }
}

/// Tagged union over the two delivery modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    /// A raw log requiring manual slicing.
    RawLog(RawLog),
    /// A field list pre-decoded by the streaming SDK.
    DecodedFields(Vec<Field>),
}

impl EventPayload {
    /// Look a pre-decoded field up by name. Always `None` for raw logs.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        match self {
            Self::RawLog(_) => None,
            Self::DecodedFields(fields) => fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| &field.value),
        }
    }
}

impl From<RawLog> for EventPayload {
    fn from(log: RawLog) -> Self {
        Self::RawLog(log)
    }
}

impl From<Vec<Field>> for EventPayload {
    fn from(fields: Vec<Field>) -> Self {
        Self::DecodedFields(fields)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn word_slicing_is_big_endian() {
        let log = RawLog {
            topics: vec![B256::ZERO],
            data: Bytes::from_iter(
                U256::from(1234u64)
                    .to_be_bytes::<32>()
                    .into_iter()
                    .chain(U256::from(5678u64).to_be_bytes::<32>()),
            ),
        };
        assert_eq!(log.words(), 2);
        assert_eq!(log.word(0).unwrap(), U256::from(1234u64));
        assert_eq!(log.word(1).unwrap(), U256::from(5678u64));
        assert!(matches!(
            log.word(2),
            Err(DecodeError::ShortData {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn payload_json_shapes() {
        // Raw logs arrive as an object, pre-decoded payloads as a field array.
        let raw: EventPayload = serde_json::from_str(
            r#"{"topics":["0x0000000000000000000000000000000000000000000000000000000000000000"],"data":"0x"}"#,
        )
        .unwrap();
        assert!(matches!(raw, EventPayload::RawLog(_)));

        let fields: EventPayload = serde_json::from_str(
            r#"[{"name":"player","value":"0x00000000000000000000000000000000000000ff"}]"#,
        )
        .unwrap();
        assert_eq!(
            fields.field("player").and_then(FieldValue::as_address),
            Some(address!("00000000000000000000000000000000000000ff")),
        );
    }
}
