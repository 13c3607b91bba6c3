use alloy_primitives::B256;

/// Error type for event decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload does not carry the expected indexed topic.
    #[error("missing topic at index {0}")]
    MissingTopic(usize),
    /// The signature topic does not match the event kind being decoded.
    #[error("topic0 mismatch: expected {expected}, found {found}")]
    TopicMismatch {
        /// The signature hash of the event kind being decoded.
        expected: B256,
        /// The signature hash carried by the payload.
        found: B256,
    },
    /// The data blob is too short for the expected number of 32-byte words.
    #[error("short data: expected {expected} words, found {found}")]
    ShortData {
        /// Expected word count.
        expected: usize,
        /// Complete words present in the payload.
        found: usize,
    },
    /// A required pre-decoded field is absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// A pre-decoded field carries a value of the wrong type.
    #[error("field `{0}` has an unexpected value type")]
    InvalidFieldType(&'static str),
}
