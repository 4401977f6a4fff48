//! Protocol error types.

use thiserror::Error;

/// Errors produced while decoding or encoding host messages.
///
/// None of these are fatal: the session logs them and keeps its state.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The line is not valid JSON, or a value could not be serialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The message is valid JSON but not an object.
    #[error("message is not a JSON object")]
    NotAnObject,

    /// The message object must carry exactly one tag key.
    #[error("expected exactly one message tag, found {0}")]
    TagCount(usize),

    /// The tag key is not a known message.
    #[error("unknown message tag {0:?}")]
    UnknownTag(String),

    /// The tag is known but its payload has the wrong shape.
    #[error("invalid {tag} payload: {source}")]
    InvalidPayload {
        /// Tag key of the rejected message.
        tag: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}
