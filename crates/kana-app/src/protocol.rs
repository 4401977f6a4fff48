//! Wire protocol between the UI and the host process.
//!
//! Every message is one JSON object tagged by a single top-level key, for
//! example `{"Submit":{"text":"neko","elapsed_ms":1234}}`. Messages without
//! a payload carry `null`: `{"Init":null}`.
//!
//! Outbound messages are [`Intent`]s, inbound messages are [`HostMessage`]s.
//! The public enums are decoupled from their wire shape through private
//! `Wire*` mirrors so the unit variants stay unit variants in Rust.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};

use crate::{DiffRender, ProtocolError, diff::render_diff};

/// Session page as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    /// Lesson selection menu.
    Start,
    /// A drill is in progress.
    Training,
    /// The drill finished; results are shown.
    Summary,
}

/// One alignment operation between the expected and the submitted answer.
///
/// Produced by the host. Order is significant: a diff is consumed
/// left-to-right exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOp {
    /// Text present identically in both answers.
    Same(String),
    /// Text the user omitted.
    Delete(String),
    /// Text aligned to an expected token and rendered as an addition.
    Insert(String),
    /// Submitted text (first) standing where the expected text (second) was.
    Change(String, String),
}

/// Grading of the answer the user just submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedResult {
    /// Whether the submitted answer matched.
    pub is_match: bool,
    /// Edit script between expected and submitted transcriptions.
    #[serde(default)]
    pub diff: Vec<EditOp>,
    /// Expected word split into orthographic units (kana groups).
    #[serde(default)]
    pub split: Vec<String>,
}

impl SubmittedResult {
    /// Align the diff against the split.
    pub fn render(&self) -> DiffRender {
        render_diff(&self.diff, &self.split)
    }
}

/// Full host-pushed state. Replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current page.
    pub page: Page,
    /// Lesson-set selector (opaque to the UI).
    #[serde(default)]
    pub set: String,
    /// Word to type.
    #[serde(default)]
    pub word: String,
    /// Correct answers so far.
    #[serde(default)]
    pub hits: u32,
    /// Wrong answers so far.
    #[serde(default)]
    pub misses: u32,
    /// Words left in the drill.
    #[serde(default)]
    pub remaining: u32,
    /// Total characters in the drill.
    #[serde(default)]
    pub chars_total: u32,
    /// Characters answered so far.
    #[serde(default)]
    pub chars_done: u32,
    /// Answer time reported by the host, in milliseconds.
    #[serde(default)]
    pub answer_time_ms: u64,
    /// Result of the answer that was just graded, if any.
    #[serde(default)]
    pub submitted: Option<SubmittedResult>,
}

impl Snapshot {
    /// Empty snapshot on the given page.
    pub fn new(page: Page) -> Self {
        Self {
            page,
            set: String::new(),
            word: String::new(),
            hits: 0,
            misses: 0,
            remaining: 0,
            chars_total: 0,
            chars_done: 0,
            answer_time_ms: 0,
            submitted: None,
        }
    }
}

/// Outbound message from the UI to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Sent once at startup before any snapshot exists.
    Init,
    /// Start a drill. `size == 0` means all available items.
    Start {
        /// Lesson-set selector.
        set: String,
        /// Number of words.
        size: u32,
    },
    /// Return to the start page.
    Restart,
    /// Submit an answer.
    Submit {
        /// Answer text as typed.
        text: String,
        /// Time spent on the answer.
        elapsed_ms: u64,
    },
    /// Ask the host to reload UI resources.
    Refresh,
    /// Diagnostic output from the view layer.
    Console(String),
    /// Diagnostic error output from the view layer.
    Error(String),
}

const INTENT_TAGS: &[&str] = &["Init", "Start", "Restart", "Submit", "Refresh", "Console", "Error"];

impl Intent {
    /// Encode as a single JSON line (without the trailing newline).
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON line produced by [`Intent::encode`].
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        decode_tagged(raw, INTENT_TAGS)
    }
}

/// Inbound message from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    /// Reload the whole view.
    Refresh,
    /// Replace all session state with this snapshot.
    Update(Snapshot),
}

const HOST_TAGS: &[&str] = &["Refresh", "Update"];

impl HostMessage {
    /// Encode as a single JSON line (without the trailing newline).
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and shape-check one inbound line.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        decode_tagged(raw, HOST_TAGS)
    }
}

fn decode_tagged<T: DeserializeOwned>(raw: &str, tags: &[&str]) -> Result<T, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Object(object) = &value else {
        return Err(ProtocolError::NotAnObject);
    };

    let tag = match object.keys().collect::<Vec<_>>().as_slice() {
        [tag] => (*tag).clone(),
        keys => return Err(ProtocolError::TagCount(keys.len())),
    };
    if !tags.contains(&tag.as_str()) {
        return Err(ProtocolError::UnknownTag(tag));
    }

    serde_json::from_value(value).map_err(|source| ProtocolError::InvalidPayload { tag, source })
}

/// `null` payload of unit messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Null;

#[derive(Serialize, Deserialize)]
enum WireIntent<'a> {
    Init(Null),
    Start { set: Cow<'a, str>, size: u32 },
    Restart(Null),
    Submit { text: Cow<'a, str>, elapsed_ms: u64 },
    Refresh(Null),
    Console(Cow<'a, str>),
    Error(Cow<'a, str>),
}

impl<'a> From<&'a Intent> for WireIntent<'a> {
    fn from(intent: &'a Intent) -> Self {
        match intent {
            Intent::Init => Self::Init(Null),
            Intent::Start { set, size } => Self::Start { set: Cow::Borrowed(set), size: *size },
            Intent::Restart => Self::Restart(Null),
            Intent::Submit { text, elapsed_ms } => {
                Self::Submit { text: Cow::Borrowed(text), elapsed_ms: *elapsed_ms }
            },
            Intent::Refresh => Self::Refresh(Null),
            Intent::Console(text) => Self::Console(Cow::Borrowed(text)),
            Intent::Error(text) => Self::Error(Cow::Borrowed(text)),
        }
    }
}

impl From<WireIntent<'_>> for Intent {
    fn from(wire: WireIntent<'_>) -> Self {
        match wire {
            WireIntent::Init(Null) => Self::Init,
            WireIntent::Start { set, size } => Self::Start { set: set.into_owned(), size },
            WireIntent::Restart(Null) => Self::Restart,
            WireIntent::Submit { text, elapsed_ms } => {
                Self::Submit { text: text.into_owned(), elapsed_ms }
            },
            WireIntent::Refresh(Null) => Self::Refresh,
            WireIntent::Console(text) => Self::Console(text.into_owned()),
            WireIntent::Error(text) => Self::Error(text.into_owned()),
        }
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireIntent::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireIntent::<'static>::deserialize(deserializer).map(Self::from)
    }
}

#[derive(Serialize, Deserialize)]
enum WireHostMessage<'a> {
    Refresh(Null),
    Update(Cow<'a, Snapshot>),
}

impl Serialize for HostMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Refresh => WireHostMessage::Refresh(Null),
            Self::Update(snapshot) => WireHostMessage::Update(Cow::Borrowed(snapshot)),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HostMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireHostMessage::<'static>::deserialize(deserializer)? {
            WireHostMessage::Refresh(Null) => Self::Refresh,
            WireHostMessage::Update(snapshot) => Self::Update(snapshot.into_owned()),
        })
    }
}
