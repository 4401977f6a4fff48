//! Answer diff alignment.
//!
//! The host grades an answer and returns an edit script between the expected
//! and submitted transcriptions, together with the expected word split into
//! kana groups. [`render_diff`] walks the script once, left to right, with a
//! cursor into the split, and produces three parallel highlighted texts:
//!
//! - `kana`: the expected word, one split token per consuming operation
//! - `expected`: the expected transcription
//! - `submitted`: what the user typed
//!
//! `Same`, `Insert` and `Change` consume one split token each. `Delete`
//! consumes none.

use std::fmt;

use crate::EditOp;

/// Highlight class of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Matched text.
    #[default]
    Plain,
    /// Text the user omitted.
    Deleted,
    /// Text aligned by an `Insert` operation.
    Inserted,
    /// Text that differs between expected and submitted.
    Changed,
}

impl Highlight {
    fn markup_prefix(self) -> Option<char> {
        match self {
            Self::Plain => None,
            Self::Deleted => Some('-'),
            Self::Inserted => Some('+'),
            Self::Changed => Some('~'),
        }
    }
}

/// A run of text sharing one highlight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// Span text. Never empty.
    pub text: String,
    /// Highlight class.
    pub style: Highlight,
}

/// Sequence of highlighted spans.
///
/// Adjacent pushes with the same highlight are merged into one span, so two
/// texts with the same characters and highlights compare equal regardless of
/// how they were assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyledText {
    spans: Vec<Span>,
}

impl StyledText {
    /// Create an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` with the given highlight. Empty text is dropped.
    pub fn push(&mut self, text: &str, style: Highlight) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span { text: text.to_owned(), style }),
        }
    }

    /// Spans in order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether no text has been appended.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated text without highlighting.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Compact textual form for tests and debug logs: plain text as-is,
    /// highlighted runs as `[-x]` (deleted), `[+x]` (inserted) and `[~x]`
    /// (changed). Brackets inside span text are not escaped, so the form is
    /// not reversible.
    pub fn markup(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            match span.style.markup_prefix() {
                Some(prefix) => write!(f, "[{prefix}{}]", span.text)?,
                None => f.write_str(&span.text)?,
            }
        }
        Ok(())
    }
}

/// Disagreement between the number of consuming operations and split tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitMismatch {
    /// Split tokens the diff tried to consume.
    pub consumed: usize,
    /// Split tokens actually provided.
    pub available: usize,
}

impl fmt::Display for SplitMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "diff consumes {} split tokens but {} were provided",
            self.consumed, self.available
        )
    }
}

/// Output of [`render_diff`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DiffRender {
    /// Expected word in kana.
    pub kana: StyledText,
    /// Expected transcription.
    pub expected: StyledText,
    /// Submitted transcription.
    pub submitted: StyledText,
    /// Set when the diff and split disagree; the texts are then partial.
    pub mismatch: Option<SplitMismatch>,
}

/// Align `diff` against `split`.
///
/// Pure and total: a diff that consumes more tokens than `split` provides
/// stops contributing to `kana` once the split runs out but keeps filling
/// `expected` and `submitted`.
pub fn render_diff<S: AsRef<str>>(diff: &[EditOp], split: &[S]) -> DiffRender {
    let mut render = DiffRender::default();
    let mut consumed = 0;

    let mut take_kana = |kana: &mut StyledText, style: Highlight| {
        if let Some(token) = split.get(consumed) {
            kana.push(token.as_ref(), style);
        }
        consumed += 1;
    };

    for op in diff {
        match op {
            EditOp::Same(text) => {
                take_kana(&mut render.kana, Highlight::Plain);
                render.expected.push(text, Highlight::Plain);
                render.submitted.push(text, Highlight::Plain);
            },
            EditOp::Delete(text) => {
                render.expected.push(text, Highlight::Deleted);
            },
            EditOp::Insert(text) => {
                take_kana(&mut render.kana, Highlight::Inserted);
                render.expected.push(text, Highlight::Inserted);
                render.submitted.push(text, Highlight::Inserted);
            },
            EditOp::Change(from, to) => {
                take_kana(&mut render.kana, Highlight::Changed);
                render.expected.push(to, Highlight::Changed);
                render.submitted.push(from, Highlight::Changed);
            },
        }
    }

    if consumed != split.len() {
        render.mismatch = Some(SplitMismatch { consumed, available: split.len() });
    }
    render
}
