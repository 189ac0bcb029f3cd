//! Turns generated resume text into a sequence of classified blocks.
//!
//! The generated text is expected (not guaranteed) to mark section headings as
//! `**Heading**` and to write content as `Label: text`. Segmentation splits on the
//! `**` delimiter, strips any remaining asterisks, and classifies each non-empty
//! segment by colon presence. Segments that break the convention (a colon-free
//! body line, a heading with a colon) render with the wrong style; that is
//! accepted best-effort behaviour, not an error.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Emphasis delimiter that separates segments.
pub const SEGMENT_DELIMITER: &str = "**";

const MARKER: char = '*';
const BODY_MARKER: char = ':';

/// A classified, renderable unit of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DocumentBlock {
    Title(String),
    Body(String),
}

impl DocumentBlock {
    pub fn text(&self) -> &str {
        match self {
            DocumentBlock::Title(text) | DocumentBlock::Body(text) => text,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, DocumentBlock::Title(_))
    }
}

/// Removes every asterisk. Asterisks the user typed themselves are lost too.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.contains(MARKER) {
        Cow::Owned(text.replace(MARKER, ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Splits raw text on the emphasis delimiter and sanitizes each segment.
///
/// Segments are returned untrimmed; empty and whitespace-only segments are dropped.
pub fn segment(raw: &str) -> Vec<String> {
    raw.split(SEGMENT_DELIMITER)
        .map(|s| sanitize(s).into_owned())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Colon-free segments are titles, everything else is body text.
pub fn classify(segment: &str) -> DocumentBlock {
    let text = segment.trim().to_string();
    if segment.contains(BODY_MARKER) {
        DocumentBlock::Body(text)
    } else {
        DocumentBlock::Title(text)
    }
}

/// Full text → block pipeline: segment, then classify, preserving order.
pub fn parse_blocks(raw: &str) -> Vec<DocumentBlock> {
    segment(raw).iter().map(|s| classify(s)).collect()
}
