//! Positioned text fragments and reconstructed table rows.
//!
//! A [`TextFragment`] is one positioned text run taken from a page's content
//! stream: the literal string plus the x offset and baseline y from its
//! transform. Fragments are ephemeral; they exist only while the layout of
//! one page is being reconstructed.
//!
//! A [`Row`] is the reconstructed unit: the ordered list of trimmed,
//! non-empty cell strings sharing one baseline, left to right.

use serde::{Deserialize, Serialize};

/// One positioned text run from a page's content stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Literal string content (untrimmed)
    pub text: String,

    /// Horizontal offset from the page's left edge
    pub x: f64,

    /// Baseline y coordinate (PDF convention: larger y = higher on page)
    pub y: f64,
}

impl TextFragment {
    /// Create a new fragment
    #[inline]
    #[must_use = "creates a fragment that should be grouped into rows"]
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Ordered list of non-empty cell strings reconstructed from one baseline
pub type Row = Vec<String>;

/// Join a row's cells into a single trimmed string.
///
/// Row classification operates on this joined form so that detail lines
/// wrapped across multiple cells still match as one token stream.
#[must_use = "returns the joined cell text used for row classification"]
pub fn joined_text(row: &Row) -> String {
    row.join(" ").trim().to_string()
}
