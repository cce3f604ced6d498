// ABOUTME: Immutable clipboard entry model with derived preview text
// ABOUTME: Preview is computed once at construction and never mutated afterwards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of visible characters in a preview before truncation.
const PREVIEW_MAX_CHARS: usize = 80;

/// One captured clipboard snapshot. `content` and `preview` are fixed for
/// the lifetime of the entry; `preview` is a pure function of `content`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClipEntry {
    pub id: Uuid,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub preview: String,
}

impl ClipEntry {
    pub fn new(content: String) -> Self {
        let preview = make_preview(&content);
        Self {
            id: Uuid::new_v4(),
            content,
            timestamp: Utc::now(),
            preview,
        }
    }

    /// Preview text suitable for a single-line list cell.
    pub fn display_text(&self) -> &str {
        if self.preview.is_empty() {
            "(Empty)"
        } else {
            &self.preview
        }
    }
}

/// Collapses whitespace runs (including newlines and tabs) to single spaces
/// and truncates to at most 80 visible characters, appending an ellipsis
/// when anything was cut off.
fn make_preview(content: &str) -> String {
    let cleaned = content.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() > PREVIEW_MAX_CHARS {
        let truncated: String = cleaned.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
