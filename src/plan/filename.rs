//! Screenshot Filename Generation
//!
//! Filenames have the shape
//! `{index}{sep}{page}{sep}{section}{sep}{lang}[{sep}{millis}].{ext}`.
//! The item index is always present, so two items of one run never share a
//! name; the optional timestamp keeps repeated runs apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowItem;

/// What is appended to keep filenames apart across runs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Disambiguator {
    /// Item index only (deterministic output)
    #[default]
    Index,
    /// Item index plus the compile time in epoch milliseconds
    Timestamp,
}

/// Filename composition rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FilenamePolicy {
    pub separator: String,
    pub disambiguator: Disambiguator,
    pub extension: String,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            disambiguator: Disambiguator::Index,
            extension: "png".to_string(),
        }
    }
}

impl FilenamePolicy {
    /// Builds the screenshot filename for an item.
    pub fn filename(
        &self,
        item: &WorkflowItem,
        language_code: &str,
        compiled_at: DateTime<Utc>,
    ) -> String {
        let sep = self.separator.as_str();
        let mut parts = vec![item.index.to_string()];

        for token in [item.page.as_str(), item.section.as_str(), language_code] {
            let normalized = normalize(token, sep);
            if !normalized.is_empty() {
                parts.push(normalized);
            }
        }

        if self.disambiguator == Disambiguator::Timestamp {
            parts.push(compiled_at.timestamp_millis().to_string());
        }

        format!("{}.{}", parts.join(sep), self.extension.trim_start_matches('.'))
    }
}

/// Lower-cases a label and makes it filename-safe.
///
/// Whitespace and slashes become `separator`, other punctuation is dropped,
/// and runs of separators collapse into one.
pub fn normalize(label: &str, separator: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            pending_separator = true;
        } else if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
            if pending_separator && !out.is_empty() {
                out.push_str(separator);
            }
            pending_separator = false;
            out.push(c);
        }
    }

    out
}
