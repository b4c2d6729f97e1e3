//! Workflow Data Model
//!
//! A workflow is the flat, ordered list of string checks read from a
//! translation review sheet.
//!
//! # Example CSV Format
//!
//! ```text
//! Screen/Page,Section,String,Language,Misc
//! Auth,Login Form,Sign In,Spanish,button only
//! Dashboard,Glucose Chart,Average,French,tooltip
//! Landing,Hero,Welcome,German,highlight all instances of string
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One row of the review sheet: a single string to locate and highlight.
///
/// Items are immutable once loaded. `index` is the 1-based position of the
/// row in the source file and is kept even when earlier rows were skipped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkflowItem {
    /// 1-based row position in the source file
    pub index: usize,

    /// Logical screen label (e.g., "Landing", "Auth", "Dashboard")
    pub page: String,

    /// Sub-area of the page the string lives in
    pub section: String,

    /// Literal text to locate
    #[serde(rename = "string")]
    pub target_string: String,

    /// Human-readable language name (e.g., "Spanish")
    pub language: String,

    /// Free-text highlighting instruction (the sheet's "Misc" column)
    pub hint: String,
}

impl WorkflowItem {
    /// Creates a new item, trimming every field.
    ///
    /// # Example
    ///
    /// ```
    /// use shotplan::workflow::WorkflowItem;
    ///
    /// let item = WorkflowItem::new(1, "Auth", " Login Form ", "Sign In", "Spanish")
    ///     .with_hint("button only");
    /// assert_eq!(item.section, "Login Form");
    /// ```
    pub fn new(
        index: usize,
        page: impl Into<String>,
        section: impl Into<String>,
        target_string: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            index,
            page: page.into().trim().to_string(),
            section: section.into().trim().to_string(),
            target_string: target_string.into().trim().to_string(),
            language: language.into().trim().to_string(),
            hint: String::new(),
        }
    }

    /// Sets the highlighting hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into().trim().to_string();
        self
    }

    /// One-line description used in logs and CLI listings.
    pub fn describe(&self) -> String {
        format!(
            "{}: {} -> {} -> '{}' ({})",
            self.index, self.page, self.section, self.target_string, self.language
        )
    }
}

/// Unique language names across items, sorted.
pub fn languages_needed(items: &[WorkflowItem]) -> Vec<String> {
    items
        .iter()
        .map(|i| i.language.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Unique page labels across items, sorted.
pub fn pages_needed(items: &[WorkflowItem]) -> Vec<String> {
    items
        .iter()
        .map(|i| i.page.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_creation_trims_fields() {
        let item = WorkflowItem::new(3, "  Auth ", "Login Form\t", " Sign In ", "Spanish ")
            .with_hint("  button only ");

        assert_eq!(item.index, 3);
        assert_eq!(item.page, "Auth");
        assert_eq!(item.section, "Login Form");
        assert_eq!(item.target_string, "Sign In");
        assert_eq!(item.language, "Spanish");
        assert_eq!(item.hint, "button only");
    }

    #[test]
    fn test_item_default_hint_empty() {
        let item = WorkflowItem::new(1, "Landing", "Hero", "Welcome", "German");
        assert!(item.hint.is_empty());
    }

    #[test]
    fn test_item_describe() {
        let item = WorkflowItem::new(2, "Dashboard", "Chart", "Average", "French");
        assert_eq!(item.describe(), "2: Dashboard -> Chart -> 'Average' (French)");
    }

    #[test]
    fn test_item_serializes_string_field() {
        let item = WorkflowItem::new(1, "Auth", "Form", "Sign In", "Spanish");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["string"], "Sign In");
        assert!(json.get("target_string").is_none());
    }

    #[test]
    fn test_languages_and_pages_needed_are_sorted_unique() {
        let items = vec![
            WorkflowItem::new(1, "Dashboard", "A", "x", "Spanish"),
            WorkflowItem::new(2, "Auth", "B", "y", "French"),
            WorkflowItem::new(3, "Dashboard", "C", "z", "Spanish"),
        ];

        assert_eq!(languages_needed(&items), vec!["French", "Spanish"]);
        assert_eq!(pages_needed(&items), vec!["Auth", "Dashboard"]);
    }

    #[test]
    fn test_needed_lists_empty() {
        assert!(languages_needed(&[]).is_empty());
        assert!(pages_needed(&[]).is_empty());
    }
}
