//! Workflow Item Validation
//!
//! Checks that an item carries enough information to compile into a step:
//! - Non-empty page and target string
//! - Unique row index within one compile run

use std::collections::HashSet;

use log::{debug, warn};

use super::model::WorkflowItem;

/// Problems that keep an item out of the execution plan.
///
/// Every variant names the offending item index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTargetString { index: usize },
    EmptyPage { index: usize },
    DuplicateIndex { index: usize },
}

impl ValidationError {
    /// Index of the item the error refers to.
    pub fn index(&self) -> usize {
        match self {
            Self::EmptyTargetString { index }
            | Self::EmptyPage { index }
            | Self::DuplicateIndex { index } => *index,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTargetString { index } => {
                write!(f, "Item {} has an empty target string", index)
            }
            Self::EmptyPage { index } => write!(f, "Item {} has no page", index),
            Self::DuplicateIndex { index } => {
                write!(f, "Item index {} appears more than once", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a single item's fields.
pub fn validate_item(item: &WorkflowItem) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if item.page.trim().is_empty() {
        errors.push(ValidationError::EmptyPage { index: item.index });
    }

    if item.target_string.trim().is_empty() {
        errors.push(ValidationError::EmptyTargetString { index: item.index });
    }

    if item.section.trim().is_empty() {
        warn!("Item {}: no section given, highlighting page-wide", item.index);
    }

    if item.hint.trim().is_empty() {
        debug!("Item {}: no hint, using default strategy", item.index);
    }

    errors
}

/// Tracks indices seen during one compile run.
#[derive(Debug, Default)]
pub struct IndexGuard {
    seen: HashSet<usize>,
}

impl IndexGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the item's index, failing if it was already used.
    pub fn admit(&mut self, item: &WorkflowItem) -> Result<(), ValidationError> {
        if self.seen.insert(item.index) {
            Ok(())
        } else {
            Err(ValidationError::DuplicateIndex { index: item.index })
        }
    }
}

/// Quick validation that returns a list of error messages for all items.
pub fn quick_validate(items: &[WorkflowItem]) -> Vec<String> {
    let mut guard = IndexGuard::new();
    let mut errors = Vec::new();

    for item in items {
        errors.extend(validate_item(item).iter().map(|e| e.to_string()));
        if let Err(e) = guard.admit(item) {
            errors.push(e.to_string());
        }
    }

    errors
}
