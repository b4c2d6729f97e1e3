//! Execution Plan Model
//!
//! The compiled, ready-to-run form of a workflow. Steps are produced once by
//! the compiler and never revised.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::highlight::{HighlightStrategy, ScriptArgs};
use crate::workflow::model::{languages_needed, pages_needed};
use crate::workflow::WorkflowItem;

/// Action name the harness dispatches on.
pub const ACTION_NAVIGATE_AND_HIGHLIGHT: &str = "navigate_and_highlight";

/// One unit of work for the harness: open `url`, switch to `language_code`,
/// evaluate `script`, and on success capture `filepath`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecutionStep {
    /// Equal to the source item's index
    pub step_number: usize,

    pub action: String,

    /// The item this step was compiled from
    pub item: WorkflowItem,

    /// Absolute page URL, including `lang` when not the default language
    pub url: String,

    /// Code to select in the app's language switcher
    pub language_code: String,

    pub strategy: HighlightStrategy,

    pub filename: String,

    /// `filename` placed under the screenshots directory
    pub filepath: String,

    /// Arguments bound into `script`
    pub script_args: ScriptArgs,

    /// Self-contained highlight script
    pub script: String,
}

/// Overview of what a plan covers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanSummary {
    pub total_items: usize,
    pub languages_needed: Vec<String>,
    pub pages_needed: Vec<String>,
}

impl PlanSummary {
    /// Summarises the items that made it into a plan.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a WorkflowItem>) -> Self {
        let items: Vec<WorkflowItem> = items.into_iter().cloned().collect();
        Self {
            total_items: items.len(),
            languages_needed: languages_needed(&items),
            pages_needed: pages_needed(&items),
        }
    }
}

/// The serialized output artifact.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    pub generated_at: DateTime<Utc>,

    /// Input file the plan was compiled from
    pub source: String,

    pub summary: PlanSummary,

    pub steps: Vec<ExecutionStep>,

    /// Items left out of the plan, one message each
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ExecutionPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Looks up a step by its number.
    pub fn get_step(&self, step_number: usize) -> Option<&ExecutionStep> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }
}
