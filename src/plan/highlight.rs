//! Highlight Script Generation
//!
//! Picks a DOM search strategy from an item's free-text hint and renders the
//! JavaScript the harness evaluates in the page.
//!
//! Strategy selection is an ordered list of [`HintRule`]s; the first rule
//! whose keyword occurs in the hint (case-insensitive) wins, and
//! [`HighlightStrategy::FullText`] applies when none does.
//!
//! Scripts never splice the target string into code. Each script is a
//! function applied to a JSON argument object:
//!
//! ```text
//! (function (args) {
//!   ...prelude: clear old highlights, helpers...
//!   ...strategy body...
//! })({"target":"Sign In", ...});
//! ```
//!
//! Every strategy resolves to a result record with `success`, `count`,
//! `elementsFound`, `elementsHighlighted`, `targetString` and the matched
//! `elements`; the tooltip strategy may return a Promise of that record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Helpers shared by every strategy.
const PRELUDE_SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/prelude.js"));

const BUTTON_ONLY_SCRIPT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/button_only.js"));

const ALL_INSTANCES_SCRIPT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/all_instances.js"));

const TOOLTIP_SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/tooltip.js"));

const FULL_TEXT_SCRIPT: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/full_text.js"));

/// How target elements are located and which element gets highlighted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStrategy {
    /// Only button-like elements whose text contains the target
    ButtonOnly,
    /// Parent of every text node containing the target
    AllInstances,
    /// Tooltip-bearing elements, hovering charts when none are rendered
    Tooltip,
    /// Nearest container around the innermost matching element
    FullText,
}

impl HighlightStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ButtonOnly => "button_only",
            Self::AllInstances => "all_instances",
            Self::Tooltip => "tooltip",
            Self::FullText => "full_text",
        }
    }

    fn body(&self) -> &'static str {
        match self {
            Self::ButtonOnly => BUTTON_ONLY_SCRIPT,
            Self::AllInstances => ALL_INSTANCES_SCRIPT,
            Self::Tooltip => TOOLTIP_SCRIPT,
            Self::FullText => FULL_TEXT_SCRIPT,
        }
    }
}

impl fmt::Display for HighlightStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a hint keyword to a strategy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HintRule {
    pub keyword: String,
    pub strategy: HighlightStrategy,
}

impl HintRule {
    pub fn new(keyword: impl Into<String>, strategy: HighlightStrategy) -> Self {
        Self {
            keyword: keyword.into(),
            strategy,
        }
    }

    /// Case-insensitive substring match against a hint.
    pub fn matches(&self, hint: &str) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        !keyword.is_empty() && hint.to_lowercase().contains(&keyword)
    }
}

/// Rules in precedence order: button, all instances, tooltip, full text.
pub fn default_hint_rules() -> Vec<HintRule> {
    vec![
        HintRule::new("button", HighlightStrategy::ButtonOnly),
        HintRule::new("all instances", HighlightStrategy::AllInstances),
        HintRule::new("tooltip", HighlightStrategy::Tooltip),
        HintRule::new("full text", HighlightStrategy::FullText),
        HintRule::new("full section", HighlightStrategy::FullText),
    ]
}

/// Selects the strategy for a hint. First matching rule wins.
pub fn select_strategy(rules: &[HintRule], hint: &str) -> HighlightStrategy {
    rules
        .iter()
        .find(|rule| rule.matches(hint))
        .map(|rule| rule.strategy)
        .unwrap_or(HighlightStrategy::FullText)
}

/// Visual treatment applied to highlighted elements.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HighlightStyle {
    /// Class added to highlighted elements (and cleared by the next script)
    pub class_name: String,
    /// CSS colour for border, outline and glow
    pub color: String,
    /// How long the tooltip strategy waits after synthesised hovers
    pub tooltip_delay_ms: u64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            class_name: "shotplan-highlight".to_string(),
            color: "#ff0000".to_string(),
            tooltip_delay_ms: 500,
        }
    }
}

/// Values bound into a highlight script at run time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptArgs {
    pub target: String,
    pub section: String,
    pub hint: String,
    pub strategy: HighlightStrategy,
    pub highlight_class: String,
    pub color: String,
    pub tooltip_delay_ms: u64,
}

impl ScriptArgs {
    pub fn new(
        target: &str,
        section: &str,
        hint: &str,
        strategy: HighlightStrategy,
        style: &HighlightStyle,
    ) -> Self {
        Self {
            target: target.to_string(),
            section: section.to_string(),
            hint: hint.to_string(),
            strategy,
            highlight_class: style.class_name.clone(),
            color: style.color.clone(),
            tooltip_delay_ms: style.tooltip_delay_ms,
        }
    }
}

/// Renders the self-contained script for a strategy and its arguments.
pub fn render_script(args: &ScriptArgs) -> Result<String, serde_json::Error> {
    // JSON is a JS expression except for these two line terminators in older engines.
    let literal = serde_json::to_string(args)?
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029");

    Ok(format!(
        "(function (args) {{\n  'use strict';\n{}\n{}}})({});\n",
        PRELUDE_SCRIPT,
        args.strategy.body(),
        literal
    ))
}
