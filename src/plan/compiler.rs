//! Plan Compiler
//!
//! Turns workflow items into execution steps. Each item is compiled on its
//! own: URL, screenshot filename and highlight script depend only on the item
//! and the configuration. The compiler does no I/O.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use thiserror::Error;

use super::highlight::{render_script, select_strategy, ScriptArgs};
use super::model::{ExecutionPlan, ExecutionStep, PlanSummary, ACTION_NAVIGATE_AND_HIGHLIGHT};
use super::url::UrlResolver;
use crate::config::PlannerConfig;
use crate::workflow::validator::IndexGuard;
use crate::workflow::{validate_item, ValidationError, WorkflowItem};

/// Errors raised while compiling, saving or loading a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{}", render_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("Failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to access plan file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn render_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Steps compiled from a list of items, plus the items that were left out.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub steps: Vec<ExecutionStep>,
    pub skipped: Vec<ValidationError>,
}

/// Compiles workflow items into execution steps.
///
/// # Example
///
/// ```
/// use shotplan::config::PlannerConfig;
/// use shotplan::plan::PlanCompiler;
/// use shotplan::workflow::WorkflowItem;
///
/// let item = WorkflowItem::new(1, "Auth", "Login Form", "Sign In", "Spanish")
///     .with_hint("button only");
/// let compiler = PlanCompiler::new(PlannerConfig::default());
/// let step = compiler.compile_item(&item).unwrap();
///
/// assert_eq!(step.url, "http://localhost:5173/login?lang=es");
/// assert_eq!(step.filename, "1_auth_login_form_es.png");
/// ```
#[derive(Debug, Clone)]
pub struct PlanCompiler {
    config: PlannerConfig,
    resolver: UrlResolver,
    compiled_at: DateTime<Utc>,
}

impl PlanCompiler {
    pub fn new(config: PlannerConfig) -> Self {
        let resolver = UrlResolver::new(&config);
        Self {
            config,
            resolver,
            compiled_at: Utc::now(),
        }
    }

    /// Pins the compile time used for timestamped filenames and the plan header.
    pub fn with_compiled_at(mut self, compiled_at: DateTime<Utc>) -> Self {
        self.compiled_at = compiled_at;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compiles a single item.
    ///
    /// Returns [`PlanError::Validation`] naming the item when it cannot be
    /// compiled.
    pub fn compile_item(&self, item: &WorkflowItem) -> Result<ExecutionStep, PlanError> {
        let errors = validate_item(item);
        if !errors.is_empty() {
            return Err(PlanError::Validation(errors));
        }

        let language_code = self.resolver.language_code(&item.language);
        let url = self.resolver.resolve(&item.page, &language_code);
        let filename = self
            .config
            .filenames
            .filename(item, &language_code, self.compiled_at);
        let filepath = self.screenshot_path(&filename);

        let strategy = select_strategy(&self.config.hint_rules, &item.hint);
        let script_args = ScriptArgs::new(
            &item.target_string,
            &item.section,
            &item.hint,
            strategy,
            &self.config.highlight,
        );
        let script = render_script(&script_args)?;

        debug!(
            "Compiled item {}: {} [{}] -> {}",
            item.index, url, strategy, filename
        );

        Ok(ExecutionStep {
            step_number: item.index,
            action: ACTION_NAVIGATE_AND_HIGHLIGHT.to_string(),
            item: item.clone(),
            url,
            language_code,
            strategy,
            filename,
            filepath,
            script_args,
            script,
        })
    }

    /// Compiles items in order.
    ///
    /// Invalid items are skipped and reported in [`Compilation::skipped`];
    /// with `strict` set, the first invalid item aborts the whole compile.
    pub fn compile(&self, items: &[WorkflowItem]) -> Result<Compilation, PlanError> {
        let mut compilation = Compilation::default();
        let mut guard = IndexGuard::new();

        for item in items {
            let result = guard
                .admit(item)
                .map_err(|e| PlanError::Validation(vec![e]))
                .and_then(|_| self.compile_item(item));

            match result {
                Ok(step) => compilation.steps.push(step),
                Err(PlanError::Validation(errors)) if !self.config.strict => {
                    for error in &errors {
                        warn!("Skipping item: {}", error);
                    }
                    compilation.skipped.extend(errors);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Compiled {} steps ({} items skipped)",
            compilation.steps.len(),
            compilation.skipped.len()
        );
        Ok(compilation)
    }

    /// Compiles items into a complete plan document.
    pub fn compile_plan(
        &self,
        source: impl Into<String>,
        items: &[WorkflowItem],
    ) -> Result<ExecutionPlan, PlanError> {
        let compilation = self.compile(items)?;

        Ok(ExecutionPlan {
            generated_at: self.compiled_at,
            source: source.into(),
            summary: PlanSummary::from_items(compilation.steps.iter().map(|s| &s.item)),
            warnings: compilation.skipped.iter().map(|e| e.to_string()).collect(),
            steps: compilation.steps,
        })
    }

    fn screenshot_path(&self, filename: &str) -> String {
        let dir = self.config.screenshots_dir.trim().trim_end_matches('/');
        if dir.is_empty() {
            filename.to_string()
        } else {
            format!("{}/{}", dir, filename)
        }
    }
}
