//! Shotplan - Translation Screenshot Planner
//!
//! Turns a translation review sheet into an execution plan for a browser
//! harness. For every row of the sheet the plan holds the page URL (with the
//! language selected), a screenshot filename, and a script that finds the
//! target string in the page and outlines it.
//!
//! Shotplan never drives a browser itself. The harness opens each step's
//! `url`, switches to `language_code`, evaluates `script`, and captures
//! `filepath` when the script reports `success`.
//!
//! # Architecture
//!
//! - [`workflow`]: Loading and validating sheet rows
//! - [`plan`]: Compiling rows into steps and persisting the plan
//! - [`config`]: Deployment tables (base URL, pages, languages) and policies
//!
//! # Example
//!
//! ```rust,no_run
//! use shotplan::{build_plan, save_plan, PlannerConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let plan = build_plan("sample_workflow.csv", PlannerConfig::default())?;
//!     save_plan(&plan, "execution_plan.json")?;
//!     Ok(())
//! }
//! ```

use std::error::Error;
use std::path::Path;

pub mod config;
pub mod plan;
pub mod workflow;

// Re-export commonly used types
pub use config::PlannerConfig;
pub use plan::{load_plan, save_plan, ExecutionPlan, ExecutionStep, PlanCompiler};
pub use workflow::{load_items, WorkflowItem};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Shotplan";

/// Loads a sheet and compiles it into a plan in one call.
pub fn build_plan(
    path: impl AsRef<Path>,
    config: PlannerConfig,
) -> Result<ExecutionPlan, Box<dyn Error>> {
    let path = path.as_ref();
    let items = load_items(path)?;
    let plan = PlanCompiler::new(config).compile_plan(path.display().to_string(), &items)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SHEET: &str = "\
Screen/Page,Section,String,Language,Misc
Auth,Login Form,Sign In,Spanish,button only
,,,,
Dashboard,Glucose Chart,Moyenne,French,tooltip
Landing,Hero,Willkommen,German,highlight all instances of string
Landing,Footer,Privacy,English,full text
";

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "Shotplan");
    }

    #[test]
    fn test_build_plan_end_to_end() {
        let temp_dir = tempdir().unwrap();
        let sheet = temp_dir.path().join("sheet.csv");
        std::fs::write(&sheet, SHEET).unwrap();

        let items = load_items(&sheet).unwrap();
        let plan = build_plan(&sheet, PlannerConfig::default()).unwrap();

        // One step per row with a page.
        assert_eq!(items.len(), 4);
        assert_eq!(plan.len(), items.len());
        assert!(plan.warnings.is_empty());

        let first = &plan.steps[0];
        assert_eq!(first.url, "http://localhost:5173/login?lang=es");
        assert_eq!(first.filename, "1_auth_login_form_es.png");

        let chart = plan.get_step(3).unwrap();
        assert_eq!(chart.url, "http://localhost:5173/dashboard?lang=fr");

        let footer = plan.get_step(5).unwrap();
        assert_eq!(footer.url, "http://localhost:5173/");
    }

    #[test]
    fn test_build_plan_roundtrip_through_file() {
        let temp_dir = tempdir().unwrap();
        let sheet = temp_dir.path().join("sheet.csv");
        let output = temp_dir.path().join("plan.json");
        std::fs::write(&sheet, SHEET).unwrap();

        let plan = build_plan(&sheet, PlannerConfig::default()).unwrap();
        save_plan(&plan, &output).unwrap();

        assert_eq!(load_plan(&output).unwrap(), plan);
    }

    #[test]
    fn test_build_plan_missing_file() {
        let result = build_plan("/nonexistent/sheet.csv", PlannerConfig::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
