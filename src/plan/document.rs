//! Plan Persistence
//!
//! Writes the execution plan as pretty-printed JSON and reads it back. The
//! plan is written once per run; parent directories are created as needed.

use std::fs;
use std::path::Path;

use log::info;

use super::compiler::PlanError;
use super::model::ExecutionPlan;

/// Default output path for the plan document.
pub const DEFAULT_PLAN_PATH: &str = "execution_plan.json";

/// Saves a plan to a JSON file.
pub fn save_plan(plan: &ExecutionPlan, path: impl AsRef<Path>) -> Result<(), PlanError> {
    let path = path.as_ref();
    let io_error = |source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json).map_err(io_error)?;

    info!("Saved execution plan ({} steps) to {}", plan.len(), path.display());
    Ok(())
}

/// Loads a plan previously written by [`save_plan`].
pub fn load_plan(path: impl AsRef<Path>) -> Result<ExecutionPlan, PlanError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let plan: ExecutionPlan = serde_json::from_str(&content)?;

    info!("Loaded execution plan ({} steps) from {}", plan.len(), path.display());
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::plan::PlanCompiler;
    use crate::workflow::WorkflowItem;
    use tempfile::tempdir;

    fn sample_plan() -> ExecutionPlan {
        let items = vec![
            WorkflowItem::new(1, "Auth", "Login Form", "Sign In", "Spanish")
                .with_hint("button only"),
            WorkflowItem::new(2, "Dashboard", "Chart", "Moyenne \"7j\"", "French")
                .with_hint("tooltip"),
            WorkflowItem::new(3, "Landing", "Hero", "", "German"),
        ];
        PlanCompiler::new(PlannerConfig::default())
            .compile_plan("sheet.csv", &items)
            .unwrap()
    }

    #[test]
    fn test_plan_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");
        let plan = sample_plan();

        save_plan(&plan, &path).unwrap();
        let loaded = load_plan(&path).unwrap();

        assert_eq!(loaded.len(), plan.len());
        assert_eq!(loaded, plan);
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_save_plan_creates_parent_dirs() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out").join("nested").join("plan.json");

        save_plan(&sample_plan(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_saved_plan_layout() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");
        save_plan(&sample_plan(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total_items"], 2);
        assert_eq!(value["steps"][0]["item"]["string"], "Sign In");
        assert_eq!(value["steps"][0]["strategy"], "button_only");
        assert_eq!(value["steps"][1]["script_args"]["target"], "Moyenne \"7j\"");
    }

    #[test]
    fn test_load_plan_nonexistent() {
        let result = load_plan("/nonexistent/path/plan.json");
        assert!(matches!(result, Err(PlanError::Io { .. })));
    }

    #[test]
    fn test_load_plan_invalid_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_plan(&path), Err(PlanError::Serialize(_))));
    }
}
