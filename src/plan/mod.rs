//! Execution Plan Module
//!
//! Compiles workflow items into the ordered plan consumed by the browser
//! harness, and persists that plan.
//!
//! # Structure
//!
//! - [`compiler`]: Item-by-item compilation into steps
//! - [`url`]: Page and language to URL resolution
//! - [`filename`]: Screenshot filename policy
//! - [`highlight`]: Strategy selection and script rendering
//! - [`model`]: Plan and step data structures
//! - [`document`]: JSON save/load

pub mod compiler;
pub mod document;
pub mod filename;
pub mod highlight;
pub mod model;
pub mod url;

pub use compiler::{Compilation, PlanCompiler, PlanError};
pub use document::{load_plan, save_plan, DEFAULT_PLAN_PATH};
pub use highlight::HighlightStrategy;
pub use model::{ExecutionPlan, ExecutionStep, PlanSummary};
