//! Workflow Definition Module
//!
//! Provides data structures and utilities for loading and validating the
//! translation review sheet.
//!
//! # Structure
//!
//! - [`model`]: Core data structure (WorkflowItem)
//! - [`loader`]: CSV parsing and loading
//! - [`validator`]: Per-item validation rules

pub mod loader;
pub mod model;
pub mod validator;

pub use loader::{load_items, LoadError};
pub use model::WorkflowItem;
pub use validator::{validate_item, ValidationError};
