//! Semantic declaration checkers.
//!
//! This crate hosts the per-class declaration checkers:
//! - `context` - `CheckerContext` for shared read-only state and collected
//!   diagnostics
//! - `override_checker` - override type-compatibility checking
//! - `error_reporter` - diagnostic emission helpers
//! - `project_fixture` - reader for multi-module test project descriptions

pub mod context;
pub mod error_reporter;
pub mod override_checker;
pub mod project_fixture;

pub use context::CheckerContext;
pub use override_checker::OverrideCompatibilityChecker;
pub use project_fixture::{
    FileToResolve, FixtureError, TestProjectModule, TestProjectStructure,
};
