//! goscaff core - answer routing and scaffolding for Go services
//!
//! This library turns a handful of answers (module name, application type,
//! database, messaging, web framework) into a Go project skeleton, then
//! shells out to `go` and `git` to finish the setup.
//!
//! # Architecture
//!
//! The library is organized as a linear pipeline:
//!
//! - **Answers** - closed enums and answer records, validated once
//! - **Plan** - pure routing from answers to an ordered list of
//!   write/run steps (`plan_init`, `plan_worker`, `plan_di`, ...)
//! - **Executor** - renders embedded Handlebars templates, writes files and
//!   runs commands in plan order, stopping at the first failure
//! - **CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use goscaff_core::answers::ComponentAnswers;
//! use goscaff_core::runtime::SkipRunner;
//! use goscaff_core::{execute, plan, Renderer};
//! use std::path::Path;
//!
//! # async fn demo() -> goscaff_core::error::Result<()> {
//! let plan = plan::plan_service(&ComponentAnswers { name: "billing".into() })?;
//! let mut runner = SkipRunner::default();
//! execute(&plan, Path::new("."), &Renderer::new()?, &mut runner, |_| {}).await?;
//! # Ok(())
//! # }
//! ```

pub mod answers;
pub mod config;
pub mod error;
pub mod executor;
pub mod gomod;
pub mod naming;
pub mod plan;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AppType, Database, Framework, InitAnswers, Messaging};
pub use error::{Result, ScaffoldError};
pub use executor::{execute, ExecutionReport};
pub use plan::{ScaffoldPlan, Step};
pub use templates::{Renderer, TemplateContext, TemplateId};

#[cfg(feature = "tui")]
pub use tui::run;
