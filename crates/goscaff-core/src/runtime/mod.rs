//! Toolchain detection and external command execution
//!
//! This module provides:
//! - Go and Git detection with version reporting
//! - Go version comparison for compatibility warnings and the Dockerfile base image
//! - The `CommandRunner` seam used by the executor to shell out

pub mod check;
pub mod command;

pub use check::{
    check_git, check_go, check_toolchain, dockerfile_go_version, go_version_warning,
    RuntimeInfo, DEFAULT_GO_VERSION, MIN_GO_VERSION,
};
pub use command::{CommandRunner, SkipRunner, SystemRunner, Tool, COMMAND_TIMEOUT};
