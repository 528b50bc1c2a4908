//! Error types for scaffolding operations

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while planning or applying a scaffold.
///
/// Every variant is terminal: the run stops at the first one and nothing
/// already written is rolled back.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A required text answer was empty
    #[error("{0} is required")]
    MissingAnswer(&'static str),

    /// A name that cannot become a Go identifier (empty, or not starting with a letter)
    #[error("{field} '{value}' must start with a letter to build a Go identifier from")]
    InvalidName { field: &'static str, value: String },

    /// A choice string did not match any known variant
    #[error("unknown {field} '{value}' (expected one of: {expected})")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// An embedded template failed to register
    #[error("invalid template {name}: {source}")]
    Template {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// Rendering a template failed (usually a missing context field)
    #[error("failed to render {name}: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external program could not be started at all
    #[error("failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program exited unsuccessfully; carries its combined output
    #[error("`{command}` failed:\n{output}")]
    CommandFailed { command: String, output: String },

    #[error("`{command}` did not finish within {} seconds", .timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },

    #[error("Missing required tools:\n{}", bullet_list(.0))]
    MissingTools(Vec<String>),

    /// The answers preset file could not be read or parsed
    #[error("invalid answers file {}: {message}", .path.display())]
    Preset { path: PathBuf, message: String },
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|m| format!("  - {}", m))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tools_lists_each_tool() {
        let err = ScaffoldError::MissingTools(vec!["Go".to_string(), "Git".to_string()]);
        let message = err.to_string();
        assert!(message.contains("  - Go"));
        assert!(message.contains("  - Git"));
    }

    #[test]
    fn test_command_failed_carries_output() {
        let err = ScaffoldError::CommandFailed {
            command: "go mod init x".to_string(),
            output: "go: cannot determine module path".to_string(),
        };
        assert!(err.to_string().contains("cannot determine module path"));
    }
}
