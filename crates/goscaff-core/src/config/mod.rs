//! Configuration: tool binary overrides and answer presets

pub mod preset;

pub use preset::AnswersPreset;

use crate::runtime::Tool;

/// Environment variable overriding the `go` binary
pub const GO_BIN_ENV: &str = "GOSCAFF_GO";

/// Environment variable overriding the `git` binary
pub const GIT_BIN_ENV: &str = "GOSCAFF_GIT";

/// Binaries used for each external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub go: String,
    pub git: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            go: Tool::Go.default_binary().to_string(),
            git: Tool::Git.default_binary().to_string(),
        }
    }
}

impl Toolchain {
    /// Defaults, overridden by `GOSCAFF_GO` / `GOSCAFF_GIT` when set and non-empty
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };
        Self {
            go: pick(GO_BIN_ENV, defaults.go),
            git: pick(GIT_BIN_ENV, defaults.git),
        }
    }

    pub fn binary(&self, tool: Tool) -> &str {
        match tool {
            Tool::Go => &self.go,
            Tool::Git => &self.git,
        }
    }
}
