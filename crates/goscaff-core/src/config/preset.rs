//! YAML answer presets for non-interactive runs
//!
//! ```yaml
//! module: github.com/acme/shop
//! type: api
//! dockerfile: true
//! framework: echo
//! database: postgres
//! ```
//!
//! Every field is optional; whatever is missing is asked interactively.
//! Command-line flags win over the preset.

use crate::answers::{AppType, Database, Framework, Messaging};
use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswersPreset {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default, rename = "type")]
    pub app_type: Option<AppType>,

    #[serde(default)]
    pub dockerfile: Option<bool>,

    #[serde(default)]
    pub framework: Option<Framework>,

    #[serde(default)]
    pub database: Option<Database>,

    #[serde(default)]
    pub messaging: Option<Messaging>,

    /// Component name for worker/controller/service/repo/di
    #[serde(default)]
    pub name: Option<String>,
}

impl AnswersPreset {
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ScaffoldError::Preset {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::io("Failed to read", path, e))?;
        Self::parse(&content, path)
    }

    /// Fill every unset field from `other`; fields already set here win
    pub fn or(self, other: AnswersPreset) -> Self {
        Self {
            module: self.module.or(other.module),
            app_type: self.app_type.or(other.app_type),
            dockerfile: self.dockerfile.or(other.dockerfile),
            framework: self.framework.or(other.framework),
            database: self.database.or(other.database),
            messaging: self.messaging.or(other.messaging),
            name: self.name.or(other.name),
        }
    }
}
