//! Reading an existing go.mod to default follow-up answers

use crate::answers::{Database, Framework, Messaging};
use crate::error::{Result, ScaffoldError};
use crate::plan::{database_dependency, framework_dependency, messaging_dependency};
use std::path::Path;

/// The parts of a go.mod the generator cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoMod {
    pub module: String,
    /// Required module paths, without versions
    pub requires: Vec<String>,
}

impl GoMod {
    /// Lenient parse: unknown directives are ignored
    pub fn parse(content: &str) -> Self {
        let mut gomod = GoMod::default();
        let mut in_require_block = false;

        for raw in content.lines() {
            let line = raw.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if in_require_block {
                if line == ")" {
                    in_require_block = false;
                } else if let Some(path) = line.split_whitespace().next() {
                    gomod.requires.push(path.to_string());
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("module ") {
                gomod.module = rest.trim().trim_matches('"').to_string();
            } else if let Some(rest) = line.strip_prefix("require") {
                let rest = rest.trim();
                if rest == "(" {
                    in_require_block = true;
                } else if let Some(path) = rest.split_whitespace().next() {
                    gomod.requires.push(path.to_string());
                }
            }
        }

        gomod
    }

    /// Read `<dir>/go.mod`; `Ok(None)` when there is none
    pub fn read(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join("go.mod");
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(Self::parse(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScaffoldError::io("Failed to read", path, e)),
        }
    }

    /// True if `dependency` (a module or a package inside one) is required
    pub fn has_dependency(&self, dependency: &str) -> bool {
        self.requires.iter().any(|req| {
            dependency == req
                || dependency
                    .strip_prefix(req.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn framework(&self) -> Option<Framework> {
        [Framework::Echo, Framework::Gin]
            .into_iter()
            .find(|f| self.has_dependency(framework_dependency(*f)))
    }

    pub fn messaging(&self) -> Option<Messaging> {
        [Messaging::Kafka, Messaging::RabbitMq]
            .into_iter()
            .find(|m| self.has_dependency(messaging_dependency(*m)))
    }

    pub fn database(&self) -> Option<Database> {
        [Database::MongoDb, Database::Postgres]
            .into_iter()
            .find(|d| database_dependency(*d).is_some_and(|dep| self.has_dependency(dep)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"module github.com/acme/shop

go 1.22

require (
	github.com/labstack/echo/v4 v4.11.4
	github.com/rs/zerolog v1.32.0 // indirect
	go.mongodb.org/mongo-driver v1.14.0
)

require github.com/joho/godotenv v1.5.1
"#;

    #[test]
    fn test_parse_module_and_requires() {
        let gomod = GoMod::parse(SAMPLE);
        assert_eq!(gomod.module, "github.com/acme/shop");
        assert_eq!(
            gomod.requires,
            vec![
                "github.com/labstack/echo/v4",
                "github.com/rs/zerolog",
                "go.mongodb.org/mongo-driver",
                "github.com/joho/godotenv",
            ]
        );
    }

    #[test]
    fn test_has_dependency_matches_packages_inside_modules() {
        let gomod = GoMod::parse(SAMPLE);
        assert!(gomod.has_dependency("go.mongodb.org/mongo-driver/mongo"));
        assert!(gomod.has_dependency("github.com/rs/zerolog"));
        assert!(!gomod.has_dependency("github.com/rs/zerologx"));
        assert!(!gomod.has_dependency("github.com/gin-gonic/gin"));
    }

    #[test]
    fn test_detects_stack() {
        let gomod = GoMod::parse(SAMPLE);
        assert_eq!(gomod.framework(), Some(Framework::Echo));
        assert_eq!(gomod.database(), Some(Database::MongoDb));
        assert_eq!(gomod.messaging(), None);
    }

    #[test]
    fn test_read_missing_go_mod() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GoMod::read(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_read_existing_go_mod() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("go.mod"),
            "module example.com/worker\n\nrequire github.com/segmentio/kafka-go v0.4.47\n",
        )
        .unwrap();

        let gomod = GoMod::read(dir.path()).unwrap().unwrap();
        assert_eq!(gomod.module, "example.com/worker");
        assert_eq!(gomod.messaging(), Some(Messaging::Kafka));
    }
}
