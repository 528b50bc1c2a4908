//! Answer records collected from prompts, flags, or a preset file
//!
//! Every choice is a closed enum. Free-text answers are only checked for
//! being non-empty; nothing here touches the filesystem.

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A closed set of options offered by a select prompt
pub trait Choice: Copy + Eq + Sized + 'static {
    /// Name of the question, used in error messages
    const FIELD: &'static str;

    /// All variants in prompt order
    const ALL: &'static [Self];

    fn display_name(&self) -> &'static str;

    /// Lowercase spellings accepted on the command line and in presets
    fn aliases(&self) -> &'static [&'static str];

    fn parse(value: &str) -> Result<Self> {
        let needle = value.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.display_name().eq_ignore_ascii_case(&needle) || c.aliases().contains(&needle.as_str()))
            .ok_or_else(|| ScaffoldError::InvalidChoice {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|c| c.aliases()[0])
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

macro_rules! choice_impls {
    ($($ty:ty),+ $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }

        impl FromStr for $ty {
            type Err = ScaffoldError;

            fn from_str(s: &str) -> Result<Self> {
                <$ty as Choice>::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ScaffoldError;

            fn try_from(s: String) -> Result<Self> {
                <$ty as Choice>::parse(&s)
            }
        }
    )+};
}

/// Kind of service the scaffold produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum AppType {
    Api,
    Worker,
}

impl Choice for AppType {
    const FIELD: &'static str = "type";
    const ALL: &'static [Self] = &[AppType::Api, AppType::Worker];

    fn display_name(&self) -> &'static str {
        match self {
            AppType::Api => "API",
            AppType::Worker => "Worker",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            AppType::Api => &["api", "http"],
            AppType::Worker => &["worker", "consumer"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Database {
    #[default]
    Skip,
    MongoDb,
    Postgres,
}

impl Choice for Database {
    const FIELD: &'static str = "database";
    const ALL: &'static [Self] = &[Database::Skip, Database::MongoDb, Database::Postgres];

    fn display_name(&self) -> &'static str {
        match self {
            Database::Skip => "Skip",
            Database::MongoDb => "MongoDB",
            Database::Postgres => "PostgreSQL",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Database::Skip => &["skip", "none"],
            Database::MongoDb => &["mongodb", "mongo"],
            Database::Postgres => &["postgres", "postgresql", "pg"],
        }
    }
}

/// Message broker a worker consumes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Messaging {
    #[default]
    Kafka,
    RabbitMq,
}

impl Choice for Messaging {
    const FIELD: &'static str = "messaging";
    const ALL: &'static [Self] = &[Messaging::Kafka, Messaging::RabbitMq];

    fn display_name(&self) -> &'static str {
        match self {
            Messaging::Kafka => "Kafka",
            Messaging::RabbitMq => "RabbitMQ",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Messaging::Kafka => &["kafka"],
            Messaging::RabbitMq => &["rabbitmq", "rabbit", "amqp"],
        }
    }
}

/// HTTP framework for API services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Framework {
    #[default]
    Gin,
    Echo,
}

impl Choice for Framework {
    const FIELD: &'static str = "framework";
    const ALL: &'static [Self] = &[Framework::Gin, Framework::Echo];

    fn display_name(&self) -> &'static str {
        match self {
            Framework::Gin => "Gin",
            Framework::Echo => "Echo",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Framework::Gin => &["gin"],
            Framework::Echo => &["echo"],
        }
    }
}

choice_impls!(AppType, Database, Messaging, Framework);

/// Trim a text answer and reject it if nothing is left
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScaffoldError::MissingAnswer(field));
    }
    Ok(trimmed.to_string())
}

/// Answers for `init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitAnswers {
    /// Go module path passed to `go mod init`
    pub module: String,
    pub dockerfile: bool,
    pub app_type: AppType,
    /// Only used when `app_type` is `Api`
    pub framework: Framework,
    pub database: Database,
    /// Required when `app_type` is `Worker`
    pub worker: Option<WorkerAnswers>,
}

impl InitAnswers {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("module name", &self.module)?;
        if self.app_type == AppType::Worker {
            match &self.worker {
                Some(worker) => worker.validate()?,
                None => return Err(ScaffoldError::MissingAnswer("worker name")),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerAnswers {
    pub name: String,
    pub messaging: Messaging,
}

impl WorkerAnswers {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("worker name", &self.name).map(|_| ())
    }
}

/// Answers for single-file components (services)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAnswers {
    pub name: String,
}

impl ComponentAnswers {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("service name", &self.name).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerAnswers {
    pub name: String,
    pub framework: Framework,
}

impl ControllerAnswers {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("controller name", &self.name).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryAnswers {
    pub name: String,
    pub database: Database,
}

impl RepositoryAnswers {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("repository name", &self.name).map(|_| ())
    }
}

/// Answers for `di`: a controller/service/repository trio sharing one name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiAnswers {
    pub app_type: AppType,
    pub name: String,
    pub database: Database,
    pub framework: Framework,
}

impl DiAnswers {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("component name", &self.name).map(|_| ())
    }
}
