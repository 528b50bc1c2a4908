//! Render context shared by every template

use crate::answers::{AppType, Database, Framework, Messaging};
use crate::naming;
use crate::runtime::DEFAULT_GO_VERSION;
use serde::Serialize;

/// Port the generated API listens on unless `port` is set in the env file
pub const DEFAULT_PORT: u16 = 3000;

/// Flat context handed to Handlebars.
///
/// Every routing flag is always present so strict-mode rendering never
/// trips over a missing field inside `{{#if}}` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    /// Go module path, empty when the component is generated outside `init`
    pub module: String,
    /// Last module path segment as an identifier, used for database and group names
    pub project: String,
    /// Component name as the user typed it
    pub name: String,
    /// Go package / directory name derived from `name`
    pub package: String,
    pub go_version: String,
    pub port: u16,

    pub api: bool,
    pub worker: bool,
    pub gin: bool,
    pub echo: bool,
    pub mongodb: bool,
    pub postgres: bool,
    pub kafka: bool,
    pub rabbitmq: bool,
}

impl TemplateContext {
    pub fn new(name: &str) -> Self {
        Self {
            module: String::new(),
            project: "app".to_string(),
            name: name.to_string(),
            package: naming::to_package(name),
            go_version: DEFAULT_GO_VERSION.to_string(),
            port: DEFAULT_PORT,
            api: false,
            worker: false,
            gin: false,
            echo: false,
            mongodb: false,
            postgres: false,
            kafka: false,
            rabbitmq: false,
        }
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module = module.to_string();
        let last = module.rsplit('/').find(|s| !s.is_empty()).unwrap_or(module);
        let project = naming::to_package(last);
        if !project.is_empty() {
            self.project = project;
        }
        self
    }

    pub fn with_app_type(mut self, app_type: AppType) -> Self {
        self.api = app_type == AppType::Api;
        self.worker = app_type == AppType::Worker;
        self
    }

    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.gin = framework == Framework::Gin;
        self.echo = framework == Framework::Echo;
        self
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.mongodb = database == Database::MongoDb;
        self.postgres = database == Database::Postgres;
        self
    }

    pub fn with_messaging(mut self, messaging: Messaging) -> Self {
        self.kafka = messaging == Messaging::Kafka;
        self.rabbitmq = messaging == Messaging::RabbitMq;
        self
    }

    pub fn with_go_version(mut self, go_version: &str) -> Self {
        self.go_version = go_version.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_sets_project() {
        let ctx = TemplateContext::new("orders").with_module("github.com/acme/order-service");
        assert_eq!(ctx.module, "github.com/acme/order-service");
        assert_eq!(ctx.project, "orderservice");
        assert_eq!(ctx.package, "orders");
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        let ctx = TemplateContext::new("orders")
            .with_database(Database::MongoDb)
            .with_database(Database::Postgres);
        assert!(ctx.postgres);
        assert!(!ctx.mongodb);

        let ctx = ctx.with_database(Database::Skip);
        assert!(!ctx.postgres && !ctx.mongodb);
    }

    #[test]
    fn test_app_type_flags() {
        let ctx = TemplateContext::new("x").with_app_type(AppType::Worker);
        assert!(ctx.worker);
        assert!(!ctx.api);
    }
}
