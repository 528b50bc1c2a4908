//! Embedded templates and rendering
//!
//! This module provides:
//! - The template bodies, compiled in with `include_str!`
//! - `TemplateId`, naming each renderable template
//! - `TemplateContext`, the flat context every template reads
//! - `Renderer`, a strict Handlebars registry with case helpers
//!   (`camel`, `lower_camel`, `kebab`, `to_package`)

pub mod context;
pub mod embedded;
pub mod renderer;

pub use context::{TemplateContext, DEFAULT_PORT};
pub use renderer::Renderer;

/// Every template the planner can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Readme,
    Gitignore,
    Dockerfile,
    EnvDevelopment,
    EnvProduction,
    ApiGin,
    ApiEcho,
    WorkerKafka,
    WorkerRabbitMq,
    WorkerHandler,
    Controller,
    Service,
    Repository,
    Entity,
}

impl TemplateId {
    pub const ALL: &'static [TemplateId] = &[
        TemplateId::Readme,
        TemplateId::Gitignore,
        TemplateId::Dockerfile,
        TemplateId::EnvDevelopment,
        TemplateId::EnvProduction,
        TemplateId::ApiGin,
        TemplateId::ApiEcho,
        TemplateId::WorkerKafka,
        TemplateId::WorkerRabbitMq,
        TemplateId::WorkerHandler,
        TemplateId::Controller,
        TemplateId::Service,
        TemplateId::Repository,
        TemplateId::Entity,
    ];

    /// Registry key, also used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::Readme => "readme",
            TemplateId::Gitignore => "gitignore",
            TemplateId::Dockerfile => "dockerfile",
            TemplateId::EnvDevelopment => "env-development",
            TemplateId::EnvProduction => "env-production",
            TemplateId::ApiGin => "api-gin",
            TemplateId::ApiEcho => "api-echo",
            TemplateId::WorkerKafka => "worker-kafka",
            TemplateId::WorkerRabbitMq => "worker-rabbitmq",
            TemplateId::WorkerHandler => "worker-handler",
            TemplateId::Controller => "controller",
            TemplateId::Service => "service",
            TemplateId::Repository => "repository",
            TemplateId::Entity => "entity",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            TemplateId::Readme => embedded::README,
            TemplateId::Gitignore => embedded::GITIGNORE,
            TemplateId::Dockerfile => embedded::DOCKERFILE,
            TemplateId::EnvDevelopment => embedded::ENV_DEVELOPMENT,
            TemplateId::EnvProduction => embedded::ENV_PRODUCTION,
            TemplateId::ApiGin => embedded::API_GIN,
            TemplateId::ApiEcho => embedded::API_ECHO,
            TemplateId::WorkerKafka => embedded::WORKER_KAFKA,
            TemplateId::WorkerRabbitMq => embedded::WORKER_RABBITMQ,
            TemplateId::WorkerHandler => embedded::WORKER_HANDLER,
            TemplateId::Controller => embedded::CONTROLLER,
            TemplateId::Service => embedded::SERVICE,
            TemplateId::Repository => embedded::REPOSITORY,
            TemplateId::Entity => embedded::ENTITY,
        }
    }
}
