//! Template bodies compiled into the binary
//!
//! Paths are relative to this file and resolved by `include_str!` at build time.

pub const README: &str = include_str!("../../templates/README.md.hbs");
pub const GITIGNORE: &str = include_str!("../../templates/gitignore.hbs");
pub const DOCKERFILE: &str = include_str!("../../templates/Dockerfile.hbs");
pub const ENV_DEVELOPMENT: &str = include_str!("../../templates/development.env.hbs");
pub const ENV_PRODUCTION: &str = include_str!("../../templates/production.env.hbs");

pub const API_GIN: &str = include_str!("../../templates/api_gin.go.hbs");
pub const API_ECHO: &str = include_str!("../../templates/api_echo.go.hbs");
pub const WORKER_KAFKA: &str = include_str!("../../templates/worker_kafka.go.hbs");
pub const WORKER_RABBITMQ: &str = include_str!("../../templates/worker_rabbitmq.go.hbs");
pub const WORKER_HANDLER: &str = include_str!("../../templates/worker_handler.go.hbs");

pub const CONTROLLER: &str = include_str!("../../templates/controller.go.hbs");
pub const SERVICE: &str = include_str!("../../templates/service.go.hbs");
pub const REPOSITORY: &str = include_str!("../../templates/repository.go.hbs");
pub const ENTITY: &str = include_str!("../../templates/entity.go.hbs");

/// Shared fragments, referenced from the main templates as `{{> name}}`
pub const PARTIALS: &[(&str, &str)] = &[
    ("load_env", include_str!("../../templates/partials/load_env.hbs")),
    ("db_imports", include_str!("../../templates/partials/db_imports.hbs")),
    ("db_connect", include_str!("../../templates/partials/db_connect.hbs")),
];
