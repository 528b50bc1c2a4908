//! Answer routing: turn answers into an ordered list of scaffold steps
//!
//! Everything here is pure. A plan names which template renders to which
//! path with which context, and which external commands run in between;
//! the executor is the only part that touches the disk.

use crate::answers::{
    AppType, ComponentAnswers, ControllerAnswers, Database, DiAnswers, Framework, InitAnswers,
    Messaging, RepositoryAnswers, WorkerAnswers,
};
use crate::error::{Result, ScaffoldError};
use crate::gomod::GoMod;
use crate::naming;
use crate::runtime::Tool;
use crate::templates::{TemplateContext, TemplateId};
use std::fmt;
use std::path::{Path, PathBuf};

/// Dependencies every generated project pulls in
pub const BASE_DEPENDENCIES: &[&str] = &["github.com/rs/zerolog", "github.com/joho/godotenv"];

pub fn framework_dependency(framework: Framework) -> &'static str {
    match framework {
        Framework::Gin => "github.com/gin-gonic/gin",
        Framework::Echo => "github.com/labstack/echo/v4",
    }
}

pub fn messaging_dependency(messaging: Messaging) -> &'static str {
    match messaging {
        Messaging::Kafka => "github.com/segmentio/kafka-go",
        Messaging::RabbitMq => "github.com/rabbitmq/amqp091-go",
    }
}

pub fn database_dependency(database: Database) -> Option<&'static str> {
    match database {
        Database::Skip => None,
        Database::MongoDb => Some("go.mongodb.org/mongo-driver/mongo"),
        Database::Postgres => Some("github.com/jackc/pgx/v5"),
    }
}

/// A file to render, relative to the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub template: TemplateId,
    pub context: TemplateContext,
}

/// An external command, run with the project directory as working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    pub tool: Tool,
    pub args: Vec<String>,
}

impl PlannedCommand {
    pub fn go(args: &[&str]) -> Self {
        Self {
            tool: Tool::Go,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn git(args: &[&str]) -> Self {
        Self {
            tool: Tool::Git,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for PlannedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tool.default_binary())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Write(PlannedFile),
    Run(PlannedCommand),
}

/// Ordered steps for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub steps: Vec<Step>,
}

impl ScaffoldPlan {
    fn write(&mut self, path: impl Into<PathBuf>, template: TemplateId, context: &TemplateContext) {
        self.steps.push(Step::Write(PlannedFile {
            path: path.into(),
            template,
            context: context.clone(),
        }));
    }

    fn run(&mut self, command: PlannedCommand) {
        self.steps.push(Step::Run(command));
    }

    /// Append another plan's steps after this one's
    pub fn extend(&mut self, other: ScaffoldPlan) {
        self.steps.extend(other.steps);
    }

    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.steps.iter().filter_map(|s| match s {
            Step::Write(file) => Some(file),
            Step::Run(_) => None,
        })
    }

    pub fn commands(&self) -> impl Iterator<Item = &PlannedCommand> {
        self.steps.iter().filter_map(|s| match s {
            Step::Run(cmd) => Some(cmd),
            Step::Write(_) => None,
        })
    }

    pub fn needs(&self, tool: Tool) -> bool {
        self.commands().any(|c| c.tool == tool)
    }

    /// Planned files that already exist under `dir` and would be overwritten
    pub fn existing_files(&self, dir: &Path) -> Vec<PathBuf> {
        self.files()
            .filter(|f| dir.join(&f.path).exists())
            .map(|f| f.path.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Validate a component name and derive the `(package, kebab)` pair used in paths.
///
/// The name must yield a type name starting with an ASCII letter, since it
/// becomes `<Camel>Controller`, `<Camel>Service` and so on.
fn component_paths(field: &'static str, name: &str) -> Result<(String, String)> {
    let package = naming::to_package(name);
    let starts_with_letter = naming::to_camel(name).starts_with(|c: char| c.is_ascii_alphabetic());
    if package.is_empty() || !starts_with_letter {
        return Err(ScaffoldError::InvalidName {
            field,
            value: name.to_string(),
        });
    }
    Ok((package, naming::to_kebab(name)))
}

/// Dependencies fetched by `init`, in fetch order
pub fn init_dependencies(answers: &InitAnswers) -> Vec<&'static str> {
    let mut deps = BASE_DEPENDENCIES.to_vec();
    match (answers.app_type, &answers.worker) {
        (AppType::Api, _) => deps.push(framework_dependency(answers.framework)),
        (AppType::Worker, Some(worker)) => deps.push(messaging_dependency(worker.messaging)),
        (AppType::Worker, None) => {}
    }
    if let Some(db) = database_dependency(answers.database) {
        deps.push(db);
    }
    deps
}

/// Full project: module init, VCS init, common files, dependencies, entry point
pub fn plan_init(answers: &InitAnswers, go_version: &str) -> Result<ScaffoldPlan> {
    answers.validate()?;
    let module = answers.module.trim();

    let name = match (answers.app_type, &answers.worker) {
        (AppType::Worker, Some(worker)) => worker.name.trim(),
        _ => "api",
    };

    let mut ctx = TemplateContext::new(name)
        .with_module(module)
        .with_app_type(answers.app_type)
        .with_database(answers.database)
        .with_go_version(go_version);
    ctx = match (answers.app_type, &answers.worker) {
        (AppType::Api, _) => ctx.with_framework(answers.framework),
        (AppType::Worker, Some(worker)) => ctx.with_messaging(worker.messaging),
        (AppType::Worker, None) => ctx,
    };

    let mut plan = ScaffoldPlan::default();
    plan.run(PlannedCommand::go(&["mod", "init", module]));
    plan.write("README.md", TemplateId::Readme, &ctx);
    plan.run(PlannedCommand::git(&["init"]));
    plan.write(".gitignore", TemplateId::Gitignore, &ctx);
    if answers.dockerfile {
        plan.write("Dockerfile", TemplateId::Dockerfile, &ctx);
    }
    plan.write("development.env", TemplateId::EnvDevelopment, &ctx);
    plan.write("production.env", TemplateId::EnvProduction, &ctx);

    for dep in init_dependencies(answers) {
        plan.run(PlannedCommand::go(&["get", "-u", dep]));
    }

    match (answers.app_type, &answers.worker) {
        (AppType::Api, _) => {
            let template = match answers.framework {
                Framework::Gin => TemplateId::ApiGin,
                Framework::Echo => TemplateId::ApiEcho,
            };
            plan.write("cmd/api/main.go", template, &ctx);
        }
        (AppType::Worker, Some(worker)) => {
            plan.extend(plan_worker(worker, module, answers.database)?);
        }
        (AppType::Worker, None) => {}
    }

    Ok(plan)
}

/// Worker entry point plus its message handler
pub fn plan_worker(answers: &WorkerAnswers, module: &str, database: Database) -> Result<ScaffoldPlan> {
    answers.validate()?;
    let name = answers.name.trim();
    let (package, kebab) = component_paths("worker name", name)?;

    let ctx = TemplateContext::new(name)
        .with_module(module)
        .with_app_type(AppType::Worker)
        .with_messaging(answers.messaging)
        .with_database(database);

    let main_template = match answers.messaging {
        Messaging::Kafka => TemplateId::WorkerKafka,
        Messaging::RabbitMq => TemplateId::WorkerRabbitMq,
    };

    let mut plan = ScaffoldPlan::default();
    plan.write(format!("cmd/worker/{}/main.go", package), main_template, &ctx);
    plan.write(
        format!("internal/{}/{}.handler.go", package, kebab),
        TemplateId::WorkerHandler,
        &ctx,
    );
    Ok(plan)
}

pub fn plan_controller(answers: &ControllerAnswers) -> Result<ScaffoldPlan> {
    answers.validate()?;
    let name = answers.name.trim();
    let (package, kebab) = component_paths("controller name", name)?;
    let ctx = TemplateContext::new(name).with_framework(answers.framework);

    let mut plan = ScaffoldPlan::default();
    plan.write(
        format!("internal/{}/{}.controller.go", package, kebab),
        TemplateId::Controller,
        &ctx,
    );
    Ok(plan)
}

pub fn plan_service(answers: &ComponentAnswers) -> Result<ScaffoldPlan> {
    answers.validate()?;
    let name = answers.name.trim();
    let (package, kebab) = component_paths("service name", name)?;
    let ctx = TemplateContext::new(name);

    let mut plan = ScaffoldPlan::default();
    plan.write(
        format!("internal/{}/{}.service.go", package, kebab),
        TemplateId::Service,
        &ctx,
    );
    Ok(plan)
}

/// Repository and entity, with bodies for the chosen database
pub fn plan_repository(answers: &RepositoryAnswers) -> Result<ScaffoldPlan> {
    answers.validate()?;
    let name = answers.name.trim();
    let (package, kebab) = component_paths("repository name", name)?;
    let ctx = TemplateContext::new(name).with_database(answers.database);

    let mut plan = ScaffoldPlan::default();
    plan.write(
        format!("internal/{}/{}.repo.go", package, kebab),
        TemplateId::Repository,
        &ctx,
    );
    plan.write(
        format!("internal/{}/{}.entity.go", package, kebab),
        TemplateId::Entity,
        &ctx,
    );
    Ok(plan)
}

/// Controller (APIs only), service and repository sharing one name
pub fn plan_di(answers: &DiAnswers) -> Result<ScaffoldPlan> {
    answers.validate()?;
    let name = answers.name.trim().to_string();

    let mut plan = ScaffoldPlan::default();
    if answers.app_type == AppType::Api {
        plan.extend(plan_controller(&ControllerAnswers {
            name: name.clone(),
            framework: answers.framework,
        })?);
    }
    plan.extend(plan_service(&ComponentAnswers { name: name.clone() })?);
    plan.extend(plan_repository(&RepositoryAnswers {
        name,
        database: answers.database,
    })?);
    Ok(plan)
}

/// `go get -u` steps for dependencies an existing go.mod does not require yet.
///
/// Without a go.mod there is no module to add them to, so nothing is planned.
pub fn plan_dependencies(needed: &[&str], gomod: Option<&GoMod>) -> ScaffoldPlan {
    let mut plan = ScaffoldPlan::default();
    if let Some(gomod) = gomod {
        for dep in needed {
            if !gomod.has_dependency(dep) {
                plan.run(PlannedCommand::go(&["get", "-u", dep]));
            }
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_answers() -> InitAnswers {
        InitAnswers {
            module: "github.com/acme/shop".to_string(),
            dockerfile: true,
            app_type: AppType::Api,
            framework: Framework::Gin,
            database: Database::Skip,
            worker: None,
        }
    }

    fn worker_answers() -> InitAnswers {
        InitAnswers {
            module: "github.com/acme/notify".to_string(),
            dockerfile: false,
            app_type: AppType::Worker,
            framework: Framework::Gin,
            database: Database::MongoDb,
            worker: Some(WorkerAnswers {
                name: "emailSender".to_string(),
                messaging: Messaging::RabbitMq,
            }),
        }
    }

    fn paths(plan: &ScaffoldPlan) -> Vec<String> {
        plan.files()
            .map(|f| f.path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    fn commands(plan: &ScaffoldPlan) -> Vec<String> {
        plan.commands().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_api_init_step_order() {
        let plan = plan_init(&api_answers(), "1.22").unwrap();
        let order: Vec<String> = plan
            .steps
            .iter()
            .map(|s| match s {
                Step::Write(f) => f.path.to_string_lossy().to_string(),
                Step::Run(c) => c.to_string(),
            })
            .collect();

        assert_eq!(
            order,
            vec![
                "go mod init github.com/acme/shop",
                "README.md",
                "git init",
                ".gitignore",
                "Dockerfile",
                "development.env",
                "production.env",
                "go get -u github.com/rs/zerolog",
                "go get -u github.com/joho/godotenv",
                "go get -u github.com/gin-gonic/gin",
                "cmd/api/main.go",
            ]
        );
    }

    #[test]
    fn test_api_init_selects_framework_template() {
        let mut answers = api_answers();
        answers.framework = Framework::Echo;
        let plan = plan_init(&answers, "1.22").unwrap();

        let main = plan.files().last().unwrap();
        assert_eq!(main.template, TemplateId::ApiEcho);
        assert!(main.context.echo && !main.context.gin);
        assert!(commands(&plan).contains(&"go get -u github.com/labstack/echo/v4".to_string()));
    }

    #[test]
    fn test_dockerfile_is_optional() {
        let mut answers = api_answers();
        answers.dockerfile = false;
        let plan = plan_init(&answers, "1.22").unwrap();
        assert!(!paths(&plan).contains(&"Dockerfile".to_string()));
    }

    #[test]
    fn test_worker_init_routes_to_worker_layout() {
        let plan = plan_init(&worker_answers(), "1.21").unwrap();

        let files = paths(&plan);
        assert!(files.contains(&"cmd/worker/emailsender/main.go".to_string()));
        assert!(files.contains(&"internal/emailsender/email-sender.handler.go".to_string()));
        assert!(!files.contains(&"cmd/api/main.go".to_string()));

        let main = plan
            .files()
            .find(|f| f.template == TemplateId::WorkerRabbitMq)
            .unwrap();
        assert_eq!(main.context.module, "github.com/acme/notify");
        assert!(main.context.mongodb);
        assert!(main.context.rabbitmq);
    }

    #[test]
    fn test_worker_init_dependencies() {
        let deps = init_dependencies(&worker_answers());
        assert_eq!(
            deps,
            vec![
                "github.com/rs/zerolog",
                "github.com/joho/godotenv",
                "github.com/rabbitmq/amqp091-go",
                "go.mongodb.org/mongo-driver/mongo",
            ]
        );
    }

    #[test]
    fn test_init_context_carries_go_version() {
        let plan = plan_init(&api_answers(), "1.21").unwrap();
        let dockerfile = plan
            .files()
            .find(|f| f.template == TemplateId::Dockerfile)
            .unwrap();
        assert_eq!(dockerfile.context.go_version, "1.21");
    }

    #[test]
    fn test_init_rejects_empty_module() {
        let mut answers = api_answers();
        answers.module = "  ".to_string();
        assert!(matches!(
            plan_init(&answers, "1.22"),
            Err(ScaffoldError::MissingAnswer("module name"))
        ));
    }

    #[test]
    fn test_repository_writes_repo_and_entity() {
        let plan = plan_repository(&RepositoryAnswers {
            name: "UserProfile".to_string(),
            database: Database::Postgres,
        })
        .unwrap();

        assert_eq!(
            paths(&plan),
            vec![
                "internal/userprofile/user-profile.repo.go",
                "internal/userprofile/user-profile.entity.go",
            ]
        );
        assert!(plan.files().all(|f| f.context.postgres));
        assert!(plan.commands().next().is_none());
    }

    #[test]
    fn test_di_for_api_includes_controller() {
        let plan = plan_di(&DiAnswers {
            app_type: AppType::Api,
            name: "order".to_string(),
            database: Database::MongoDb,
            framework: Framework::Echo,
        })
        .unwrap();

        assert_eq!(
            paths(&plan),
            vec![
                "internal/order/order.controller.go",
                "internal/order/order.service.go",
                "internal/order/order.repo.go",
                "internal/order/order.entity.go",
            ]
        );
        assert!(plan.files().next().unwrap().context.echo);
    }

    #[test]
    fn test_di_for_worker_skips_controller() {
        let plan = plan_di(&DiAnswers {
            app_type: AppType::Worker,
            name: "order".to_string(),
            database: Database::Skip,
            framework: Framework::Gin,
        })
        .unwrap();

        let files = paths(&plan);
        assert_eq!(files.len(), 3);
        assert!(!files.iter().any(|p| p.ends_with(".controller.go")));
    }

    #[test]
    fn test_name_without_identifier_chars_is_rejected() {
        let err = plan_service(&ComponentAnswers {
            name: "___".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidName { .. }));
    }

    #[test]
    fn test_name_starting_with_digit_is_rejected() {
        for name in ["3dModel", "_3d", "42"] {
            let err = plan_controller(&ControllerAnswers {
                name: name.to_string(),
                framework: Framework::Gin,
            })
            .unwrap_err();
            assert!(
                matches!(err, ScaffoldError::InvalidName { field: "controller name", .. }),
                "{} should be rejected",
                name
            );
        }

        let err = plan_worker(
            &WorkerAnswers {
                name: "2fa-mailer".to_string(),
                messaging: Messaging::Kafka,
            },
            "github.com/acme/shop",
            Database::Skip,
        )
        .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidName { .. }));

        // digits after the first letter are fine
        let plan = plan_service(&ComponentAnswers {
            name: "model3d".to_string(),
        })
        .unwrap();
        assert_eq!(paths(&plan), vec!["internal/model3d/model3d.service.go"]);
    }

    #[test]
    fn test_plan_dependencies_skips_present_modules() {
        let gomod = GoMod::parse(
            "module github.com/acme/shop\n\nrequire github.com/gin-gonic/gin v1.9.1\n",
        );
        let plan = plan_dependencies(
            &["github.com/gin-gonic/gin", "github.com/jackc/pgx/v5"],
            Some(&gomod),
        );
        assert_eq!(commands(&plan), vec!["go get -u github.com/jackc/pgx/v5"]);

        assert!(plan_dependencies(&["github.com/jackc/pgx/v5"], None).is_empty());
    }

    #[test]
    fn test_needs_reports_tools() {
        let plan = plan_init(&api_answers(), "1.22").unwrap();
        assert!(plan.needs(Tool::Go));
        assert!(plan.needs(Tool::Git));

        let plan = plan_service(&ComponentAnswers {
            name: "user".to_string(),
        })
        .unwrap();
        assert!(!plan.needs(Tool::Go));
    }

    #[test]
    fn test_existing_files_detects_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("internal/user")).unwrap();
        std::fs::write(dir.path().join("internal/user/user.service.go"), "package user").unwrap();

        let plan = plan_di(&DiAnswers {
            app_type: AppType::Worker,
            name: "user".to_string(),
            database: Database::Skip,
            framework: Framework::Gin,
        })
        .unwrap();

        assert_eq!(
            plan.existing_files(dir.path()),
            vec![PathBuf::from("internal/user/user.service.go")]
        );
    }
}
