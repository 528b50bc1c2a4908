//! Applying a plan: render and write files, run commands, in plan order

use crate::error::{Result, ScaffoldError};
use crate::plan::{ScaffoldPlan, Step};
use crate::runtime::CommandRunner;
use crate::templates::Renderer;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What an execution did, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Written files, relative to the project directory
    pub written: Vec<PathBuf>,
    /// Commands run, as displayed to the user
    pub commands_run: Vec<String>,
}

/// Execute every step of `plan` inside `project_dir`.
///
/// `on_step` is called before each step so callers can report progress.
/// The first failure stops the run; files already written stay on disk.
pub async fn execute<R, F>(
    plan: &ScaffoldPlan,
    project_dir: &Path,
    renderer: &Renderer,
    runner: &mut R,
    mut on_step: F,
) -> Result<ExecutionReport>
where
    R: CommandRunner,
    F: FnMut(&Step),
{
    fs::create_dir_all(project_dir)
        .await
        .map_err(|e| ScaffoldError::io("Failed to create directory", project_dir, e))?;

    let mut report = ExecutionReport::default();

    for step in &plan.steps {
        on_step(step);
        match step {
            Step::Write(file) => {
                let content = renderer.render(file.template, &file.context)?;
                let target = project_dir.join(&file.path);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|e| ScaffoldError::io("Failed to create directory", parent, e))?;
                }
                fs::write(&target, content)
                    .await
                    .map_err(|e| ScaffoldError::io("Failed to write file", &target, e))?;
                tracing::debug!(path = %file.path.display(), template = file.template.name(), "wrote file");
                report.written.push(file.path.clone());
            }
            Step::Run(command) => {
                runner.run(project_dir, command).await?;
                report.commands_run.push(command.to_string());
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{ComponentAnswers, Database, RepositoryAnswers};
    use crate::plan::{self, PlannedCommand};

    /// Runner that records commands and fails on a chosen one
    #[derive(Default)]
    struct RecordingRunner {
        seen: Vec<String>,
        fail_on: Option<String>,
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&mut self, _cwd: &Path, command: &PlannedCommand) -> Result<()> {
            let shown = command.to_string();
            self.seen.push(shown.clone());
            if self.fail_on.as_deref() == Some(shown.as_str()) {
                return Err(ScaffoldError::CommandFailed {
                    command: shown,
                    output: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_writes_files_into_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan::plan_repository(&RepositoryAnswers {
            name: "order".to_string(),
            database: Database::MongoDb,
        })
        .unwrap();

        let mut runner = RecordingRunner::default();
        let report = execute(&plan, dir.path(), &Renderer::new().unwrap(), &mut runner, |_| {})
            .await
            .unwrap();

        assert_eq!(report.written.len(), 2);
        let repo = std::fs::read_to_string(dir.path().join("internal/order/order.repo.go")).unwrap();
        assert!(repo.contains("type OrderRepository interface"));
        assert!(runner.seen.is_empty());
    }

    #[tokio::test]
    async fn test_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("internal/user/user.service.go");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, "stale").unwrap();

        let plan = plan::plan_service(&ComponentAnswers {
            name: "user".to_string(),
        })
        .unwrap();
        execute(&plan, dir.path(), &Renderer::new().unwrap(), &mut RecordingRunner::default(), |_| {})
            .await
            .unwrap();

        let content = std::fs::read_to_string(target).unwrap();
        assert!(content.starts_with("package user"));
    }

    #[tokio::test]
    async fn test_stops_at_first_failed_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut plan = ScaffoldPlan::default();
        plan.steps.push(Step::Run(PlannedCommand::git(&["init"])));
        plan.extend(
            plan::plan_service(&ComponentAnswers {
                name: "user".to_string(),
            })
            .unwrap(),
        );

        let mut runner = RecordingRunner {
            fail_on: Some("git init".to_string()),
            ..Default::default()
        };
        let mut steps_seen = 0;
        let err = execute(&plan, dir.path(), &Renderer::new().unwrap(), &mut runner, |_| {
            steps_seen += 1
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ScaffoldError::CommandFailed { .. }));
        assert_eq!(steps_seen, 1);
        assert!(!dir.path().join("internal").exists());
    }

    #[tokio::test]
    async fn test_creates_missing_project_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("new-service");
        let plan = plan::plan_service(&ComponentAnswers {
            name: "billing".to_string(),
        })
        .unwrap();

        execute(&plan, &project, &Renderer::new().unwrap(), &mut RecordingRunner::default(), |_| {})
            .await
            .unwrap();
        assert!(project.join("internal/billing/billing.service.go").exists());
    }
}
