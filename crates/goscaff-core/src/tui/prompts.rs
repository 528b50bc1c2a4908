//! Charm-style CLI prompts using cliclack

use crate::answers::{
    AppType, Choice, ComponentAnswers, ControllerAnswers, Database, DiAnswers, Framework,
    InitAnswers, Messaging, RepositoryAnswers, WorkerAnswers,
};
use crate::config::{AnswersPreset, Toolchain};
use crate::executor::{self, ExecutionReport};
use crate::gomod::GoMod;
use crate::plan::{self, ScaffoldPlan, Step};
use crate::runtime::{self, CommandRunner, SkipRunner, SystemRunner, Tool};
use crate::templates::Renderer;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which scaffold to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Init,
    Worker,
    Controller,
    Service,
    Repository,
    Di,
}

impl Generator {
    fn title(&self) -> &'static str {
        match self {
            Generator::Init => "Create a Go project",
            Generator::Worker => "Add a worker",
            Generator::Controller => "Add a controller",
            Generator::Service => "Add a service",
            Generator::Repository => "Add a repository",
            Generator::Di => "Add a controller, service and repository",
        }
    }
}

/// Arguments shared by every generator
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub generator: Generator,

    /// Answers given as command-line flags
    pub answers: AnswersPreset,

    /// YAML file with more answers; flags win over it
    pub answers_file: Option<PathBuf>,

    /// Project directory
    pub directory: Option<PathBuf>,

    /// Accept defaults for confirmations and defaulted selects
    pub yes: bool,

    /// Write files only, do not run go/git
    pub skip_commands: bool,

    /// Do not check that go/git are installed
    pub skip_checks: bool,
}

impl GenerateArgs {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator,
            answers: AnswersPreset::default(),
            answers_file: None,
            directory: None,
            yes: false,
            skip_commands: false,
            skip_checks: false,
        }
    }
}

/// Run one generator with interactive prompts
pub async fn run(args: GenerateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(format!("goscaff {} - {}", cli_version, args.generator.title()))?;

    // Step 1: Merge flag answers with the preset file
    let preset = load_preset(&args)?;

    // Step 2: Resolve the project directory
    let project_dir = select_directory(&args)?;
    let gomod = GoMod::read(&project_dir)?;

    let toolchain = Toolchain::from_env();
    let check_tools = !args.skip_commands && !args.skip_checks;

    // Step 3: Ask the remaining questions and route them to a plan
    let plan = match args.generator {
        Generator::Init => {
            if gomod.is_some() {
                anyhow::bail!(
                    "{} already contains a go.mod. Use the worker/controller/service/repo/di commands to extend it.",
                    project_dir.display()
                );
            }
            let go_version = if check_tools {
                check_toolchain(&toolchain, true, true)?
            } else {
                None
            };
            let answers = ask_init(&preset, args.yes)?;
            plan::plan_init(
                &answers,
                &runtime::dockerfile_go_version(go_version.as_deref()),
            )?
        }
        Generator::Worker => plan_worker(&preset, gomod.as_ref(), args.yes)?,
        Generator::Controller => plan_controller(&preset, gomod.as_ref(), args.yes)?,
        Generator::Service => plan_service(&preset)?,
        Generator::Repository => plan_repository(&preset, gomod.as_ref(), args.yes)?,
        Generator::Di => plan_di(&preset, gomod.as_ref(), args.yes)?,
    };

    if args.generator != Generator::Init {
        if gomod.is_none() {
            cliclack::log::warning(format!(
                "No go.mod found in {}. Files will be written, but run `goscaff init` to set up the module.",
                project_dir.display()
            ))?;
        }
        if check_tools && (plan.needs(Tool::Go) || plan.needs(Tool::Git)) {
            check_toolchain(&toolchain, plan.needs(Tool::Go), plan.needs(Tool::Git))?;
        }
        confirm_overwrites(&plan, &project_dir, args.yes)?;
    }

    // Step 4: Write files and run commands
    let report = if args.skip_commands {
        let mut runner = SkipRunner::default();
        let report = apply(&plan, &project_dir, &mut runner).await?;
        if !runner.skipped.is_empty() {
            cliclack::log::info(format!(
                "Skipped commands (run them yourself):\n{}",
                runner.skipped.join("\n")
            ))?;
        }
        report
    } else {
        let mut runner = SystemRunner::new(toolchain);
        apply(&plan, &project_dir, &mut runner).await?
    };

    // Step 5: Show next steps
    print_next_steps(args.generator, &plan, &project_dir, &report, args.skip_commands)?;

    Ok(())
}

fn load_preset(args: &GenerateArgs) -> Result<AnswersPreset> {
    match &args.answers_file {
        Some(path) => {
            let file = AnswersPreset::load(path)?;
            cliclack::log::info(format!("Using answers from {}", path.display()))?;
            Ok(args.answers.clone().or(file))
        }
        None => Ok(args.answers.clone()),
    }
}

fn select_directory(args: &GenerateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let absolutize = |p: PathBuf| if p.is_absolute() { p } else { current_dir.join(p) };

    let path = if let Some(dir) = &args.directory {
        let p = absolutize(dir.clone());
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.generator == Generator::Init && !args.yes {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir.clone()
        } else {
            absolutize(PathBuf::from(&input))
        }
    } else {
        current_dir.clone()
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if a new project goes into a directory that has files
    if args.generator == Generator::Init && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

/// Required free-text answer; a preset value skips the prompt
fn ask_text(prompt: &str, placeholder: &str, preset: Option<&str>) -> Result<String> {
    if let Some(value) = preset.map(str::trim).filter(|v| !v.is_empty()) {
        cliclack::log::info(format!("{} {}", prompt, value))?;
        return Ok(value.to_string());
    }

    let value: String = cliclack::input(prompt)
        .placeholder(placeholder)
        .validate(|input: &String| {
            if input.trim().is_empty() {
                Err("This field is required")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(value.trim().to_string())
}

/// Select among a fixed enum; `default` is preselected and taken as-is with --yes
fn ask_choice<C>(prompt: &str, preset: Option<C>, default: Option<C>, yes: bool) -> Result<C>
where
    C: Choice + fmt::Display,
{
    if let Some(value) = preset {
        cliclack::log::info(format!("{} {}", prompt, value))?;
        return Ok(value);
    }

    if let (true, Some(value)) = (yes, default) {
        cliclack::log::info(format!("{} {} (default)", prompt, value))?;
        return Ok(value);
    }

    let mut select = cliclack::select(prompt);
    for choice in C::ALL {
        select = select.item(*choice, choice.display_name(), "");
    }
    if let Some(value) = default {
        select = select.initial_value(value);
    }

    Ok(select.interact()?)
}

fn ask_confirm(prompt: &str, preset: Option<bool>, default: bool, yes: bool) -> Result<bool> {
    if let Some(value) = preset {
        return Ok(value);
    }
    if yes {
        return Ok(default);
    }
    Ok(cliclack::confirm(prompt).initial_value(default).interact()?)
}

fn ask_init(preset: &AnswersPreset, yes: bool) -> Result<InitAnswers> {
    let module = ask_text("Module name:", "github.com/acme/service", preset.module.as_deref())?;
    let dockerfile = ask_confirm("Generate Dockerfile?", preset.dockerfile, false, yes)?;
    let app_type = ask_choice("Choose type:", preset.app_type, None, yes)?;

    let (framework, worker) = match app_type {
        AppType::Api => {
            let framework =
                ask_choice("Web framework:", preset.framework, Some(Framework::default()), yes)?;
            (framework, None)
        }
        AppType::Worker => {
            let name = ask_text("Worker name:", "email-sender", preset.name.as_deref())?;
            let messaging =
                ask_choice("Messaging:", preset.messaging, Some(Messaging::default()), yes)?;
            (Framework::default(), Some(WorkerAnswers { name, messaging }))
        }
    };

    let database = ask_choice("Database:", preset.database, Some(Database::default()), yes)?;

    let answers = InitAnswers {
        module,
        dockerfile,
        app_type,
        framework,
        database,
        worker,
    };
    answers.validate()?;
    Ok(answers)
}

fn plan_worker(preset: &AnswersPreset, gomod: Option<&GoMod>, yes: bool) -> Result<ScaffoldPlan> {
    let module = match gomod.filter(|g| !g.module.is_empty()) {
        Some(g) => g.module.clone(),
        None => ask_text("Module name:", "github.com/acme/service", preset.module.as_deref())?,
    };
    let name = ask_text("Worker name:", "email-sender", preset.name.as_deref())?;
    let messaging = ask_choice(
        "Messaging:",
        preset.messaging,
        Some(gomod.and_then(GoMod::messaging).unwrap_or_default()),
        yes,
    )?;
    let database = preset
        .database
        .or_else(|| gomod.and_then(GoMod::database))
        .unwrap_or_default();

    let mut plan = plan::plan_worker(&WorkerAnswers { name, messaging }, &module, database)?;
    plan.extend(plan::plan_dependencies(
        &[plan::messaging_dependency(messaging)],
        gomod,
    ));
    Ok(plan)
}

fn plan_controller(
    preset: &AnswersPreset,
    gomod: Option<&GoMod>,
    yes: bool,
) -> Result<ScaffoldPlan> {
    let name = ask_text("Controller Name:", "user", preset.name.as_deref())?;
    let framework = ask_choice(
        "Web framework:",
        preset.framework,
        Some(gomod.and_then(GoMod::framework).unwrap_or_default()),
        yes,
    )?;

    let mut plan = plan::plan_controller(&ControllerAnswers { name, framework })?;
    plan.extend(plan::plan_dependencies(
        &[plan::framework_dependency(framework)],
        gomod,
    ));
    Ok(plan)
}

fn plan_service(preset: &AnswersPreset) -> Result<ScaffoldPlan> {
    let name = ask_text("Service Name:", "user", preset.name.as_deref())?;
    Ok(plan::plan_service(&ComponentAnswers { name })?)
}

fn plan_repository(
    preset: &AnswersPreset,
    gomod: Option<&GoMod>,
    yes: bool,
) -> Result<ScaffoldPlan> {
    let database = ask_choice(
        "Database:",
        preset.database,
        Some(gomod.and_then(GoMod::database).unwrap_or_default()),
        yes,
    )?;
    let name = ask_text("Repository Name:", "user", preset.name.as_deref())?;

    let mut plan = plan::plan_repository(&RepositoryAnswers { name, database })?;
    let deps: Vec<&str> = plan::database_dependency(database).into_iter().collect();
    plan.extend(plan::plan_dependencies(&deps, gomod));
    Ok(plan)
}

fn plan_di(preset: &AnswersPreset, gomod: Option<&GoMod>, yes: bool) -> Result<ScaffoldPlan> {
    let detected_type = gomod.and_then(|g| {
        if g.framework().is_some() {
            Some(AppType::Api)
        } else if g.messaging().is_some() {
            Some(AppType::Worker)
        } else {
            None
        }
    });
    let app_type = ask_choice("Choose type:", preset.app_type, detected_type, yes)?;
    let name = ask_text("Component Name:", "user", preset.name.as_deref())?;
    let database = ask_choice(
        "Database:",
        preset.database,
        Some(gomod.and_then(GoMod::database).unwrap_or_default()),
        yes,
    )?;
    let framework = match app_type {
        AppType::Api => ask_choice(
            "Web framework:",
            preset.framework,
            Some(gomod.and_then(GoMod::framework).unwrap_or_default()),
            yes,
        )?,
        AppType::Worker => Framework::default(),
    };

    let mut plan = plan::plan_di(&DiAnswers {
        app_type,
        name,
        database,
        framework,
    })?;

    let mut deps = Vec::new();
    if app_type == AppType::Api {
        deps.push(plan::framework_dependency(framework));
    }
    deps.extend(plan::database_dependency(database));
    plan.extend(plan::plan_dependencies(&deps, gomod));
    Ok(plan)
}

/// Check go/git availability; returns the Go version when Go was checked
fn check_toolchain(toolchain: &Toolchain, needs_go: bool, needs_git: bool) -> Result<Option<String>> {
    let spinner = cliclack::spinner();
    spinner.start("Checking toolchain...");

    match runtime::check_toolchain(toolchain, needs_go, needs_git) {
        Ok(tools) => {
            let info: Vec<String> = tools
                .iter()
                .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected: {}", info.join(", ")));

            let go_version = tools
                .iter()
                .find(|t| t.name == "Go")
                .and_then(|t| t.version.clone());
            if let Some(warning) = go_version
                .as_deref()
                .and_then(|v| runtime::go_version_warning(v, runtime::MIN_GO_VERSION))
            {
                cliclack::log::warning(warning)?;
            }
            Ok(go_version)
        }
        Err(e) => {
            spinner.error("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools (or pass --skip-commands) and try again.");
        }
    }
}

fn confirm_overwrites(plan: &ScaffoldPlan, project_dir: &Path, yes: bool) -> Result<()> {
    let existing = plan.existing_files(project_dir);
    if existing.is_empty() {
        return Ok(());
    }

    let listed: Vec<String> = existing
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect();
    cliclack::log::warning(format!("These files will be overwritten:\n{}", listed.join("\n")))?;

    let confirm = if yes {
        true
    } else {
        cliclack::confirm("Overwrite them?")
            .initial_value(false)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(())
}

async fn apply<R: CommandRunner>(
    plan: &ScaffoldPlan,
    project_dir: &Path,
    runner: &mut R,
) -> Result<ExecutionReport> {
    let renderer = Renderer::new().context("Failed to load embedded templates")?;

    let spinner = cliclack::spinner();
    spinner.start("Scaffolding...");

    let result = executor::execute(plan, project_dir, &renderer, runner, |step| match step {
        Step::Write(file) => spinner.set_message(format!("Writing {}", file.path.display())),
        Step::Run(command) => spinner.set_message(format!("Running {}", command)),
    })
    .await;

    match result {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.written.len(),
                project_dir.display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.error("Scaffolding failed");
            Err(e.into())
        }
    }
}

fn print_next_steps(
    generator: Generator,
    plan: &ScaffoldPlan,
    project_dir: &Path,
    report: &ExecutionReport,
    skipped_commands: bool,
) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }

    if skipped_commands && !report.commands_run.is_empty() {
        steps.push("Run the skipped commands listed above".to_string());
    }

    match generator {
        Generator::Init => {
            steps.push("go mod tidy".to_string());
            let entry = plan
                .files()
                .find(|f| f.path.ends_with("main.go"))
                .and_then(|f| f.path.parent())
                .map(|p| format!("go run ./{}", p.display()));
            if let Some(entry) = entry {
                steps.push(entry);
            }
        }
        _ => {
            let names: Vec<String> = plan
                .files()
                .filter_map(|f| f.path.parent().and_then(|p| p.file_name()))
                .map(|n| n.to_string_lossy().to_string())
                .collect();
            if let Some(package) = names.first() {
                steps.push(format!(
                    "Wire the {} package into your entry point",
                    package.cyan()
                ));
            }
            steps.push("go mod tidy".to_string());
        }
    }

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
