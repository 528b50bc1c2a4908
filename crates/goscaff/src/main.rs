//! goscaff CLI - Project scaffolding for Go API and worker services

use clap::{Args as ClapArgs, Parser, Subcommand};
use goscaff_core::config::AnswersPreset;
use goscaff_core::tui::{GenerateArgs, Generator};
use goscaff_core::{AppType, Database, Framework, Messaging};
use goscaff_core::ScaffoldError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a choice flag, keeping the accepted spellings in the error
fn choice<C: FromStr<Err = ScaffoldError>>(value: &str) -> Result<C, String> {
    C::from_str(value).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "goscaff")]
#[command(about = "Interactive CLI for scaffolding Go API and worker services")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GlobalArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub directory: Option<PathBuf>,

    /// YAML file with answers; flags take precedence over it
    #[arg(long = "answers", global = true)]
    pub answers_file: Option<PathBuf>,

    /// Auto-confirm prompts and accept defaults where one exists
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Write files only; do not run go or git
    #[arg(long = "skip-commands", global = true)]
    pub skip_commands: bool,

    /// Do not check that go and git are installed
    #[arg(long = "skip-checks", global = true)]
    pub skip_checks: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Go project (go.mod, git, env files, entry point)
    Init(InitArgs),
    /// Add a worker entry point and message handler
    Worker(WorkerArgs),
    /// Add a controller
    Controller(ControllerArgs),
    /// Add a service
    Service(NameArgs),
    /// Add a repository and its entity
    Repo(RepoArgs),
    /// Add a controller, service and repository sharing one name
    #[command(name = "di", alias = "DI")]
    Di(DiArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct InitArgs {
    /// Go module path, e.g. github.com/acme/shop
    #[arg(short, long)]
    pub module: Option<String>,

    /// Application type: api or worker
    #[arg(short = 't', long = "type", value_parser = choice::<AppType>)]
    pub app_type: Option<AppType>,

    /// Generate a Dockerfile
    #[arg(long, overrides_with = "no_dockerfile")]
    pub dockerfile: bool,

    /// Do not generate a Dockerfile
    #[arg(long = "no-dockerfile", overrides_with = "dockerfile")]
    pub no_dockerfile: bool,

    /// Web framework for APIs: gin or echo
    #[arg(short, long, value_parser = choice::<Framework>)]
    pub framework: Option<Framework>,

    /// Database: skip, mongodb or postgres
    #[arg(long, value_parser = choice::<Database>)]
    pub database: Option<Database>,

    /// Worker name (worker projects only)
    #[arg(long = "worker-name")]
    pub worker_name: Option<String>,

    /// Messaging for workers: kafka or rabbitmq
    #[arg(long, value_parser = choice::<Messaging>)]
    pub messaging: Option<Messaging>,
}

impl From<InitArgs> for AnswersPreset {
    fn from(args: InitArgs) -> Self {
        let dockerfile = match (args.dockerfile, args.no_dockerfile) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };
        AnswersPreset {
            module: args.module,
            app_type: args.app_type,
            dockerfile,
            framework: args.framework,
            database: args.database,
            messaging: args.messaging,
            name: args.worker_name,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct NameArgs {
    /// Component name
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct WorkerArgs {
    /// Worker name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Messaging: kafka or rabbitmq
    #[arg(long, value_parser = choice::<Messaging>)]
    pub messaging: Option<Messaging>,

    /// Go module path, when there is no go.mod to read it from
    #[arg(short, long)]
    pub module: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ControllerArgs {
    /// Controller name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Web framework: gin or echo
    #[arg(short, long, value_parser = choice::<Framework>)]
    pub framework: Option<Framework>,
}

#[derive(ClapArgs, Debug)]
pub struct RepoArgs {
    /// Repository name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Database: skip, mongodb or postgres
    #[arg(long, value_parser = choice::<Database>)]
    pub database: Option<Database>,
}

#[derive(ClapArgs, Debug)]
pub struct DiArgs {
    /// Application type: api or worker
    #[arg(short = 't', long = "type", value_parser = choice::<AppType>)]
    pub app_type: Option<AppType>,

    /// Component name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Database: skip, mongodb or postgres
    #[arg(long, value_parser = choice::<Database>)]
    pub database: Option<Database>,

    /// Web framework: gin or echo
    #[arg(short, long, value_parser = choice::<Framework>)]
    pub framework: Option<Framework>,
}

impl Command {
    /// Split into the generator to run and the answers given as flags
    fn into_parts(self) -> (Generator, AnswersPreset) {
        match self {
            Command::Init(args) => (Generator::Init, args.into()),
            Command::Worker(args) => (
                Generator::Worker,
                AnswersPreset {
                    name: args.name,
                    messaging: args.messaging,
                    module: args.module,
                    ..Default::default()
                },
            ),
            Command::Controller(args) => (
                Generator::Controller,
                AnswersPreset {
                    name: args.name,
                    framework: args.framework,
                    ..Default::default()
                },
            ),
            Command::Service(args) => (
                Generator::Service,
                AnswersPreset {
                    name: args.name,
                    ..Default::default()
                },
            ),
            Command::Repo(args) => (
                Generator::Repository,
                AnswersPreset {
                    name: args.name,
                    database: args.database,
                    ..Default::default()
                },
            ),
            Command::Di(args) => (
                Generator::Di,
                AnswersPreset {
                    app_type: args.app_type,
                    name: args.name,
                    database: args.database,
                    framework: args.framework,
                    ..Default::default()
                },
            ),
        }
    }
}

fn generate_args(global: GlobalArgs, command: Option<Command>) -> GenerateArgs {
    // No subcommand provided, default to init (interactive mode)
    let (generator, answers) = command
        .map(Command::into_parts)
        .unwrap_or((Generator::Init, AnswersPreset::default()));

    GenerateArgs {
        generator,
        answers,
        answers_file: global.answers_file,
        directory: global.directory,
        yes: global.yes,
        skip_commands: global.skip_commands,
        skip_checks: global.skip_checks,
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// One-line summary of an error and its causes, outermost first
fn failure_message(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.global.verbose);
    tracing::debug!(?args, "parsed arguments");

    let generate = generate_args(args.global, args.command);
    let result = goscaff_core::run(generate, CLI_VERSION).await;

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "generator failed");
            let _ = cliclack::outro_cancel(failure_message(&e));
            ExitCode::FAILURE
        }
    };

    // Ensure cursor is visible on exit
    let _ = console::Term::stderr().show_cursor();

    code
}
