use std::io::{self, Write};

use clap::{Parser, Subcommand};
use glr::{AccessLevel, BuildState, Client, Id, RequestOption, RunnerScope};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands {
    pub mod list_runners;
    pub mod login;
    pub mod project_runner;
    pub mod remove_runner;
    pub mod runner_jobs;
    pub mod show_runner;
    pub mod update_runner;
}
mod credentials;
mod format;

use commands::list_runners::{list_runners, RunnerSource};
use commands::login::login;
use commands::project_runner::{disable_runner, enable_runner};
use commands::remove_runner::remove_runner;
use commands::runner_jobs::runner_jobs;
use commands::show_runner::show_runner;
use commands::update_runner::{update_runner, RunnerUpdate};
use credentials::resolve_credentials;

#[derive(Parser, Debug)]
#[command(name = "glr", about = "gitlab runner client utility")]
struct Opt {
    /// GitLab URL (overrides the credentials file)
    #[arg(long, env = "GITLAB_URL", global = true)]
    gitlab_url: Option<String>,

    /// Access token (overrides the credentials file)
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true, global = true)]
    gitlab_token: Option<String>,

    /// Run the request as another user (admin token required)
    #[arg(long, global = true)]
    sudo: Option<String>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Login to GitLab
    Login {
        /// GitLab URL
        #[arg(short = 'u', long = "url")]
        url: String,
    },

    /// List runners (own by default)
    ListRunners {
        /// List every runner of the instance (admin only)
        #[arg(short = 'a', long, conflicts_with = "project")]
        all: bool,
        /// List the runners of a project (ID or namespace/path)
        #[arg(short = 'P', long)]
        project: Option<String>,
        /// Scope ("active", "paused", "online", "offline", "specific", "shared", ...)
        #[arg(short = 's', long)]
        scope: Option<RunnerScope>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        /// Fetch details (version, tags) for each runner
        #[arg(short = 'd', long)]
        details: bool,
    },

    /// Show runner details
    ShowRunner {
        /// Runner ID
        id: u64,
    },

    /// Update runner details; only the given fields change
    UpdateRunner {
        /// Runner ID
        id: u64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        /// Replace the tag list (repeat for several tags)
        #[arg(short = 't', long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        run_untagged: Option<bool>,
        #[arg(long)]
        locked: Option<bool>,
        /// "not_protected" or "ref_protected"
        #[arg(long)]
        access_level: Option<AccessLevel>,
    },

    /// Remove a runner
    RemoveRunner {
        /// Runner ID
        id: u64,
    },

    /// List jobs processed by a runner
    RunnerJobs {
        /// Runner ID
        id: u64,
        /// Status ("running", "success", "failed", "canceled")
        #[arg(short = 's', long)]
        status: Option<BuildState>,
        /// Max history ("1h", "10m", "4d" etc)
        #[arg(short = 'm', long = "max-age")]
        max_age: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, default_value_t = 100)]
        per_page: u32,
    },

    /// Enable a runner in a project
    EnableRunner {
        /// Project ID or namespace/path
        #[arg(short = 'P', long)]
        project: String,
        /// Runner ID
        runner: u64,
    },

    /// Disable a runner from a project
    DisableRunner {
        /// Project ID or namespace/path
        #[arg(short = 'P', long)]
        project: String,
        /// Runner ID
        runner: u64,
    },
}

fn project_id(project: &str) -> Id {
    match project.parse::<u64>() {
        Ok(n) => Id::Number(n),
        Err(_) => Id::from(project),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let opt = Opt::parse();

    if let Command::Login { url } = &opt.cmd {
        login(url)?;
        return Ok(());
    }

    let creds = resolve_credentials(opt.gitlab_url, opt.gitlab_token)?;
    let client = Client::new(&creds.url, creds.token)?;
    let options: Vec<RequestOption> = opt
        .sudo
        .map(|user| RequestOption::Sudo(Id::from(user)))
        .into_iter()
        .collect();
    let json = opt.json;

    match opt.cmd {
        Command::Login { url } => {
            login(&url)?;
        }
        Command::ListRunners {
            all,
            project,
            scope,
            page,
            per_page,
            details,
        } => {
            let source = match (all, project) {
                (true, _) => RunnerSource::All,
                (false, Some(project)) => RunnerSource::Project(project_id(&project)),
                (false, None) => RunnerSource::Owned,
            };
            list_runners(&client, &options, source, scope, page, per_page, details, json).await?;
        }
        Command::ShowRunner { id } => {
            show_runner(&client, &options, id, json).await?;
        }
        Command::UpdateRunner {
            id,
            description,
            active,
            tags,
            run_untagged,
            locked,
            access_level,
        } => {
            let update = RunnerUpdate {
                description,
                active,
                tags,
                run_untagged,
                locked,
                access_level,
            };
            update_runner(&client, &options, id, update, json).await?;
        }
        Command::RemoveRunner { id } => {
            remove_runner(&client, &options, id).await?;
        }
        Command::RunnerJobs {
            id,
            status,
            max_age,
            page,
            per_page,
        } => {
            let max_age = match max_age {
                Some(max_age) => Some(parse_duration::parse(&max_age)?),
                None => None,
            };
            runner_jobs(&client, &options, id, status, max_age, page, per_page, json).await?;
        }
        Command::EnableRunner { project, runner } => {
            enable_runner(&client, &options, project_id(&project), runner, json).await?;
        }
        Command::DisableRunner { project, runner } => {
            disable_runner(&client, &options, project_id(&project), runner).await?;
        }
    }

    io::stdout().flush()?;
    Ok(())
}
