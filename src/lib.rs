//! GitLab CI runner client
//!
//! Typed bindings for the runner endpoints of the GitLab v4 REST API. Each
//! operation of [`RunnersService`] maps onto exactly one endpoint.
//!
//! # Example
//!
//! ```no_run
//! use glr::{Client, ListRunnersOptions, RunnerScope};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::new("https://gitlab.example.com", "glpat-xxxx")?;
//!
//!     let opt = ListRunnersOptions {
//!         scope: Some(RunnerScope::Online),
//!         ..Default::default()
//!     };
//!     let (runners, resp) = client.runners().list_runners(Some(&opt), &[]).await?;
//!     println!("{} of {:?} runners", runners.len(), resp.total_items);
//!
//!     client.runners().disable_project_runner("group/project", 7u64, &[]).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod id;
pub mod job;
pub mod options;
pub mod project;
pub mod runner;

pub use client::{Client, Response};
pub use error::{Error, Result};
pub use id::Id;
pub use job::{Artifact, BuildState, Job, JobPipeline};
pub use options::{ListOptions, RequestOption};
pub use project::ProjectSummary;
pub use runner::{
    AccessLevel, EnableProjectRunnerOptions, ListProjectRunnersOptions, ListRunnerJobsOptions,
    ListRunnersOptions, Runner, RunnerDetails, RunnerScope, RunnersService,
    UpdateRunnerDetailsOptions,
};
