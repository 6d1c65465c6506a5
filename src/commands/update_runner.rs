use anyhow::{bail, Result};
use colored::*;
use glr::{AccessLevel, Client, RequestOption, UpdateRunnerDetailsOptions};

use crate::commands::show_runner::print_runner_details;

#[derive(Debug, Default)]
pub struct RunnerUpdate {
    pub description: Option<String>,
    pub active: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub run_untagged: Option<bool>,
    pub locked: Option<bool>,
    pub access_level: Option<AccessLevel>,
}

impl From<RunnerUpdate> for UpdateRunnerDetailsOptions {
    fn from(u: RunnerUpdate) -> Self {
        UpdateRunnerDetailsOptions {
            description: u.description,
            active: u.active,
            tag_list: u.tags,
            run_untagged: u.run_untagged,
            locked: u.locked,
            access_level: u.access_level,
        }
    }
}

pub async fn update_runner(
    client: &Client,
    options: &[RequestOption],
    id: u64,
    update: RunnerUpdate,
    json: bool,
) -> Result<()> {
    let update: UpdateRunnerDetailsOptions = update.into();
    if update == UpdateRunnerDetailsOptions::default() {
        bail!("Nothing to update, pass at least one field");
    }

    let (details, _) = client
        .runners()
        .update_runner_details(id, &update, options)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        println!("{}", format!("Runner {} updated", details.id).green());
        print_runner_details(&details);
    }

    Ok(())
}
