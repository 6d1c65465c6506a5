use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use glr::{BuildState, Client, Job, ListOptions, ListRunnerJobsOptions, RequestOption};
use prettytable::{cell, format, row, Table};

use crate::format::{format_bytes, format_seconds, format_status, format_timestamp};

#[allow(clippy::too_many_arguments)]
pub async fn runner_jobs(
    client: &Client,
    options: &[RequestOption],
    id: u64,
    status: Option<BuildState>,
    max_age: Option<Duration>,
    page: Option<u32>,
    per_page: u32,
    json: bool,
) -> Result<()> {
    let opt = ListRunnerJobsOptions {
        list: ListOptions {
            page,
            per_page: Some(per_page),
        },
        status,
    };
    let (jobs, resp) = client
        .runners()
        .list_runner_jobs(id, Some(&opt), options)
        .await?;

    let now = Utc::now();
    let jobs: Vec<Job> = match max_age {
        Some(max_age) => jobs
            .into_iter()
            .filter(|j| within(j.created_at.as_ref(), max_age, now))
            .collect(),
        None => jobs,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row![
        "ID", "Status", "Project", "Ref", "Stage", "Name", "Created", "Duration", "Artifacts"
    ]);

    for j in &jobs {
        let project = j
            .project
            .as_ref()
            .map_or("-", |p| p.path_with_namespace.as_str());
        table.add_row(row![
            cell![&j.id.to_string()],
            cell![&format_status(&j.status)],
            cell![project],
            cell![&j.rref],
            cell![&j.stage],
            cell![&j.name],
            cell![&format_timestamp(j.created_at.as_ref())],
            cell![&j.duration.map_or("-".to_string(), format_seconds)],
            cell![&format_bytes(j.artifacts_size())],
        ]);
    }

    table.printstd();
    println!(
        "{} jobs shown, {} total",
        jobs.len(),
        resp.total_items.map_or("?".to_string(), |t| t.to_string())
    );

    Ok(())
}

// Jobs without a creation time are never filtered out
fn within(created_at: Option<&DateTime<Utc>>, max_age: Duration, now: DateTime<Utc>) -> bool {
    match created_at {
        Some(created_at) => (now - *created_at)
            .to_std()
            .map_or(true, |age| age <= max_age),
        None => true,
    }
}
