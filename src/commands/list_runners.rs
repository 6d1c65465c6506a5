use colored::*;
use glr::{Client, Id, ListOptions, ListRunnersOptions, RequestOption, Runner, RunnerScope};
use itertools::Itertools;
use prettytable::{cell, format, row, Table};

use crate::format::{format_online, format_status, opt};
use anyhow::Result;
use futures::future::try_join_all;

pub enum RunnerSource {
    Owned,
    All,
    Project(Id),
}

#[allow(clippy::too_many_arguments)]
pub async fn list_runners(
    client: &Client,
    options: &[RequestOption],
    source: RunnerSource,
    scope: Option<RunnerScope>,
    page: Option<u32>,
    per_page: Option<u32>,
    details: bool,
    json: bool,
) -> Result<()> {
    let list_opt = ListRunnersOptions {
        list: ListOptions { page, per_page },
        scope,
    };

    let service = client.runners();
    let (runners, resp) = match source {
        RunnerSource::Owned => service.list_runners(Some(&list_opt), options).await?,
        RunnerSource::All => service.list_all_runners(Some(&list_opt), options).await?,
        RunnerSource::Project(project) => {
            service
                .list_project_runners(project, Some(&list_opt), options)
                .await?
        }
    };
    let runners: Vec<Runner> = runners.into_iter().sorted_by_key(|r| r.id).collect();

    if details {
        print_details(client, options, &runners, json).await?;
    } else if json {
        println!("{}", serde_json::to_string_pretty(&runners)?);
    } else {
        print_summary(&runners);
    }

    if !json {
        if let (Some(page), Some(total)) = (resp.current_page, resp.total_pages) {
            if total > 1 {
                println!("{}", format!("page {} of {}", page, total).dimmed());
            }
        }
    }

    Ok(())
}

fn print_summary(runners: &[Runner]) {
    let mut table = Table::new();

    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["ID", "Description", "Name", "Status", "Online", "Active", "Shared"]);

    for r in runners {
        table.add_row(row![
            cell![&r.id.to_string()],
            cell![&r.description],
            cell![&opt(r.name.as_deref())],
            cell![&format_status(&r.status)],
            cell![&format_online(r.online)],
            cell![&r.active.to_string()],
            cell![&r.is_shared.to_string()],
        ]);
    }

    table.printstd();
}

async fn print_details(
    client: &Client,
    options: &[RequestOption],
    runners: &[Runner],
    json: bool,
) -> Result<()> {
    let service = client.runners();
    let runner_details: Vec<_> = runners
        .iter()
        .map(|r| service.get_runner_details(r.id, options))
        .collect();
    let runner_details: Vec<_> = try_join_all(runner_details)
        .await?
        .into_iter()
        .map(|(d, _)| d)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&runner_details)?);
        return Ok(());
    }

    let mut table = Table::new();

    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row![
        "ID",
        "Version",
        "Description",
        "Platform",
        "Tags",
        "Online",
        "Active",
        "Shared",
        "Access"
    ]);

    for d in runner_details {
        table.add_row(row![
            cell![&d.id.to_string()],
            cell![&opt(d.version.as_deref())],
            cell![&d.description],
            cell![&opt(d.platform.as_deref())],
            cell![&d.tag_list.join(", ")],
            cell![&format_online(d.online)],
            cell![&d.active.to_string()],
            cell![&d.is_shared.to_string()],
            cell![&d.access_level],
        ]);
    }

    table.printstd();

    Ok(())
}
