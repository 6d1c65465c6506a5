use anyhow::Result;
use colored::*;
use glr::{Client, EnableProjectRunnerOptions, Id, RequestOption};

pub async fn enable_runner(
    client: &Client,
    options: &[RequestOption],
    project: Id,
    runner_id: u64,
    json: bool,
) -> Result<()> {
    let (runner, _) = client
        .runners()
        .enable_project_runner(&project, &EnableProjectRunnerOptions { runner_id }, options)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&runner)?);
    } else {
        println!(
            "Runner {} ({}) enabled in {}",
            runner.id,
            runner.description,
            project.to_string().bold()
        );
    }
    Ok(())
}

pub async fn disable_runner(
    client: &Client,
    options: &[RequestOption],
    project: Id,
    runner_id: u64,
) -> Result<()> {
    client
        .runners()
        .disable_project_runner(&project, runner_id, options)
        .await?;
    println!("Runner {} disabled in {}", runner_id, project.to_string().bold());
    Ok(())
}
