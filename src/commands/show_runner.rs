use anyhow::Result;
use glr::{Client, RequestOption, RunnerDetails};
use prettytable::{format, row, table, Table};

use crate::format::{format_online, format_status, format_timestamp, opt};

pub async fn show_runner(
    client: &Client,
    options: &[RequestOption],
    id: u64,
    json: bool,
) -> Result<()> {
    let (details, _) = client.runners().get_runner_details(id, options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print_runner_details(&details);
    }

    Ok(())
}

pub fn print_runner_details(d: &RunnerDetails) {
    let mut project_table = d
        .projects
        .iter()
        .map(|p| row!(p.id, p.path_with_namespace))
        .collect::<Table>();
    project_table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    project_table.set_titles(row!("id", "project"));

    let mut table = table!(
        ["ID", d.id],
        ["Description", d.description],
        ["Name", opt(d.name.as_deref())],
        ["Status", format_status(&d.status)],
        ["Online", format_online(d.online)],
        ["Active", d.active],
        ["Shared", d.is_shared],
        ["Access level", d.access_level],
        ["Tags", d.tag_list.join(", ")],
        ["Version", opt(d.version.as_deref())],
        ["Revision", opt(d.revision.as_deref())],
        ["Platform", opt(d.platform.as_deref())],
        ["Architecture", opt(d.architecture.as_deref())],
        ["Contacted at", format_timestamp(d.contacted_at.as_ref())],
        ["Projects", project_table]
    );

    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.printstd();
}
