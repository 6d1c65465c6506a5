use chrono::{DateTime, Utc};
use colored::*;

pub fn opt(s: Option<&str>) -> String {
    s.map_or_else(|| "-".to_string(), str::to_string)
}

pub fn format_online(online: Option<bool>) -> ColoredString {
    match online {
        Some(true) => "true".green(),
        _ => "false".bright_red(),
    }
}

pub fn format_status(status: &str) -> ColoredString {
    match status {
        "success" | "online" | "active" => status.green(),
        "failed" | "offline" | "stale" => status.bright_red(),
        "running" | "pending" => status.yellow(),
        "canceled" | "paused" | "never_contacted" => status.dimmed(),
        _ => status.normal(),
    }
}

pub fn format_bytes(bytes: u64) -> ColoredString {
    let bytes = bytes as f64;
    let kilobytes = bytes / 1024f64;
    let megabytes = kilobytes / 1024f64;
    let gigabytes = megabytes / 1024f64;

    if gigabytes >= 2f64 {
        format!("{:6.2} GB", gigabytes).bright_red()
    } else if gigabytes >= 1f64 {
        format!("{:6.2} GB", gigabytes).yellow()
    } else if megabytes >= 200f64 {
        format!("{:6.1} MB", megabytes).yellow()
    } else if megabytes >= 1f64 {
        format!("{:6.1} MB", megabytes).normal()
    } else if kilobytes >= 1f64 {
        format!("{:6.1} KB", kilobytes).normal()
    } else if bytes >= 1f64 {
        format!("{:6.1} B", bytes).normal()
    } else {
        format!("{:>6}", "-").normal()
    }
}

pub fn format_seconds(sec: f64) -> String {
    let sec = sec as usize;
    let minutes = sec / 60_usize;
    let hours = minutes / 60_usize;
    let days = hours / 24_usize;

    if days >= 1 {
        format!("{}d {}h:{}m.{}s", days, hours % 24, minutes % 60, sec % 60)
    } else if hours >= 1 {
        format!("{}h:{}m.{}s", hours, minutes % 60, sec % 60)
    } else if minutes >= 1 {
        format!("{}m.{}s", minutes, sec % 60)
    } else {
        format!("{}s", sec)
    }
}

pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "-".to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}
