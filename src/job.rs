use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use crate::project::ProjectSummary;
use crate::runner::null_as_default;

/// Job state as used by status filters.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuildState {
    Created,
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BuildState::Created => "created",
            BuildState::Pending => "pending",
            BuildState::Running => "running",
            BuildState::Success => "success",
            BuildState::Failed => "failed",
            BuildState::Canceled => "canceled",
            BuildState::Skipped => "skipped",
            BuildState::Manual => "manual",
        };
        f.write_str(s)
    }
}

impl FromStr for BuildState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(BuildState::Created),
            "pending" => Ok(BuildState::Pending),
            "running" => Ok(BuildState::Running),
            "success" => Ok(BuildState::Success),
            "failed" => Ok(BuildState::Failed),
            "canceled" | "cancelled" => Ok(BuildState::Canceled),
            "skipped" => Ok(BuildState::Skipped),
            "manual" => Ok(BuildState::Manual),
            other => Err(format!("unknown job status '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Artifact {
    pub file_type: String,
    pub size: u64,
    pub filename: String,
    pub file_format: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JobPipeline {
    pub id: u64,
    #[serde(rename = "ref")]
    pub rref: String,
    pub sha: String,
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Job {
    pub id: u64,
    // Kept as text: the API grows new states faster than BuildState does
    pub status: String,
    pub stage: String,
    pub name: String,
    #[serde(rename = "ref")]
    pub rref: String,
    #[serde(default)]
    pub tag: bool,
    pub coverage: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration: Option<f64>,
    pub failure_reason: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_list: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artifacts: Vec<Artifact>,
    pub pipeline: Option<JobPipeline>,
    pub project: Option<ProjectSummary>,
}

impl Job {
    pub fn artifacts_size(&self) -> u64 {
        self.artifacts.iter().map(|a| a.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_wire_names() {
        assert_eq!(serde_json::to_string(&BuildState::Canceled).unwrap(), "\"canceled\"");
        assert_eq!(BuildState::Running.to_string(), "running");
        let s: BuildState = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(s, BuildState::Success);
    }

    #[test]
    fn test_build_state_from_str() {
        assert_eq!("Failed".parse::<BuildState>().unwrap(), BuildState::Failed);
        assert_eq!("cancelled".parse::<BuildState>().unwrap(), BuildState::Canceled);
        assert!("exploded".parse::<BuildState>().is_err());
    }

    #[test]
    fn test_job_decode() {
        let raw = r#"{
            "id": 1,
            "status": "failed",
            "stage": "test",
            "name": "rspec:other",
            "ref": "main",
            "tag": false,
            "coverage": null,
            "created_at": "2017-11-16T08:50:29.000Z",
            "started_at": "2017-11-16T08:51:29.000Z",
            "finished_at": null,
            "duration": 60.5,
            "tag_list": null,
            "web_url": "https://gitlab.example.com/group/project/-/jobs/1",
            "artifacts": [
                {"file_type": "archive", "size": 1000, "filename": "artifacts.zip", "file_format": "zip"},
                {"file_type": "trace", "size": 24, "filename": "job.log", "file_format": null}
            ],
            "pipeline": {"id": 6, "ref": "main", "sha": "0ff3ae19", "status": "pending"},
            "project": {
                "id": 1,
                "name": "project",
                "name_with_namespace": "Group / project",
                "path": "project",
                "path_with_namespace": "group/project"
            }
        }"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.rref, "main");
        assert_eq!(job.status, "failed");
        assert!(job.finished_at.is_none());
        assert_eq!(job.artifacts_size(), 1024);
        assert_eq!(job.pipeline.unwrap().id, 6);
        assert_eq!(job.project.unwrap().path_with_namespace, "group/project");
        assert!(job.tag_list.is_empty());
    }
}
