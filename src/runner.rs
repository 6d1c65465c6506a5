//! Runner endpoints of the GitLab API.
//!
//! See <https://docs.gitlab.com/ee/api/runners.html>.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_derive::{Deserialize, Serialize};

use crate::client::{Client, Response};
use crate::error::Result;
use crate::id::Id;
use crate::job::{BuildState, Job};
use crate::options::{ListOptions, RequestOption};
use crate::project::ProjectSummary;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Runner {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub active: bool,
    pub is_shared: bool,
    pub name: Option<String>,
    pub online: Option<bool>,
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RunnerDetails {
    pub active: bool,
    pub architecture: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub id: u64,
    pub is_shared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacted_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub online: Option<bool>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectSummary>,
    // The API really capitalizes this one
    #[serde(rename = "Token", default)]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_level: String,
}

// Runners registered without a description come back with `null`
pub(crate) fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(d).map(|x: Option<T>| x.unwrap_or_default())
}

/// Runner list filter. `Other` carries any scope the server knows that
/// this enum does not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunnerScope {
    Active,
    Paused,
    Online,
    Offline,
    Specific,
    Shared,
    Other(String),
}

impl fmt::Display for RunnerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunnerScope::Active => "active",
            RunnerScope::Paused => "paused",
            RunnerScope::Online => "online",
            RunnerScope::Offline => "offline",
            RunnerScope::Specific => "specific",
            RunnerScope::Shared => "shared",
            RunnerScope::Other(s) => s.as_str(),
        };
        f.write_str(s)
    }
}

impl FromStr for RunnerScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("runner scope is empty".to_string());
        }
        Ok(match s.to_ascii_lowercase().as_str() {
            "active" => RunnerScope::Active,
            "paused" => RunnerScope::Paused,
            "online" => RunnerScope::Online,
            "offline" => RunnerScope::Offline,
            "specific" => RunnerScope::Specific,
            "shared" => RunnerScope::Shared,
            _ => RunnerScope::Other(s.to_string()),
        })
    }
}

impl serde::Serialize for RunnerScope {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RunnerScope {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which refs a runner picks jobs up for.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    NotProtected,
    RefProtected,
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "not_protected" => Ok(AccessLevel::NotProtected),
            "ref_protected" => Ok(AccessLevel::RefProtected),
            other => Err(format!(
                "unknown access level '{}' (expected not_protected or ref_protected)",
                other
            )),
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ListRunnersOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<RunnerScope>,
}

pub type ListProjectRunnersOptions = ListRunnersOptions;

/// Partial update: only the fields that are set are changed.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct UpdateRunnerDetailsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_list: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_untagged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EnableProjectRunnerOptions {
    pub runner_id: u64,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ListRunnerJobsOptions {
    #[serde(flatten)]
    pub list: ListOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildState>,
}

/// Runner endpoints, borrowed from a [`Client`] via [`Client::runners`].
#[derive(Debug, Clone, Copy)]
pub struct RunnersService<'a> {
    client: &'a Client,
}

impl<'a> RunnersService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List runners available to the authenticated user.
    pub async fn list_runners(
        &self,
        opt: Option<&ListRunnersOptions>,
        options: &[RequestOption],
    ) -> Result<(Vec<Runner>, Response)> {
        let req = self.client.new_request(Method::GET, "runners", opt, options)?;
        self.client.execute(req).await
    }

    /// List every runner of the instance. Admin only; anyone else gets a 403.
    pub async fn list_all_runners(
        &self,
        opt: Option<&ListRunnersOptions>,
        options: &[RequestOption],
    ) -> Result<(Vec<Runner>, Response)> {
        let req = self
            .client
            .new_request(Method::GET, "runners/all", opt, options)?;
        self.client.execute(req).await
    }

    pub async fn get_runner_details(
        &self,
        rid: impl Into<Id>,
        options: &[RequestOption],
    ) -> Result<(RunnerDetails, Response)> {
        let runner = rid.into().normalize()?;
        let path = format!("runners/{}", runner);

        let req = self
            .client
            .new_request::<()>(Method::GET, &path, None, options)?;
        self.client.execute(req).await
    }

    pub async fn update_runner_details(
        &self,
        rid: impl Into<Id>,
        opt: &UpdateRunnerDetailsOptions,
        options: &[RequestOption],
    ) -> Result<(RunnerDetails, Response)> {
        let runner = rid.into().normalize()?;
        let path = format!("runners/{}", runner);

        let req = self
            .client
            .new_request(Method::PUT, &path, Some(opt), options)?;
        self.client.execute(req).await
    }

    /// Delete a runner. The API answers 204 with no body.
    pub async fn remove_runner(
        &self,
        rid: impl Into<Id>,
        options: &[RequestOption],
    ) -> Result<Response> {
        let runner = rid.into().normalize()?;
        let path = format!("runners/{}", runner);

        let req = self
            .client
            .new_request::<()>(Method::DELETE, &path, None, options)?;
        self.client.execute_empty(req).await
    }

    /// Jobs processed or being processed by a runner.
    pub async fn list_runner_jobs(
        &self,
        rid: impl Into<Id>,
        opt: Option<&ListRunnerJobsOptions>,
        options: &[RequestOption],
    ) -> Result<(Vec<Job>, Response)> {
        let runner = rid.into().normalize()?;
        let path = format!("runners/{}/jobs", runner);

        let req = self.client.new_request(Method::GET, &path, opt, options)?;
        self.client.execute(req).await
    }

    pub async fn list_project_runners(
        &self,
        pid: impl Into<Id>,
        opt: Option<&ListProjectRunnersOptions>,
        options: &[RequestOption],
    ) -> Result<(Vec<Runner>, Response)> {
        let project = pid.into().normalize()?;
        let path = format!("projects/{}/runners", project);

        let req = self.client.new_request(Method::GET, &path, opt, options)?;
        self.client.execute(req).await
    }

    /// Attach an existing specific runner to a project.
    pub async fn enable_project_runner(
        &self,
        pid: impl Into<Id>,
        opt: &EnableProjectRunnerOptions,
        options: &[RequestOption],
    ) -> Result<(Runner, Response)> {
        let project = pid.into().normalize()?;
        let path = format!("projects/{}/runners", project);

        let req = self
            .client
            .new_request(Method::POST, &path, Some(opt), options)?;
        self.client.execute(req).await
    }

    pub async fn disable_project_runner(
        &self,
        pid: impl Into<Id>,
        rid: impl Into<Id>,
        options: &[RequestOption],
    ) -> Result<Response> {
        let project = pid.into().normalize()?;
        let runner = rid.into().normalize()?;
        let path = format!("projects/{}/runners/{}", project, runner);

        let req = self
            .client
            .new_request::<()>(Method::DELETE, &path, None, options)?;
        self.client.execute_empty(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAILS: &str = r#"{
        "active": true,
        "architecture": null,
        "description": "test-1-20150125",
        "id": 6,
        "ip_address": "127.0.0.1",
        "is_shared": false,
        "contacted_at": "2016-01-25T16:39:48.066Z",
        "name": null,
        "online": true,
        "status": "online",
        "platform": null,
        "projects": [
            {
                "id": 1,
                "name": "GitLab Community Edition",
                "name_with_namespace": "GitLab.org / GitLab Community Edition",
                "path": "gitlab-ce",
                "path_with_namespace": "gitlab-org/gitlab-ce"
            }
        ],
        "Token": "205086a8e3b9a2b818ffac9b89d102",
        "revision": null,
        "tag_list": ["ruby", "mysql"],
        "version": null,
        "access_level": "ref_protected"
    }"#;

    #[test]
    fn test_runner_list_decode() {
        let raw = r#"[
            {"active": true, "description": "test-1-20150125", "id": 6, "is_shared": false,
             "ip_address": "127.0.0.1", "name": null, "online": true, "status": "online"},
            {"active": true, "description": "test-2-20150125", "id": 8, "is_shared": false,
             "ip_address": "127.0.0.1", "name": "builder", "online": false, "status": "offline"}
        ]"#;
        let runners: Vec<Runner> = serde_json::from_str(raw).unwrap();
        assert_eq!(runners.len(), 2);
        assert_eq!(
            runners[1],
            Runner {
                id: 8,
                description: "test-2-20150125".to_string(),
                active: true,
                is_shared: false,
                name: Some("builder".to_string()),
                online: Some(false),
                status: "offline".to_string(),
            }
        );
        assert_eq!(runners[0].name, None);
    }

    #[test]
    fn test_details_decode() {
        let d: RunnerDetails = serde_json::from_str(DETAILS).unwrap();
        assert_eq!(d.id, 6);
        assert_eq!(d.token.as_deref(), Some("205086a8e3b9a2b818ffac9b89d102"));
        assert_eq!(d.tag_list, vec!["ruby", "mysql"]);
        assert_eq!(d.projects.len(), 1);
        assert_eq!(d.projects[0].path_with_namespace, "gitlab-org/gitlab-ce");
        assert_eq!(d.access_level, "ref_protected");
        assert_eq!(
            d.contacted_at.unwrap().to_rfc3339(),
            "2016-01-25T16:39:48.066+00:00"
        );
    }

    #[test]
    fn test_details_keep_capitalized_token() {
        let d: RunnerDetails = serde_json::from_str(DETAILS).unwrap();
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["Token"], "205086a8e3b9a2b818ffac9b89d102");
        assert!(v.get("token").is_none());
        assert!(v.get("version").is_none());
    }

    #[test]
    fn test_list_options_query() {
        let opt = ListRunnersOptions {
            list: ListOptions {
                page: Some(2),
                per_page: Some(20),
            },
            scope: Some(RunnerScope::Online),
        };
        assert_eq!(
            serde_urlencoded::to_string(&opt).unwrap(),
            "page=2&per_page=20&scope=online"
        );
        assert_eq!(
            serde_urlencoded::to_string(ListRunnersOptions::default()).unwrap(),
            ""
        );
    }

    #[test]
    fn test_job_options_query() {
        let opt = ListRunnerJobsOptions {
            status: Some(BuildState::Running),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&opt).unwrap(), "status=running");
    }

    #[test]
    fn test_update_body_omits_unset_fields() {
        let opt = UpdateRunnerDetailsOptions {
            description: Some("docker".to_string()),
            tag_list: Some(vec!["linux".to_string(), "docker".to_string()]),
            access_level: Some(AccessLevel::NotProtected),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&opt).unwrap(),
            serde_json::json!({
                "description": "docker",
                "tag_list": ["linux", "docker"],
                "access_level": "not_protected"
            })
        );
        assert_eq!(
            serde_json::to_string(&UpdateRunnerDetailsOptions::default()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_scope_display_matches_wire() {
        for scope in [
            RunnerScope::Active,
            RunnerScope::Paused,
            RunnerScope::Online,
            RunnerScope::Offline,
            RunnerScope::Specific,
            RunnerScope::Shared,
            RunnerScope::Other("never_contacted".to_string()),
        ] {
            assert_eq!(
                serde_json::to_string(&scope).unwrap(),
                format!("\"{}\"", scope)
            );
            assert_eq!(scope.to_string().parse::<RunnerScope>().unwrap(), scope);
        }
        assert!("".parse::<RunnerScope>().is_err());
    }

    #[test]
    fn test_unknown_scope_is_passed_through() {
        assert_eq!(
            "stale".parse::<RunnerScope>().unwrap(),
            RunnerScope::Other("stale".to_string())
        );
        let opt = ListRunnersOptions {
            scope: Some("offline".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&opt).unwrap(), "scope=offline");
    }

    #[test]
    fn test_null_strings_decode_as_empty() {
        let raw = r#"[{"active": false, "description": null, "id": 3, "is_shared": true,
                       "name": null, "online": null, "status": "never_contacted"}]"#;
        let runners: Vec<Runner> = serde_json::from_str(raw).unwrap();
        assert_eq!(runners[0].description, "");

        let raw = r#"{"active": true, "architecture": null, "description": null, "id": 3,
                      "is_shared": false, "name": null, "online": false, "status": "offline",
                      "projects": null, "tag_list": null, "access_level": null}"#;
        let d: RunnerDetails = serde_json::from_str(raw).unwrap();
        assert_eq!(d.description, "");
        assert_eq!(d.access_level, "");
        assert!(d.projects.is_empty());
        assert!(d.tag_list.is_empty());
    }

    #[test]
    fn test_access_level_from_str() {
        assert_eq!(
            "ref_protected".parse::<AccessLevel>().unwrap(),
            AccessLevel::RefProtected
        );
        assert!("protected".parse::<AccessLevel>().is_err());
    }
}
