use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_derive::{Deserialize, Serialize};

/// Token and instance URL kept in `$HOME/.creds`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub url: String,
}

impl Credentials {
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| {
            format!(
                "no credentials at {} (run `glr login` first)",
                path.display()
            )
        })?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("malformed credentials file {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)
            .with_context(|| format!("cannot write credentials to {}", path.display()))
    }
}

pub fn credentials_path() -> Result<PathBuf> {
    let home = env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".creds"))
}

/// Resolve credentials, letting `--gitlab-url`/`--gitlab-token` (or their
/// env vars) override whatever the credentials file holds.
pub fn resolve_credentials(url: Option<String>, token: Option<String>) -> Result<Credentials> {
    let creds = match (url, token) {
        (Some(url), Some(token)) => Credentials { token, url },
        (url, token) => merge(Credentials::load_from(&credentials_path()?)?, url, token),
    };
    if creds.token.is_empty() {
        bail!("empty access token");
    }
    Ok(creds)
}

fn merge(creds: Credentials, url: Option<String>, token: Option<String>) -> Credentials {
    Credentials {
        token: token.unwrap_or(creds.token),
        url: url.unwrap_or(creds.url),
    }
}
