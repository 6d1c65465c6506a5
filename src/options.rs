use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Request;
use serde_derive::Serialize;

use crate::error::{Error, Result};
use crate::id::Id;

/// Pagination shared by every list endpoint.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Per-call override applied to a request after it has been built.
#[derive(Clone, Debug)]
pub enum RequestOption {
    /// Run the call as another user (admin tokens only).
    Sudo(Id),
    Header(HeaderName, HeaderValue),
}

impl RequestOption {
    pub(crate) fn apply(&self, request: &mut Request) -> Result<()> {
        match self {
            RequestOption::Sudo(user) => {
                let value =
                    HeaderValue::from_str(&user.to_string()).map_err(|_| Error::InvalidHeader {
                        name: "sudo",
                        value: user.to_string(),
                    })?;
                request.headers_mut().insert("sudo", value);
            }
            RequestOption::Header(name, value) => {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
        Ok(())
    }
}
