//! Shared GitLab API client.
//!
//! Every endpoint function goes through [`Client::new_request`] and then
//! [`Client::execute`] or [`Client::execute_empty`].

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::options::RequestOption;
use crate::runner::RunnersService;

const API_PATH: &str = "api/v4/";
const DEFAULT_USER_AGENT: &str = concat!("glr/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the GitLab v4 API
#[derive(Clone)]
pub struct Client {
    /// API root, always ending in `/api/v4/`
    base_url: Url,
    token: String,
    client: reqwest::Client,
}

impl Client {
    /// Create a client for the instance at `base_url` (e.g. "https://gitlab.com").
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    /// Same as [`Client::new`] but with a configured reqwest client
    /// (timeouts, proxies, TLS settings).
    pub fn with_client(
        base_url: &str,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Result<Self> {
        Ok(Self {
            base_url: api_root(base_url)?,
            token: token.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runner endpoints.
    pub fn runners(&self) -> RunnersService<'_> {
        RunnersService::new(self)
    }

    /// Build a request for `path`, relative to the API root.
    ///
    /// `opt` goes into the query string for GET and DELETE and into a JSON
    /// body otherwise. Fields skipped by serde never reach the wire.
    pub fn new_request<O>(
        &self,
        method: Method,
        path: &str,
        opt: Option<&O>,
        options: &[RequestOption],
    ) -> Result<Request>
    where
        O: Serialize + ?Sized,
    {
        let mut url = self.base_url.join(path)?;
        let mut body = None;

        if let Some(opt) = opt {
            if method == Method::GET || method == Method::DELETE {
                let query = serde_urlencoded::to_string(opt)?;
                url.set_query(if query.is_empty() { None } else { Some(&query) });
            } else {
                body = Some(serde_json::to_vec(opt).map_err(Error::Body)?);
            }
        }

        let mut builder = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(USER_AGENT, DEFAULT_USER_AGENT);
        if let Some(body) = body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let mut request = builder.build().map_err(Error::Build)?;
        for option in options {
            option.apply(&mut request)?;
        }

        Ok(request)
    }

    /// Send `request` and decode the JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, Response)> {
        let response = self.send(request).await?;
        let meta = Response::from_reqwest(&response);

        let raw = response.bytes().await.map_err(Error::Transport)?;
        match serde_json::from_slice::<T>(&raw) {
            Ok(value) => Ok((value, meta)),
            Err(e) => {
                trace!(body = %String::from_utf8_lossy(&raw), "undecodable response body");
                Err(Error::Decode(e))
            }
        }
    }

    /// Send `request` and throw the body away (DELETE endpoints).
    pub async fn execute_empty(&self, request: Request) -> Result<Response> {
        let response = self.send(request).await?;
        Ok(Response::from_reqwest(&response))
    }

    async fn send(&self, request: Request) -> Result<reqwest::Response> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.client.execute(request).await.map_err(Error::Transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), "received response");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), %message, "API returned an error");
            return Err(Error::api_error(status.as_u16(), message));
        }

        Ok(response)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

fn api_root(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim_end_matches('/');
    let root = if trimmed.ends_with("/api/v4") {
        format!("{}/", trimmed)
    } else {
        format!("{}/{}", trimmed, API_PATH)
    };
    Ok(Url::parse(&root)?)
}

/// Response metadata returned next to every decoded value.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub total_items: Option<u64>,
    pub total_pages: Option<u64>,
    pub items_per_page: Option<u64>,
    pub current_page: Option<u64>,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

impl Response {
    fn from_reqwest(response: &reqwest::Response) -> Self {
        Self::from_parts(response.status(), response.headers().clone())
    }

    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap) -> Self {
        let number = |name: &str| header_number(headers.get(name));
        Self {
            total_items: number("x-total"),
            total_pages: number("x-total-pages"),
            items_per_page: number("x-per-page"),
            current_page: number("x-page"),
            next_page: number("x-next-page"),
            previous_page: number("x-prev-page"),
            status,
            headers,
        }
    }
}

// GitLab sends empty values on the first and last page.
fn header_number(value: Option<&HeaderValue>) -> Option<u64> {
    value?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ListOptions;

    fn client() -> Client {
        Client::new("https://gitlab.example.com", "secret").unwrap()
    }

    #[test]
    fn test_api_root() {
        for base in [
            "https://gitlab.example.com",
            "https://gitlab.example.com/",
            "https://gitlab.example.com/api/v4",
            "https://gitlab.example.com/api/v4/",
        ] {
            let client = Client::new(base, "t").unwrap();
            assert_eq!(
                client.base_url().as_str(),
                "https://gitlab.example.com/api/v4/"
            );
        }
    }

    #[test]
    fn test_api_root_keeps_subpath() {
        let client = Client::new("https://example.com/gitlab", "t").unwrap();
        assert_eq!(client.base_url().as_str(), "https://example.com/gitlab/api/v4/");
    }

    #[test]
    fn test_debug_hides_token() {
        let out = format!("{:?}", client());
        assert!(!out.contains("secret"));
        assert!(out.contains("gitlab.example.com"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Client::new("not a url", "t").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_get_request_encodes_query() {
        let opt = ListOptions {
            page: Some(3),
            per_page: Some(50),
        };
        let req = client()
            .new_request(Method::GET, "runners", Some(&opt), &[])
            .unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().path(), "/api/v4/runners");
        assert_eq!(req.url().query(), Some("page=3&per_page=50"));
        assert!(req.body().is_none());
        assert_eq!(req.headers()["authorization"], "Bearer secret");
    }

    #[test]
    fn test_empty_options_leave_no_query() {
        let req = client()
            .new_request(Method::GET, "runners", Some(&ListOptions::default()), &[])
            .unwrap();
        assert_eq!(req.url().query(), None);
    }

    #[test]
    fn test_put_request_has_json_body() {
        let body = serde_json::json!({ "active": false });
        let req = client()
            .new_request(Method::PUT, "runners/1", Some(&body), &[])
            .unwrap();
        assert_eq!(req.url().query(), None);
        assert_eq!(req.headers()["content-type"], "application/json");
        let bytes = req.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(bytes, &br#"{"active":false}"#[..]);
    }

    #[test]
    fn test_request_without_options() {
        let req = client()
            .new_request::<()>(Method::DELETE, "runners/9", None, &[])
            .unwrap();
        assert_eq!(req.url().as_str(), "https://gitlab.example.com/api/v4/runners/9");
    }

    #[test]
    fn test_encoded_segment_survives_join() {
        let req = client()
            .new_request::<()>(Method::GET, "projects/group%2Fproject/runners", None, &[])
            .unwrap();
        assert_eq!(req.url().path(), "/api/v4/projects/group%2Fproject/runners");
    }

    #[test]
    fn test_pagination_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-total", HeaderValue::from_static("57"));
        headers.insert("x-total-pages", HeaderValue::from_static("3"));
        headers.insert("x-per-page", HeaderValue::from_static("20"));
        headers.insert("x-page", HeaderValue::from_static("3"));
        headers.insert("x-next-page", HeaderValue::from_static(""));
        headers.insert("x-prev-page", HeaderValue::from_static("2"));

        let resp = Response::from_parts(StatusCode::OK, headers);
        assert_eq!(resp.total_items, Some(57));
        assert_eq!(resp.total_pages, Some(3));
        assert_eq!(resp.items_per_page, Some(20));
        assert_eq!(resp.current_page, Some(3));
        assert_eq!(resp.next_page, None);
        assert_eq!(resp.previous_page, Some(2));
    }
}
