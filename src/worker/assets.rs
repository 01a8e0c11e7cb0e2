//! Request and response model for the asset cache worker.

use serde::{Deserialize, Serialize};

/// Method of an intercepted request; only GET requests are ever served
/// from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl RequestMethod {
    pub const fn is_get(self) -> bool {
        matches!(self, Self::Get)
    }
}

/// How the environment classified the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// A page navigation; eligible for the shell-document fallback.
    Navigate,
    /// Any other asset fetch.
    Subresource,
}

/// An outgoing asset request, as handed to the worker by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub method: RequestMethod,
    /// Absolute URL including scheme and authority.
    pub url: String,
    pub mode: RequestMode,
}

impl AssetRequest {
    /// A plain subresource GET.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            url: url.into(),
            mode: RequestMode::Subresource,
        }
    }

    /// A page-navigation GET.
    pub fn navigation(url: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            url: url.into(),
            mode: RequestMode::Navigate,
        }
    }

    /// Same request with a different method.
    pub fn with_method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }
}

/// A captured response: what the cache stores and what the worker serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub status: u16,
    pub status_text: String,
    /// Header name/value pairs in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl AssetResponse {
    /// A 200 response with the given body and no headers.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Whether the status is in the success range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The synthetic degraded-service response: no network and nothing
    /// cached to fall back on.
    pub fn service_unavailable() -> Self {
        Self {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: b"Network error occurred".to_vec(),
        }
    }
}

/// The `scheme://authority` prefix of `url`, or `None` when the URL has no
/// authority component.
pub(crate) fn origin_of(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if authority_len == 0 {
        return None;
    }
    Some(&url[..scheme_end + 3 + authority_len])
}
