//! Transport seam between the adapter core and the HTTP client
//!
//! Operation handlers only ever talk to a `Transport`; `PrestashopClient` is
//! the reqwest-backed implementation and tests substitute an in-memory one.

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => super::constants::methods::GET,
            Method::Post => super::constants::methods::POST,
            Method::Patch => super::constants::methods::PATCH,
            Method::Delete => super::constants::methods::DELETE,
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One authenticated call against the webservice
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Resource path relative to `/api/` (e.g. "customers/12")
    pub resource: String,
    /// XML document for POST/PATCH
    pub body: Option<String>,
    /// Query-string fragment without the leading `?`
    pub query: String,
    /// Absolute URI overriding resource + query
    pub uri: Option<String>,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            body: None,
            query: String::new(),
            uri: None,
            headers: Vec::new(),
        }
    }

    pub fn get(resource: impl Into<String>) -> Self {
        Self::new(Method::Get, resource)
    }

    pub fn post(resource: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Post, resource).body(body)
    }

    pub fn patch(resource: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Patch, resource).body(body)
    }

    pub fn delete(resource: impl Into<String>) -> Self {
        Self::new(Method::Delete, resource)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the call and return the decoded response body.
    ///
    /// Remote failures (non-2xx) are returned as errors carrying the remote message.
    async fn request(&self, request: ApiRequest) -> anyhow::Result<Value>;
}
