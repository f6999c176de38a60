//! Request/response boundary between the API handler and the network.
//!
//! The handler only sees [`Transport`]: it hands over path segments
//! relative to the API root and gets back a status code and body.
//! [`build_url`] is the shared segments -> URL logic for transports that
//! speak HTTP.

use async_trait::async_trait;
use url::Url;

use crate::errors::TransportError;

/// Default page size for paginated routes.
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request relative to the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments, e.g. `["certificates", <fqid>, "last"]`. Each one
    /// is sent as a single percent-encoded segment.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    /// JSON body for POST requests.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post<I, S>(segments: I, body: String) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: Method::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.query.extend(pagination.query_pairs());
        self
    }

    /// Slash-joined segments, for logs and assertions.
    pub fn route(&self) -> String {
        self.segments.join("/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Page selection for list routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    pub fn query_pairs(&self) -> [(String, String); 2] {
        [
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Sends one request and returns the raw answer. Implementations do not
/// retry and do not interpret the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).execute(request).await
    }
}

/// Append `segments` (each percent-encoded as one segment) and `query`
/// pairs to `base`.
pub fn build_url<S: AsRef<str>>(
    base: &Url,
    segments: &[S],
    query: &[(String, String)],
) -> Result<Url, TransportError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(base.to_string()))?;
        path.pop_if_empty().extend(segments);
    }
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

pub fn parse_base_url(api_url: &str) -> Result<Url, TransportError> {
    Url::parse(api_url).map_err(|e| TransportError::InvalidUrl(format!("{api_url}: {e}")))
}
