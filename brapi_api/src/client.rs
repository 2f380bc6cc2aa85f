//! HTTP client for a BrAPI v2 server.

use serde_json::Value;
use url::Url;

use crate::{
    query::Query,
    schema::{validate_all, Schema, SchemaViolation},
    types::{CollectionResult, Envelope, ListResponse, Pagination, Program, Resource},
    Error,
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://test-server.brapi.org/brapi/v2";

/// Environment variable holding the base URL.
pub const BASE_URL_ENV: &str = "BRAPI_URL";

const USER_AGENT: &str = concat!("brapi_api/", env!("CARGO_PKG_VERSION"));

/// HTTP client for a BrAPI server.
///
/// The client is the only place raw JSON is inspected: every response is
/// unwrapped from its envelope and validated before anything is returned.
/// It keeps no state between calls, never retries and sets no timeout;
/// callers that want either wrap the returned futures themselves.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API, e.g. `https://test-server.brapi.org/brapi/v2`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Client {
    /// Creates a client from `BRAPI_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn new(base_url: &str) -> Self {
        Self::with_base_url(base_url)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Builds `{base}/{segments...}` plus the query string. Each segment is
    /// percent-encoded on its own, so an id containing `/` stays one segment.
    fn get_url(&self, segments: &[&str], query: &dyn Query) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::RequestFailed(format!("invalid base URL: {}", e))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed("base URL cannot carry a path".to_string())
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(query.add_to_url(&url))
    }

    async fn get(&self, url: Url) -> Result<Envelope, Error> {
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let raw = serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::error!("Response is not JSON: {} | body: {}", e, truncate_body(&body));
            SchemaViolation::new(Envelope::NAME, "$", e.to_string())
        })?;
        let envelope = Envelope::validate(&raw)?;
        for status in envelope.metadata.status.iter() {
            tracing::debug!("server status [{}]: {}", status.message_type, status.message);
        }
        Ok(envelope)
    }

    /// Fetches one page of a collection: `GET {base}/{R::PATH}`.
    ///
    /// Every element of `result.data` must validate; the first one that does
    /// not fails the whole call and no records are returned. An empty
    /// `result.data` is a normal, empty page.
    pub async fn list<R: Resource>(&self, query: &dyn Query) -> Result<ListResponse<R>, Error> {
        let url = self.get_url(&[R::PATH], query)?;
        let envelope = self.get(url).await?;

        let pagination = envelope.metadata.pagination;
        pagination
            .check()
            .map_err(|msg| SchemaViolation::new(Pagination::NAME, "metadata.pagination", msg))?;

        let result = CollectionResult::validate_at(&envelope.result, "result")?;
        let data = validate_all::<R>(&result.data, "result.data").map_err(|e| {
            tracing::error!("Rejected {} response: {}", R::PATH, e);
            e
        })?;

        Ok(ListResponse {
            pagination,
            status: envelope.metadata.status,
            data,
        })
    }

    /// Fetches a single record: `GET {base}/{R::PATH}/{id}`.
    ///
    /// An empty `result` object means the server has no such record and is
    /// reported as [`Error::NotFound`].
    pub async fn get_by_id<R: Resource>(&self, id: &str, query: &dyn Query) -> Result<R, Error> {
        let url = self.get_url(&[R::PATH, id], query)?;
        let envelope = self.get(url).await?;

        match &envelope.result {
            Value::Object(fields) if fields.is_empty() => {
                tracing::debug!("{} '{}' not found", R::NAME, id);
                Err(Error::NotFound {
                    resource: R::NAME,
                    id: id.to_string(),
                })
            }
            Value::Object(_) => Ok(R::validate_at(&envelope.result, "result")?),
            other => Err(SchemaViolation::new(
                R::NAME,
                "result",
                format!("expected an object, got {}", json_kind(other)),
            )
            .into()),
        }
    }

    /// Fetches a page of breeding programs.
    pub async fn programs(&self, query: &dyn Query) -> Result<ListResponse<Program>, Error> {
        self.list::<Program>(query).await
    }

    /// Fetches a single breeding program by its `programDbId`.
    pub async fn program(&self, program_db_id: &str, query: &dyn Query) -> Result<Program, Error> {
        self.get_by_id::<Program>(program_db_id, query).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
