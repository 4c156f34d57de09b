use std::fmt;

use async_trait::async_trait;
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::domain::people::errors::CatalogClientError;
use crate::domain::people::errors::PeopleError;
use crate::domain::people::models::PeopleQuery;
use crate::domain::people::models::PersonDetail;
use crate::domain::people::models::PersonPage;

/// Port for character lookups.
#[async_trait]
pub trait PeopleServicePort: Send + Sync + 'static {
    /// Retrieve one character by catalog id.
    ///
    /// # Errors
    /// * `NotFound` - Catalog has no such character, or answered with nothing
    /// * `UpstreamUnavailable` - Catalog failed or could not be reached
    async fn get_person_by_id(&self, id: &str) -> Result<PersonDetail, PeopleError>;

    /// List characters page by page, or search them by name.
    ///
    /// # Errors
    /// * `UpstreamError` - Catalog failed or could not be reached
    async fn get_people(&self, query: PeopleQuery) -> Result<PersonPage, PeopleError>;
}

/// Relative catalog request: raw path segments plus query parameters, both
/// percent-encoded by the client. An empty last segment keeps a trailing
/// slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
}

impl CatalogRequest {
    /// Start from a fixed path such as `/people` or `/people/`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .trim_start_matches('/')
                .split('/')
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
        }
    }

    /// Append one caller-supplied segment. It stays a single segment whatever
    /// it contains.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Unencoded path, for logs and matching.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for CatalogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        for (index, (key, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, key, value)?;
        }
        Ok(())
    }
}

/// Raw catalog answer. The body is decoded later, once the caller knows which
/// shape to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as `T`.
    ///
    /// # Returns
    /// `None` for an empty body or a JSON `null`
    ///
    /// # Errors
    /// * `Decode` - Body is not valid JSON for `T`
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, CatalogClientError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<T>>(&self.body)
            .map_err(|e| CatalogClientError::Decode(e.to_string()))
    }
}

/// Outbound access to the Star Wars catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync + 'static {
    /// Perform a GET and hand back status and body, whatever the status.
    ///
    /// # Errors
    /// * `Transport` - No HTTP response was obtained
    async fn get(&self, request: CatalogRequest) -> Result<UpstreamResponse, CatalogClientError>;
}
