use thiserror::Error;

/// Failures of the catalog transport itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogClientError {
    #[error("Catalog request failed: {0}")]
    Transport(String),

    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
}

/// Errors surfaced by character lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeopleError {
    #[error("{0}")]
    NotFound(String),

    #[error("The Star Wars catalog is unavailable")]
    UpstreamUnavailable,

    #[error("{0}")]
    UpstreamError(String),
}
