use serde::Serialize;
use utoipa::ToSchema;

/// Normalized view of one catalog character.
///
/// Fields are passed through from the catalog untouched, nulls included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PersonDetail {
    #[schema(example = "Luke Skywalker")]
    pub name: Option<String>,
    #[schema(example = "172")]
    pub height: Option<String>,
    #[schema(example = "male")]
    pub gender: Option<String>,
    #[schema(example = "https://www.swapi.tech/api/people/1")]
    pub url: Option<String>,
}

/// One entry of a listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PersonSummary {
    #[schema(example = "1")]
    pub uid: Option<String>,
    pub name: Option<String>,
}

impl PersonSummary {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            name: Some(name.into()),
        }
    }
}

/// A page of characters in the stable internal shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonPage {
    pub total_records: u64,
    pub total_pages: u64,
    pub results: Vec<PersonSummary>,
}

impl PersonPage {
    /// The page returned whenever the catalog has nothing to show.
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            total_pages: 0,
            results: Vec::new(),
        }
    }

    /// Search results arrive as one flat batch: a single page holding
    /// everything that matched.
    pub fn single_batch(results: Vec<PersonSummary>) -> Self {
        Self {
            total_records: results.len() as u64,
            total_pages: 1,
            results,
        }
    }
}

/// Listing request after HTTP parameter defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleQuery {
    pub name: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl PeopleQuery {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Trimmed search term, or `None` when the caller wants the plain listing.
    pub fn search_term(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl Default for PeopleQuery {
    fn default() -> Self {
        Self {
            name: None,
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
