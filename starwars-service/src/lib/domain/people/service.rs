use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::people::errors::PeopleError;
use crate::domain::people::models::PeopleQuery;
use crate::domain::people::models::PersonDetail;
use crate::domain::people::models::PersonPage;
use crate::domain::people::models::PersonSummary;
use crate::domain::people::ports::CatalogClient;
use crate::domain::people::ports::CatalogRequest;
use crate::domain::people::ports::PeopleServicePort;
use crate::domain::people::upstream::SwapiPeoplePage;
use crate::domain::people::upstream::SwapiPeopleSearch;
use crate::domain::people::upstream::SwapiPersonResponse;

const PAGED_LIST_FAILED: &str = "failed to retrieve paged character list";
const SEARCH_FAILED: &str = "failed to search characters by name";

/// Normalizes the catalog's detail, listing and search answers into
/// [`PersonDetail`] and [`PersonPage`].
///
/// Each call makes exactly one catalog request and never retries.
pub struct PeopleService<CC>
where
    CC: CatalogClient,
{
    client: Arc<CC>,
}

impl<CC> PeopleService<CC>
where
    CC: CatalogClient,
{
    pub fn new(client: Arc<CC>) -> Self {
        Self { client }
    }

    async fn paged_people(&self, page: i64, limit: i64) -> Result<PersonPage, PeopleError> {
        let request = CatalogRequest::new("/people")
            .with_query("page", page)
            .with_query("limit", limit);

        let response = self.client.get(request).await.map_err(|e| {
            tracing::error!(error = %e, "Paged character list request failed");
            PeopleError::UpstreamError(PAGED_LIST_FAILED.to_string())
        })?;

        if response.status.is_client_error() || response.status.is_server_error() {
            tracing::warn!(status = response.status.as_u16(), page, limit, "Catalog rejected paged listing");
            return Err(PeopleError::UpstreamError(PAGED_LIST_FAILED.to_string()));
        }

        let listing = response.decode::<SwapiPeoplePage>().map_err(|e| {
            tracing::error!(error = %e, "Paged character list undecodable");
            PeopleError::UpstreamError(PAGED_LIST_FAILED.to_string())
        })?;

        let Some(listing) = listing else {
            return Ok(PersonPage::empty());
        };
        let Some(items) = listing.results else {
            return Ok(PersonPage::empty());
        };

        Ok(PersonPage {
            total_records: listing.total_records.unwrap_or_default(),
            total_pages: listing.total_pages.unwrap_or_default(),
            results: items.into_iter().map(PersonSummary::from).collect(),
        })
    }

    async fn search_people(&self, name: &str) -> Result<PersonPage, PeopleError> {
        // the catalog only serves name searches under the trailing-slash path
        let request = CatalogRequest::new("/people/").with_query("name", name);

        let response = self.client.get(request).await.map_err(|e| {
            tracing::error!(error = %e, search_name = name, "Character search request failed");
            PeopleError::UpstreamError(SEARCH_FAILED.to_string())
        })?;

        if response.status.is_client_error() || response.status.is_server_error() {
            tracing::warn!(status = response.status.as_u16(), search_name = name, "Catalog rejected character search");
            return Err(PeopleError::UpstreamError(SEARCH_FAILED.to_string()));
        }

        let search = response.decode::<SwapiPeopleSearch>().map_err(|e| {
            tracing::error!(error = %e, search_name = name, "Character search response undecodable");
            PeopleError::UpstreamError(SEARCH_FAILED.to_string())
        })?;

        let items = search.and_then(|s| s.result).unwrap_or_default();
        if items.is_empty() {
            return Ok(PersonPage::empty());
        }

        Ok(PersonPage::single_batch(
            items.into_iter().map(PersonSummary::from).collect(),
        ))
    }
}

#[async_trait]
impl<CC> PeopleServicePort for PeopleService<CC>
where
    CC: CatalogClient,
{
    async fn get_person_by_id(&self, id: &str) -> Result<PersonDetail, PeopleError> {
        // dot segments would be resolved away by URL normalization
        if matches!(id, "" | "." | "..") {
            return Err(PeopleError::NotFound(format!(
                "No character found for id {}",
                id
            )));
        }
        let request = CatalogRequest::new("/people").with_segment(id);

        let response = self.client.get(request).await.map_err(|e| {
            tracing::error!(error = %e, id, "Character detail request failed");
            PeopleError::UpstreamUnavailable
        })?;

        let status = response.status;
        if status.is_client_error() {
            return Err(PeopleError::NotFound(format!(
                "No character found for id {}",
                id
            )));
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), id, "Catalog failed on character detail");
            return Err(PeopleError::UpstreamUnavailable);
        }

        let detail = response
            .decode::<SwapiPersonResponse>()
            .map_err(|e| {
                tracing::error!(error = %e, id, "Character detail undecodable");
                PeopleError::UpstreamUnavailable
            })?
            .and_then(SwapiPersonResponse::into_detail);

        detail.ok_or_else(|| {
            PeopleError::NotFound(format!("empty external response for id {}", id))
        })
    }

    async fn get_people(&self, query: PeopleQuery) -> Result<PersonPage, PeopleError> {
        match query.search_term() {
            Some(name) => self.search_people(name).await,
            None => self.paged_people(query.page, query.limit).await,
        }
    }
}
