//! Response shapes of the upstream Star Wars catalog.
//!
//! The catalog answers detail, listing and search requests with three
//! unrelated JSON layouts. Every field is optional and unknown fields are
//! ignored; deciding what a missing piece means is left to the service.

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use crate::domain::people::models::PersonDetail;
use crate::domain::people::models::PersonSummary;

const UNKNOWN_NAME: &str = "Unknown";

/// `GET /people/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiPersonResponse {
    pub result: Option<SwapiPersonResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiPersonResult {
    pub properties: Option<SwapiPersonProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiPersonProperties {
    pub name: Option<String>,
    pub height: Option<String>,
    pub gender: Option<String>,
    pub url: Option<String>,
}

impl SwapiPersonResponse {
    /// Detail view, if the payload actually carries a character.
    pub fn into_detail(self) -> Option<PersonDetail> {
        let properties = self.result?.properties?;
        Some(PersonDetail {
            name: properties.name,
            height: properties.height,
            gender: properties.gender,
            url: properties.url,
        })
    }
}

/// `GET /people?page=&limit=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiPeoplePage {
    pub message: Option<String>,
    pub total_records: Option<u64>,
    pub total_pages: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Option<Vec<SwapiPeopleItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiPeopleItem {
    pub uid: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl From<SwapiPeopleItem> for PersonSummary {
    fn from(item: SwapiPeopleItem) -> Self {
        Self {
            uid: item.uid,
            name: item.name,
        }
    }
}

/// `GET /people/?name=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiPeopleSearch {
    #[serde(alias = "results")]
    pub result: Option<Vec<SwapiSearchItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwapiSearchItem {
    pub uid: Option<String>,
    pub properties: Option<Map<String, Value>>,
}

impl SwapiSearchItem {
    /// The `name` property as text; `"Unknown"` when missing or null.
    pub fn display_name(&self) -> String {
        match self.properties.as_ref().and_then(|p| p.get("name")) {
            None | Some(Value::Null) => UNKNOWN_NAME.to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<SwapiSearchItem> for PersonSummary {
    fn from(item: SwapiSearchItem) -> Self {
        let name = item.display_name();
        Self {
            uid: item.uid,
            name: Some(name),
        }
    }
}
