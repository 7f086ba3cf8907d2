//! Character listings fetched from the public GraphQL endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::domain::character::{Character, CharacterPage, PageInfo};
use crate::domain::query::CharacterQuery;
use crate::domain::types::CharacterId;
use crate::repository::CharacterReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// GraphQL document sent for every listing request.
pub const CHARACTERS_QUERY: &str = "query ($page: Int, $name: String) { \
characters(page: $page, filter: { name: $name }) { \
info { pages next prev } \
results { id name image } \
} }";

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'static str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    page: u32,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<CharactersData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CharactersData {
    characters: Option<CharactersPayload>,
}

#[derive(Debug, Deserialize)]
struct CharactersPayload {
    info: Option<InfoPayload>,
    results: Option<Vec<CharacterPayload>>,
}

#[derive(Debug, Deserialize)]
struct InfoPayload {
    pages: Option<u32>,
    next: Option<u32>,
    prev: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CharacterPayload {
    id: String,
    name: String,
    image: String,
}

impl GraphqlResponse {
    /// Joined error messages, if the server reported any.
    fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn into_page(self) -> RepositoryResult<CharacterPage> {
        if let Some(message) = self.error_message() {
            return Err(RepositoryError::GraphQl(message));
        }

        let data = self
            .data
            .ok_or_else(|| RepositoryError::Decode("response carries no data".to_string()))?;

        let Some(characters) = data.characters else {
            return Ok(CharacterPage::default());
        };

        let info = characters
            .info
            .map(|info| PageInfo {
                pages: info.pages.unwrap_or(0),
                next: info.next,
                prev: info.prev,
            })
            .unwrap_or_default();

        let results = characters
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|c| Ok(Character::new(CharacterId::new(c.id)?, c.name, c.image)))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(CharacterPage { results, info })
    }
}

/// Decodes a raw GraphQL response body into a page of characters.
pub fn parse_characters_response(body: &str) -> RepositoryResult<CharacterPage> {
    let response: GraphqlResponse =
        serde_json::from_str(body).map_err(|e| RepositoryError::Decode(e.to_string()))?;
    response.into_page()
}

/// [`CharacterReader`] backed by a GraphQL endpoint reached over HTTP.
#[derive(Clone, Debug)]
pub struct GraphqlCharacterRepository {
    client: Client,
    endpoint: Url,
}

impl GraphqlCharacterRepository {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Builds a repository with its own HTTP client bounded by `timeout`.
    pub fn connect(endpoint: &str, timeout: Duration) -> RepositoryResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| RepositoryError::Config(format!("invalid api url '{endpoint}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self::new(client, endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CharacterReader for GraphqlCharacterRepository {
    async fn list_characters(&self, query: &CharacterQuery) -> RepositoryResult<CharacterPage> {
        let request = GraphqlRequest {
            query: CHARACTERS_QUERY,
            variables: Variables {
                page: query.page.get(),
                name: &query.name,
            },
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // GraphQL servers report validation failures with a 4xx status and an errors body.
            let message = serde_json::from_str::<GraphqlResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error_message());
            if let Some(message) = message {
                return Err(RepositoryError::GraphQl(message));
            }
            return Err(RepositoryError::Status(status.as_u16()));
        }

        parse_characters_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_upstream_shape() {
        let request = GraphqlRequest {
            query: CHARACTERS_QUERY,
            variables: Variables {
                page: 3,
                name: "rick",
            },
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["variables"]["page"], 3);
        assert_eq!(value["variables"]["name"], "rick");
        let text = value["query"].as_str().unwrap();
        assert!(text.contains("characters(page: $page, filter: { name: $name })"));
        assert!(text.contains("results { id name image }"));
    }

    #[test]
    fn parses_successful_response() {
        let body = r#"{
            "data": {
                "characters": {
                    "info": { "pages": 42, "next": 2, "prev": null },
                    "results": [
                        { "id": "1", "name": "Rick Sanchez", "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg" },
                        { "id": "2", "name": "Morty Smith", "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg" }
                    ]
                }
            }
        }"#;

        let page = parse_characters_response(body).unwrap();

        assert_eq!(page.info.pages, 42);
        assert_eq!(page.info.next, Some(2));
        assert_eq!(page.info.prev, None);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].id.as_str(), "2");
        assert_eq!(page.results[1].name, "Morty Smith");
        assert!(page.results[0].image_url.ends_with("/1.jpeg"));
    }

    #[test]
    fn errors_array_becomes_graphql_error() {
        let body = r#"{
            "errors": [
                { "message": "404: Not Found", "locations": [{ "line": 1, "column": 40 }] },
                { "message": "second" }
            ],
            "data": { "characters": null }
        }"#;

        let err = parse_characters_response(body).unwrap_err();

        assert!(matches!(&err, RepositoryError::GraphQl(m) if m == "404: Not Found; second"));
        assert_eq!(err.to_string(), "404: Not Found; second");
    }

    #[test]
    fn null_characters_is_an_empty_page() {
        let page = parse_characters_response(r#"{ "data": { "characters": null } }"#).unwrap();

        assert!(page.results.is_empty());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        let err = parse_characters_response("{}").unwrap_err();
        assert!(matches!(err, RepositoryError::Decode(_)));
    }

    #[test]
    fn blank_character_id_is_rejected() {
        let body = r#"{ "data": { "characters": {
            "info": { "pages": 1, "next": null, "prev": null },
            "results": [{ "id": " ", "name": "Nobody", "image": "x" }]
        } } }"#;

        let err = parse_characters_response(body).unwrap_err();
        assert!(matches!(err, RepositoryError::Decode(_)));
    }

    #[test]
    fn connect_rejects_invalid_url() {
        let err = GraphqlCharacterRepository::connect("not a url", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Config(_)));
    }
}
