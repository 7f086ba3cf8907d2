//! DTOs exposed by the JSON API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::character::Character;
use crate::pagination::PaginationWindow;

/// Query parameters accepted by the `/api/v1/characters` service.
#[derive(Debug, Default, Deserialize)]
pub struct CharactersQuery {
    /// Optional name filter; missing means every character.
    pub name: Option<String>,
    /// Optional page number, defaults to the first page.
    pub page: Option<u32>,
}

/// Result payload returned by [`crate::services::api::list_characters`].
#[derive(Debug, Serialize)]
pub struct CharactersResponse {
    pub page: u32,
    pub total_pages: u32,
    pub characters: Vec<Character>,
    pub pagination: PaginationWindow,
}
