use serde::Serialize;

use crate::domain::types::CharacterId;

/// One card of the character grid.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub image_url: String,
}

impl Character {
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

/// Paging metadata reported by the upstream API.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PageInfo {
    /// Number of pages matching the filter. Zero when nothing matched.
    pub pages: u32,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

/// One page of characters as returned by a single fetch.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CharacterPage {
    pub results: Vec<Character>,
    pub info: PageInfo,
}

impl CharacterPage {
    /// Page count shown to the user; an empty listing still has one page.
    pub fn total_pages(&self) -> u32 {
        self.info.pages.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_still_has_one_page() {
        let page = CharacterPage::default();
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn total_pages_follows_info() {
        let page = CharacterPage {
            results: vec![Character::new(
                CharacterId::new("1").unwrap(),
                "Rick Sanchez",
                "https://example.com/1.jpeg",
            )],
            info: PageInfo {
                pages: 42,
                next: Some(2),
                prev: None,
            },
        };
        assert_eq!(page.total_pages(), 42);
    }
}
