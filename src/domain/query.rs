use serde::Serialize;

use crate::domain::types::PageNumber;

/// Parameters of one character listing request.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CharacterQuery {
    pub page: PageNumber,
    /// Name filter sent verbatim; an empty string matches every character.
    pub name: String,
}

impl CharacterQuery {
    pub fn new(page: PageNumber, name: impl Into<String>) -> Self {
        Self {
            page,
            name: name.into(),
        }
    }

    /// Replaces the name filter and goes back to the first page.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            page: PageNumber::FIRST,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_page(self, page: PageNumber) -> Self {
        Self { page, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_name_resets_page() {
        let query = CharacterQuery::new(PageNumber::new(4).unwrap(), "rick");

        let query = query.with_name("morty");

        assert_eq!(query.page, PageNumber::FIRST);
        assert_eq!(query.name, "morty");
    }

    #[test]
    fn changing_page_keeps_name() {
        let query = CharacterQuery::default().with_name("beth");

        let query = query.with_page(PageNumber::new(2).unwrap());

        assert_eq!(query.page.get(), 2);
        assert_eq!(query.name, "beth");
    }
}
