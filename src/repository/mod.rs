use async_trait::async_trait;

use crate::domain::character::CharacterPage;
use crate::domain::query::CharacterQuery;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod graphql;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use graphql::GraphqlCharacterRepository;

/// Source of character listings.
#[async_trait]
pub trait CharacterReader: Send + Sync {
    /// Fetches the page of characters matching `query`.
    async fn list_characters(&self, query: &CharacterQuery) -> RepositoryResult<CharacterPage>;
}
