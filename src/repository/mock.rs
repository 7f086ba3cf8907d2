//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::character::CharacterPage;
use crate::domain::query::CharacterQuery;
use crate::repository::CharacterReader;
use crate::repository::errors::RepositoryResult;

mock! {
    pub Repository {}

    #[async_trait]
    impl CharacterReader for Repository {
        async fn list_characters(&self, query: &CharacterQuery) -> RepositoryResult<CharacterPage>;
    }
}
