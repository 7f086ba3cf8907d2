use crate::domain::query::CharacterQuery;
use crate::domain::types::PageNumber;
pub use crate::dto::api::{CharactersQuery, CharactersResponse};
use crate::pagination::PaginationWindow;
use crate::repository::CharacterReader;
use crate::services::ServiceResult;

/// Fetches one page of characters without touching any viewer state.
pub async fn list_characters<R>(
    repo: &R,
    params: CharactersQuery,
) -> ServiceResult<CharactersResponse>
where
    R: CharacterReader + ?Sized,
{
    let page = match params.page {
        Some(page) => PageNumber::new(page)?,
        None => PageNumber::FIRST,
    };
    let query = CharacterQuery::new(page, params.name.unwrap_or_default());

    let result = repo.list_characters(&query).await.map_err(|err| {
        log::error!("Failed to list characters: {err}");
        err
    })?;

    let total_pages = result.total_pages();
    let pagination = PaginationWindow::new(page.get(), total_pages);

    Ok(CharactersResponse {
        page: pagination.current,
        total_pages,
        characters: result.results,
        pagination,
    })
}
