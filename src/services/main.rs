use validator::Validate;

use crate::domain::types::PageNumber;
use crate::domain::view::ViewState;
use crate::dto::main::IndexPageData;
use crate::forms::main::SearchForm;
use crate::pagination::PaginationWindow;
use crate::repository::CharacterReader;
use crate::services::viewers::{FetchOutcome, FetchTicket, ViewChange, ViewerId, ViewerRegistry};
use crate::services::{ServiceError, ServiceResult};

/// Registers a page view. Returns a ticket when this is the viewer's first visit.
pub fn visit(registry: &ViewerRegistry, viewer: ViewerId) -> ServiceResult<Option<FetchTicket>> {
    registry.apply(viewer, ViewChange::Visit)
}

/// Builds the index page for the viewer's current state.
pub fn load_index_page(registry: &ViewerRegistry, viewer: ViewerId) -> ServiceResult<IndexPageData> {
    let state = registry.snapshot(viewer)?.unwrap_or_default();
    Ok(index_page_data(&state))
}

fn index_page_data(state: &ViewState) -> IndexPageData {
    let status = state.status();
    let total_pages = state.total_pages();
    let pagination = PaginationWindow::new(state.query().page.get(), total_pages);

    IndexPageData {
        name: state.query().name.clone(),
        page: pagination.current,
        total_pages: pagination.total,
        loading: status.is_loading(),
        error: status.error().map(str::to_string),
        characters: status
            .data()
            .map(|page| page.results.clone())
            .unwrap_or_default(),
        pagination,
    }
}

/// Validates the search form, replaces the name filter and resets to page one.
pub fn search(
    registry: &ViewerRegistry,
    viewer: ViewerId,
    form: SearchForm,
) -> ServiceResult<FetchTicket> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate search form: {err}");
        return Err(ServiceError::Form(
            "Search text must be at most 100 characters".to_string(),
        ));
    }

    expect_ticket(registry.apply(viewer, ViewChange::Search(form.name))?)
}

/// Moves the viewer to `page`, clamped to the known page count.
pub fn go_to_page(
    registry: &ViewerRegistry,
    viewer: ViewerId,
    page: u32,
) -> ServiceResult<FetchTicket> {
    let page = PageNumber::new(page)?;
    expect_ticket(registry.apply(viewer, ViewChange::GoToPage(page))?)
}

/// Refetches the viewer's current parameters.
pub fn refresh(registry: &ViewerRegistry, viewer: ViewerId) -> ServiceResult<FetchTicket> {
    expect_ticket(registry.apply(viewer, ViewChange::Refresh)?)
}

fn expect_ticket(ticket: Option<FetchTicket>) -> ServiceResult<FetchTicket> {
    ticket.ok_or_else(|| ServiceError::Internal("parameter change issued no fetch".to_string()))
}

/// Runs the fetch described by `ticket` and stores its result unless superseded.
pub async fn execute_fetch<R>(
    repo: &R,
    registry: &ViewerRegistry,
    ticket: FetchTicket,
) -> ServiceResult<FetchOutcome>
where
    R: CharacterReader + ?Sized,
{
    let result = repo.list_characters(&ticket.query).await.map_err(|err| {
        log::error!(
            "Failed to fetch characters for viewer {} (page {}, name '{}'): {err}",
            ticket.viewer,
            ticket.query.page,
            ticket.query.name
        );
        err.to_string()
    });

    let outcome = registry.complete(&ticket, result)?;
    if outcome == FetchOutcome::Superseded {
        log::debug!(
            "Discarded result of generation {} for viewer {}",
            ticket.generation,
            ticket.viewer
        );
    }
    Ok(outcome)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::domain::character::{Character, CharacterPage, PageInfo};
    use crate::domain::types::CharacterId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn listing(pages: u32, names: &[&str]) -> CharacterPage {
        CharacterPage {
            results: names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    Character::new(
                        CharacterId::new((i + 1).to_string()).expect("valid id"),
                        *name,
                        format!("https://example.com/{}.jpeg", i + 1),
                    )
                })
                .collect(),
            info: PageInfo {
                pages,
                next: None,
                prev: None,
            },
        }
    }

    fn registry() -> ViewerRegistry {
        ViewerRegistry::new(Duration::from_secs(60))
    }

    /// Ensures the first visit fetches the unfiltered first page.
    #[actix_web::test]
    async fn first_visit_fetches_first_page() {
        let registry = registry();
        let viewer = Uuid::new_v4();
        let mut repo = MockRepository::new();
        repo.expect_list_characters()
            .withf(|query| query.page == PageNumber::FIRST && query.name.is_empty())
            .times(1)
            .returning(|_| Ok(listing(42, &["Rick Sanchez", "Morty Smith"])));

        let ticket = visit(&registry, viewer).unwrap().expect("first visit fetches");
        let outcome = execute_fetch(&repo, &registry, ticket).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        let data = load_index_page(&registry, viewer).unwrap();
        assert!(!data.loading);
        assert_eq!(data.total_pages, 42);
        assert_eq!(data.characters.len(), 2);
        assert_eq!(data.pagination.numbers(), vec![1, 2, 3, 42]);
    }

    /// Checks that a search sends the name and resets the page.
    #[actix_web::test]
    async fn search_resets_page_and_sends_name() {
        let registry = registry();
        let viewer = Uuid::new_v4();
        let mut repo = MockRepository::new();
        repo.expect_list_characters()
            .returning(|_| Ok(listing(10, &["Rick Sanchez"])));

        let ticket = visit(&registry, viewer).unwrap().unwrap();
        execute_fetch(&repo, &registry, ticket).await.unwrap();
        let ticket = go_to_page(&registry, viewer, 5).unwrap();
        assert_eq!(ticket.query.page.get(), 5);

        let ticket = search(
            &registry,
            viewer,
            SearchForm {
                name: "rick".to_string(),
            },
        )
        .unwrap();

        assert_eq!(ticket.query.page, PageNumber::FIRST);
        assert_eq!(ticket.query.name, "rick");
    }

    /// Verifies a slow response for old parameters cannot overwrite newer results.
    #[actix_web::test]
    async fn stale_response_is_discarded() {
        let registry = registry();
        let viewer = Uuid::new_v4();
        let mut repo = MockRepository::new();
        repo.expect_list_characters().returning(|query| {
            if query.name == "rick" {
                Ok(listing(3, &["Rick Sanchez"]))
            } else {
                Ok(listing(1, &["Morty Smith"]))
            }
        });

        let rick = search(&registry, viewer, SearchForm { name: "rick".into() }).unwrap();
        let morty = search(&registry, viewer, SearchForm { name: "morty".into() }).unwrap();

        let applied = execute_fetch(&repo, &registry, morty).await.unwrap();
        let discarded = execute_fetch(&repo, &registry, rick).await.unwrap();

        assert_eq!(applied, FetchOutcome::Applied);
        assert_eq!(discarded, FetchOutcome::Superseded);
        let data = load_index_page(&registry, viewer).unwrap();
        assert_eq!(data.name, "morty");
        assert_eq!(data.characters[0].name, "Morty Smith");
    }

    /// Confirms upstream failures turn into the error view.
    #[actix_web::test]
    async fn failure_is_exposed_as_error() {
        let registry = registry();
        let viewer = Uuid::new_v4();
        let mut repo = MockRepository::new();
        repo.expect_list_characters()
            .returning(|_| Err(RepositoryError::GraphQl("404: Not Found".to_string())));

        let ticket = visit(&registry, viewer).unwrap().unwrap();
        execute_fetch(&repo, &registry, ticket).await.unwrap();

        let data = load_index_page(&registry, viewer).unwrap();
        assert_eq!(data.error.as_deref(), Some("404: Not Found"));
        assert!(data.characters.is_empty());
    }

    #[test]
    fn overlong_search_is_rejected() {
        let registry = registry();
        let form = SearchForm {
            name: "x".repeat(101),
        };

        let result = search(&registry, Uuid::new_v4(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn page_zero_is_rejected() {
        let registry = registry();

        let result = go_to_page(&registry, Uuid::new_v4(), 0);

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[test]
    fn unknown_viewer_sees_loading_first_page() {
        let data = load_index_page(&registry(), Uuid::new_v4()).unwrap();

        assert!(data.loading);
        assert_eq!(data.page, 1);
        assert_eq!(data.total_pages, 1);
        assert_eq!(data.pagination.prev, None);
        assert_eq!(data.pagination.next, None);
    }
}
