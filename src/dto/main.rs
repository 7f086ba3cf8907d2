use serde::Serialize;

use crate::domain::character::Character;
use crate::pagination::PaginationWindow;

/// Data required to render the main index template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    /// Name filter echoed back into the search input.
    pub name: String,
    pub page: u32,
    pub total_pages: u32,
    /// A fetch is in flight; `characters` may belong to the previous parameters.
    pub loading: bool,
    /// Message of the failed fetch. When set the page renders the error view.
    pub error: Option<String>,
    pub characters: Vec<Character>,
    pub pagination: PaginationWindow,
}
