use serde::Serialize;

/// Number of neighbours rendered on each side of the current page.
const WINDOW_RADIUS: u32 = 2;

/// One control of the pagination bar between the prev and next buttons.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    Page { number: u32, active: bool },
    Ellipsis,
}

fn get_pages(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    let page = |number| PageItem::Page {
        number,
        active: number == current_page,
    };

    let mut pages = vec![page(1)];

    if current_page > WINDOW_RADIUS + 1 {
        pages.push(PageItem::Ellipsis);
    }

    let low = current_page.saturating_sub(WINDOW_RADIUS).max(2);
    let high = current_page
        .saturating_add(WINDOW_RADIUS)
        .min(total_pages.saturating_sub(1));
    pages.extend((low..=high).map(page));

    if current_page.saturating_add(WINDOW_RADIUS) < total_pages {
        pages.push(PageItem::Ellipsis);
    }

    if total_pages > 1 {
        pages.push(page(total_pages));
    }

    pages
}

/// Page controls rendered above and below the character grid.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationWindow {
    pub current: u32,
    pub total: u32,
    pub pages: Vec<PageItem>,
    /// Target of the previous button; `None` disables it.
    pub prev: Option<u32>,
    /// Target of the next button; `None` disables it.
    pub next: Option<u32>,
}

impl PaginationWindow {
    /// Builds the controls for `current_page` out of `total_pages`.
    ///
    /// A zero total counts as one page and the current page is clamped into
    /// `1..=total_pages`.
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let total = total_pages.max(1);
        let current = current_page.clamp(1, total);

        Self {
            current,
            total,
            pages: get_pages(current, total),
            prev: (current > 1).then(|| current - 1),
            next: (current < total).then(|| current + 1),
        }
    }
}

#[cfg(test)]
impl PaginationWindow {
    /// Page numbers rendered as buttons, in order.
    pub(crate) fn numbers(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter_map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    pub(crate) fn has_leading_ellipsis(&self) -> bool {
        self.pages.get(1) == Some(&PageItem::Ellipsis)
    }

    pub(crate) fn has_trailing_ellipsis(&self) -> bool {
        self.total > 1 && self.pages.iter().rev().nth(1) == Some(&PageItem::Ellipsis)
    }
}
