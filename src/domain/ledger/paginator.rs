//! Fixed-size page slicing

use serde::{Deserialize, Serialize};

/// 1-based inclusive range of the items on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// `None` when the result set is empty
    pub shown: Option<ShownRange>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// `Showing 1-25 of 55`, or `No results`
    pub fn summary(&self) -> String {
        match self.shown {
            Some(range) => format!("Showing {}-{} of {}", range.start, range.end, self.total_items),
            None => "No results".to_string(),
        }
    }

    /// `Page 1 of 3`
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

/// Total pages for `total` items, never less than one
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Slice out one page. Out-of-range pages are clamped to the nearest valid
/// page; a zero `page_size` is treated as 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let current_page = page.clamp(1, total_pages);

    let start_idx = (current_page - 1) * page_size;
    let end_idx = (start_idx + page_size).min(total_items);
    let page_items = &items[start_idx.min(total_items)..end_idx];

    let shown = if total_items > 0 {
        Some(ShownRange {
            start: start_idx + 1,
            end: end_idx,
        })
    } else {
        None
    };

    Page {
        items: page_items,
        info: PageInfo {
            shown,
            current_page,
            total_pages,
            total_items,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
        },
    }
}
