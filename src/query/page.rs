//! Pagination over a sorted result list

use std::ops::Range;

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Where one page sits in the full result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-indexed
    pub page: usize,
    pub page_size: usize,
    pub total_matched: usize,
    pub total_pages: usize,
}

impl PageInfo {
    /// Page 0 is read as page 1; a zero page size as the default
    pub fn new(page: usize, page_size: usize, total_matched: usize) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Self {
            page: page.max(1),
            page_size,
            total_matched,
            total_pages: total_matched.div_ceil(page_size),
        }
    }

    /// Index range of this page, clamped to the result; empty past the end
    pub fn range(&self) -> Range<usize> {
        let start = (self.page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_matched);
        let end = start.saturating_add(self.page_size).min(self.total_matched);
        start..end
    }

    /// 1-indexed "showing a-b" bounds, None when the page is empty
    pub fn shown(&self) -> Option<(usize, usize)> {
        let range = self.range();
        if range.is_empty() {
            None
        } else {
            Some((range.start + 1, range.end))
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page numbers within `radius` of the current one, clamped to what exists
    pub fn window(&self, radius: usize) -> Vec<usize> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let current = self.page.min(self.total_pages);
        let first = current.saturating_sub(radius).max(1);
        let last = (current + radius).min(self.total_pages);
        (first..=last).collect()
    }
}

/// Slice out one page of an already sorted list
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], PageInfo) {
    let info = PageInfo::new(page, page_size, items.len());
    (&items[info.range()], info)
}
