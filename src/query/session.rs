//! Query state held across interactions
//!
//! Every re-query starts over at the first page, whether the filter or the
//! sort changed.

use super::engine::{query, QueryResult};
use super::filter::FilterSpec;
use super::page::DEFAULT_PAGE_SIZE;
use super::sort::{SortField, SortSpec};
use crate::catalog::Catalog;

/// Filter, sort and page a front end carries between queries
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySession {
    filter: FilterSpec,
    sort: SortSpec,
    page: usize,
    page_size: usize,
}

impl Default for QuerySession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QuerySession {
    /// Unfiltered first page; a zero page size means the default
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            page: 1,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run the current query against the catalog
    pub fn run<'a>(&self, catalog: &'a Catalog) -> QueryResult<'a> {
        query(catalog, &self.filter, &self.sort, self.page, self.page_size)
    }

    /// Apply a filter and go back to page 1
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.page = 1;
    }

    /// Change the ordering and go back to page 1
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 1;
    }

    /// Clicking a column: same field flips direction, a new field starts ascending
    pub fn toggle_sort(&mut self, field: SortField) {
        let sort = if self.sort.field == field {
            SortSpec::new(field, self.sort.direction.flipped())
        } else {
            SortSpec::asc(field)
        };
        self.set_sort(sort);
    }

    /// Named sort; unknown names sort by name
    pub fn apply_preset(&mut self, name: &str) {
        self.set_sort(SortSpec::from_preset(name));
    }

    /// Advance unless already on the last page
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Step back unless already on page 1
    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Back to an unfiltered first page sorted by name
    pub fn reset(&mut self) {
        self.filter = FilterSpec::default();
        self.sort = SortSpec::default();
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::query::sort::SortDirection;

    #[test]
    fn test_filter_resets_page() {
        let mut session = QuerySession::new(2);
        session.go_to_page(3);
        session.set_filter(FilterSpec::default());
        assert_eq!(session.page(), 1);

        session.go_to_page(2);
        session.set_filter(FilterSpec::new().with_town("Solhaven"));
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn test_sort_change_resets_page() {
        let catalog = sample_catalog();
        let mut session = QuerySession::new(4);
        session.go_to_page(2);

        session.toggle_sort(SortField::Price);
        assert_eq!(session.page(), 1);

        session.go_to_page(2);
        session.apply_preset("price-desc");
        assert_eq!(session.page(), 1);
        assert_eq!(session.sort(), SortSpec::desc(SortField::Price));

        session.go_to_page(2);
        session.set_sort(SortSpec::asc(SortField::Town));
        assert_eq!(session.page(), 1);
        assert_eq!(session.run(&catalog).items.len(), 4);
    }

    #[test]
    fn test_reset_restores_default_sort() {
        let mut session = QuerySession::new(4);
        session.apply_preset("price-desc");
        session.set_filter(FilterSpec::new().with_town("Solhaven"));
        session.go_to_page(2);

        session.reset();
        assert_eq!(session.sort(), SortSpec::default());
        assert_eq!(session.page(), 1);
        assert!(session.filter().is_unconstrained());
    }

    #[test]
    fn test_toggle_sort() {
        let mut session = QuerySession::default();
        session.toggle_sort(SortField::Name);
        assert_eq!(session.sort().direction, SortDirection::Desc);
        session.toggle_sort(SortField::Price);
        assert_eq!(session.sort(), SortSpec::asc(SortField::Price));
    }

    #[test]
    fn test_paging() {
        let catalog = sample_catalog();
        let mut session = QuerySession::new(4);

        let first = session.run(&catalog);
        assert_eq!(first.items.len(), 4);
        assert!(!session.previous_page());

        assert!(session.next_page(first.page.total_pages));
        let second = session.run(&catalog);
        assert_eq!(second.items.len(), 2);
        assert!(!session.next_page(second.page.total_pages));

        session.reset();
        assert_eq!(session.page(), 1);
        assert!(session.filter().is_unconstrained());
    }
}
