//! Filter, sort, paginate
//!
//! A query never mutates the catalog. Running the same query twice against the
//! same catalog yields the same page.

use serde::Serialize;

use super::filter::FilterSpec;
use super::page::{paginate, PageInfo};
use super::sort::SortSpec;
use crate::catalog::Catalog;
use crate::items::Item;

/// One page of matching items plus the totals around it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a> {
    pub items: Vec<&'a Item>,
    pub total_matched: usize,
    pub page: PageInfo,
}

impl QueryResult<'_> {
    /// True when the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items that pass the filter, in catalog order
pub fn filter_items<'a>(items: &'a [Item], filter: &FilterSpec) -> Vec<&'a Item> {
    let matcher = filter.matcher();
    items.iter().filter(|item| matcher.matches(item)).collect()
}

/// Stable sort in place
pub fn sort_items(items: &mut Vec<&Item>, sort: &SortSpec) {
    sort.sort(items);
}

/// Filter, sort, then cut out one 1-indexed page
pub fn query<'a>(
    catalog: &'a Catalog,
    filter: &FilterSpec,
    sort: &SortSpec,
    page: usize,
    page_size: usize,
) -> QueryResult<'a> {
    let mut matched = filter_items(catalog.items(), filter);
    sort_items(&mut matched, sort);

    let (slice, info) = paginate(&matched, page, page_size);
    log::debug!(
        "Query matched {} of {} items, page {}/{}",
        info.total_matched,
        catalog.len(),
        info.page,
        info.total_pages
    );

    QueryResult {
        items: slice.to_vec(),
        total_matched: info.total_matched,
        page: info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::items::ItemType;
    use crate::query::sort::SortField;

    fn names(result: &QueryResult<'_>) -> Vec<String> {
        result.items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_unfiltered_unsorted_keeps_catalog_order() {
        let catalog = sample_catalog();
        let mut matched = filter_items(catalog.items(), &FilterSpec::default());
        assert_eq!(matched.len(), catalog.len());
        assert_eq!(matched[0].name, "a leather backpack");

        // No sample item has a weight, so every key ties
        sort_items(&mut matched, &SortSpec::asc(SortField::Weight));
        let names: Vec<&str> = matched.iter().map(|i| i.name.as_str()).collect();
        let original: Vec<&str> = catalog.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, original);
    }

    #[test]
    fn test_query_is_idempotent() {
        let catalog = sample_catalog();
        let filter = FilterSpec::new().with_text("a");
        let sort = SortSpec::desc(SortField::Price);

        let first = query(&catalog, &filter, &sort, 1, 4);
        let second = query(&catalog, &filter, &sort, 1, 4);
        assert_eq!(names(&first), names(&second));
        assert_eq!(first.page, second.page);
        assert_eq!(first.total_matched, 6);
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.items[0].name, "a bronze tower shield");
    }

    #[test]
    fn test_paging_through_matches() {
        let catalog = sample_catalog();
        let filter = FilterSpec::default();
        let sort = SortSpec::default();

        let second = query(&catalog, &filter, &sort, 2, 4);
        assert_eq!(names(&second), vec!["a leather backpack", "a steel broadsword"]);
        assert_eq!(second.page.total_pages, 2);

        let past_end = query(&catalog, &filter, &sort, 3, 4);
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_matched, 6);
    }

    #[test]
    fn test_every_result_matches_filter() {
        let catalog = sample_catalog();
        let filter = FilterSpec::new().with_item_type(ItemType::Jewelry);
        let result = query(&catalog, &filter, &SortSpec::default(), 1, 100);
        assert_eq!(names(&result), vec!["a gold ring"]);
        assert!(result.items.iter().all(|i| filter.matches(i)));
    }
}
