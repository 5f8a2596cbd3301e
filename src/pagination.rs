//! Page slices returned by list endpoints and the page-number window shown
//! under every table.

use serde::{Deserialize, Serialize};

/// Page sizes offered by the "rows per page" selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Page size restricted to [`PAGE_SIZE_OPTIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PageSize(usize);

impl PageSize {
    /// Accepts only one of the allowed sizes.
    pub fn new(size: usize) -> Option<Self> {
        PAGE_SIZE_OPTIONS.contains(&size).then_some(Self(size))
    }

    /// Falls back to the default size for anything outside the allow-list.
    pub fn or_default(size: Option<usize>) -> Self {
        size.and_then(Self::new).unwrap_or_default()
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Highest page number a request may ask for.
pub const MAX_PAGE_NO: usize = i32::MAX as usize;

/// Clamps a requested page number to `1..=MAX_PAGE_NO`.
pub fn normalize_page(page: Option<usize>) -> usize {
    page.filter(|p| *p > 0).unwrap_or(1).min(MAX_PAGE_NO)
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current + 1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of records together with the totals needed to paginate.
///
/// Serialized in the camelCase shape list endpoints return.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub content: Vec<T>,
    pub page_no: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub first: bool,
    pub last: bool,
}

impl<T> ListPage<T> {
    /// Builds a page; `page_no` is 1-based and `page_size` must be non-zero.
    pub fn new(content: Vec<T>, page_no: usize, page_size: usize, total_elements: usize) -> Self {
        let page_no = page_no.max(1);
        let page_size = page_size.max(1);
        let mut page = Self {
            content,
            page_no,
            page_size,
            total_elements,
            total_pages: 0,
            has_next: false,
            has_previous: false,
            first: true,
            last: true,
        };
        page.recompute();
        page
    }

    pub fn empty(page_size: usize) -> Self {
        Self::new(Vec::new(), 1, page_size, 0)
    }

    /// Refreshes derived fields after `content` or `total_elements` changed.
    pub fn recompute(&mut self) {
        self.total_pages = self.total_elements.div_ceil(self.page_size);
        self.has_previous = self.page_no > 1;
        self.has_next = self.page_no < self.total_pages;
        self.first = self.page_no == 1;
        self.last = self.page_no >= self.total_pages;
    }

    /// Page-number window for the pager, `None` marks an ellipsis.
    pub fn pages(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages, self.page_no, 2, 2, 4, 2)
    }

    pub fn map<U, F>(self, f: F) -> ListPage<U>
    where
        F: FnMut(T) -> U,
    {
        ListPage {
            content: self.content.into_iter().map(f).collect(),
            page_no: self.page_no,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
            first: self.first,
            last: self.last,
        }
    }
}

/// Page the list should show once the only remaining record on a page
/// beyond the first was deleted, or `None` when a plain reload suffices.
pub fn page_after_delete(current_page: usize, items_on_page: usize) -> Option<usize> {
    (items_on_page <= 1 && current_page > 1).then(|| current_page - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_allow_list() {
        for size in PAGE_SIZE_OPTIONS {
            assert_eq!(PageSize::new(size).map(PageSize::get), Some(size));
        }
        assert_eq!(PageSize::new(7), None);
        assert_eq!(PageSize::or_default(Some(100)).get(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(PageSize::or_default(Some(50)).get(), 50);
    }

    #[test]
    fn normalize_page_clamps_to_one() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some(0)), 1);
        assert_eq!(normalize_page(Some(4)), 4);
        assert_eq!(normalize_page(Some(usize::MAX)), MAX_PAGE_NO);
    }

    #[test]
    fn pager_survives_huge_page_numbers() {
        let page: ListPage<i32> = ListPage::new(vec![], usize::MAX, 10, 25);
        assert_eq!(page.pages(), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn list_page_derives_totals() {
        let page = ListPage::new(vec![1, 2, 3], 2, 3, 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);
        assert!(!page.first);
        assert!(!page.last);

        let empty: ListPage<i32> = ListPage::empty(10);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.first && empty.last && !empty.has_next);
    }

    #[test]
    fn list_page_serializes_camel_case() {
        let page = ListPage::new(vec!["a"], 1, 10, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageNo"], 1);
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["hasPrevious"], false);
    }

    #[test]
    fn pages_window_has_ellipses() {
        let page: ListPage<()> = ListPage::new(vec![], 10, 10, 200);
        assert_eq!(
            page.pages(),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn deleting_last_item_steps_back_a_page() {
        assert_eq!(page_after_delete(2, 1), Some(1));
        assert_eq!(page_after_delete(1, 1), None);
        assert_eq!(page_after_delete(3, 4), None);
    }
}
