use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Normalized page request. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Pagination {
    /// Out-of-range values fall back to the first page and the default size.
    ///
    /// The page is capped so that the offset always fits in an `i64`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page_size = match page_size {
            Some(s) if s >= 1 => (s as u64).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        let max_page = i64::MAX as u64 / page_size + 1;
        let page = match page {
            Some(p) if p >= 1 => (p as u64).min(max_page),
            _ => 1,
        };

        Self { page, page_size }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total_items: u64) -> Self {
        let page_size = pagination.page_size();

        Self {
            items,
            page: pagination.page(),
            page_size,
            total_items,
            total_pages: (total_items + page_size - 1) / page_size,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalization() {
        let p = Pagination::new(None, None);
        assert_eq!((p.page(), p.page_size(), p.offset()), (1, 10, 0));

        let p = Pagination::new(Some(0), Some(-5));
        assert_eq!((p.page(), p.page_size()), (1, 10));

        let p = Pagination::new(Some(3), Some(500));
        assert_eq!((p.page(), p.page_size(), p.offset()), (3, 100, 200));
    }

    #[test]
    fn huge_page() {
        let p = Pagination::new(Some(i64::MAX), Some(100));
        assert_eq!(p.page(), 92_233_720_368_547_759);
        assert_eq!(p.offset(), 9_223_372_036_854_775_800);
        assert!(i64::try_from(p.offset()).is_ok());

        let p = Pagination::new(Some(i64::MAX), None);
        assert!(i64::try_from(p.offset()).is_ok());

        let p = Pagination::new(Some(i64::MAX), Some(1));
        assert_eq!(p.offset(), i64::MAX as u64 - 1);
    }

    #[test]
    fn total_pages() {
        let pagination = Pagination::new(Some(1), Some(10));
        assert_eq!(Page::<u8>::new(vec![], pagination, 0).total_pages, 0);
        assert_eq!(Page::<u8>::new(vec![], pagination, 10).total_pages, 1);
        assert_eq!(Page::<u8>::new(vec![], pagination, 11).total_pages, 2);
    }
}
