use crate::error::{DteError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Items of the 1-indexed `page`, clipped to the slice bounds
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// Current-page state for one paginated listing.
///
/// Relative moves (first/prev/next/last) clamp to the valid range; direct
/// jumps to a page that does not exist are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page_size, self.current)
    }

    pub fn first(&mut self) {
        self.current = 1;
    }

    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, total: usize) {
        self.current = (self.current + 1).min(self.page_count(total).max(1));
    }

    pub fn last(&mut self, total: usize) {
        self.current = self.page_count(total).max(1);
    }

    pub fn jump(&mut self, page: usize, total: usize) -> Result<()> {
        let count = self.page_count(total);
        if page == 0 || page > count {
            return Err(DteError::InvalidPage { page, count });
        }
        self.current = page;
        Ok(())
    }

    /// Pull the current page back into range after the listing shrank
    pub fn clamp(&mut self, total: usize) {
        self.current = self.current.clamp(1, self.page_count(total).max(1));
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.current < self.page_count(total)
    }
}
