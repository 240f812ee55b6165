//! Client-side pagination over a shared list
//!
//! Pages are 1-based. The page number is clamped on every write and on
//! every rebind, so it always points at a page that exists.

use std::num::NonZeroUsize;
use std::sync::Arc;

/// Page window over an ordered, shared list
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    page_size: NonZeroUsize,
    page_number: usize,
    items: Arc<Vec<T>>,
}

impl<T> Paginator<T> {
    /// Create a paginator on page 1
    pub fn new(page_size: NonZeroUsize, items: Arc<Vec<T>>) -> Self {
        Self {
            page_size,
            page_number: 1,
            items,
        }
    }

    /// Paginator that shows the whole list as a single page
    pub fn unbounded(items: Arc<Vec<T>>) -> Self {
        Self::new(NonZeroUsize::MAX, items)
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// True when the list is split into pages at all
    pub fn is_paged(&self) -> bool {
        self.page_size != NonZeroUsize::MAX
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// `ceil(len / page_size)`, never less than 1
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size.get()).max(1)
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// Move to page `n`, clamped into `[1, page_count]`. Returns the page landed on.
    pub fn set_page(&mut self, n: usize) -> usize {
        self.page_number = n.clamp(1, self.page_count());
        self.page_number
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page_number.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page_number.saturating_sub(1))
    }

    /// Swap in a new list and re-clamp the page number against it
    pub fn rebind(&mut self, items: Arc<Vec<T>>) {
        self.items = items;
        self.set_page(self.page_number);
    }

    /// Items on the current page, in list order
    pub fn current_page_items(&self) -> &[T] {
        let size = self.page_size.get();
        let len = self.items.len();
        let start = (self.page_number - 1).saturating_mul(size).min(len);
        let end = self.page_number.saturating_mul(size).min(len);
        &self.items[start..end]
    }
}
