//! Paginated carousel
//!
//! Splits a list into fixed-size pages and navigates them with wrap-around:
//! next on the last page returns to the first, previous on the first goes to
//! the last.
//!
//! ```rust
//! use vista_layout::Carousel;
//!
//! let mut testimonials = Carousel::new(vec!["a", "b", "c", "d", "e", "f"], 3).unwrap();
//! assert_eq!(testimonials.visible_items(), &["a", "b", "c"]);
//!
//! testimonials.prev_page();
//! assert_eq!(testimonials.visible_items(), &["d", "e", "f"]);
//! ```

use vista_core::{Result, VistaError};

/// A wrap-around pager over `items`
#[derive(Clone, Debug)]
pub struct Carousel<T> {
    items: Vec<T>,
    page_size: usize,
    current: usize,
}

impl<T> Carousel<T> {
    /// Create a carousel showing `page_size` items per page, starting on page 0
    pub fn new(items: impl Into<Vec<T>>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(VistaError::InvalidPageSize);
        }
        Ok(Self {
            items: items.into(),
            page_size,
            current: 0,
        })
    }

    /// Number of pages; an empty carousel still has one (empty) page
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Advance one page, wrapping to the first. Returns the new page.
    pub fn next_page(&mut self) -> usize {
        self.set_page((self.current + 1) % self.page_count())
    }

    /// Go back one page, wrapping to the last. Returns the new page.
    pub fn prev_page(&mut self) -> usize {
        let count = self.page_count();
        self.set_page((self.current + count - 1) % count)
    }

    /// Jump to `page`
    ///
    /// Out-of-range pages are rejected and leave the current page unchanged.
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page >= page_count {
            return Err(VistaError::OutOfRange {
                index: page,
                page_count,
            });
        }
        self.set_page(page);
        Ok(())
    }

    /// Items on the current page; the last page may be short
    pub fn visible_items(&self) -> &[T] {
        let start = (self.current * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// `(page, is_current)` for each navigation dot
    pub fn indicators(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.page_count()).map(move |page| (page, page == self.current))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn set_page(&mut self, page: usize) -> usize {
        if page != self.current {
            tracing::debug!(from = self.current, to = page, "carousel page changed");
            self.current = page;
        }
        self.current
    }
}
