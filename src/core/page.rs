//! Paged lists
//!
//! A [`Page`] is one window of a larger ordered sequence, plus the arithmetic
//! clients need to walk the rest of it. The window is either cut from an
//! in-memory sequence ([`paginate`]) or fetched by the repository with an
//! offset and limit and wrapped with the total count ([`Page::from_window`]).

use crate::core::query::PaginationMeta;
use serde::Serialize;

/// One window of an ordered sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    total_count: usize,
    current_page: usize,
    page_size: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Wrap a window that was already cut by the caller
    ///
    /// `page_number` and `page_size` describe the window; `total_count` is the
    /// size of the whole sequence. A page size of 0 yields zero total pages.
    pub fn from_window(
        items: Vec<T>,
        total_count: usize,
        page_number: usize,
        page_size: usize,
    ) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            items,
            total_count,
            current_page: page_number,
            page_size,
            total_pages,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Transform the items, keeping the paging arithmetic
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    /// Fallible [`map`](Self::map)
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        })
    }

    /// Metadata for the `X-Pagination` header
    pub fn metadata(&self) -> PaginationMeta {
        PaginationMeta {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}

/// Cut page `page_number` (1-based) of `page_size` items out of `source`
///
/// Counts the whole source, then skips `(page_number - 1) * page_size` items
/// and takes at most `page_size`. Page numbers past the end produce an empty
/// page with the correct totals. Callers are expected to pass a page number of
/// at least 1; 0 is treated as 1.
pub fn paginate<I>(source: I, page_number: usize, page_size: usize) -> Page<I::Item>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    let source = source.into_iter();
    let total_count = source.len();
    let page_number = page_number.max(1);
    let offset = (page_number - 1).saturating_mul(page_size);

    let items = source.skip(offset).take(page_size).collect();
    Page::from_window(items, total_count, page_number, page_size)
}

/// Offset of the first item of `page_number` (1-based)
pub fn page_offset(page_number: usize, page_size: usize) -> usize {
    page_number.max(1).saturating_sub(1).saturating_mul(page_size)
}
