//! Page slicing over a filtered collection.

use serde::Serialize;
use std::num::NonZeroUsize;

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Rows on this page; at most `page_size` long, empty past the end.
    pub rows: &'a [T],
    /// Requested page index (0-based), not clamped.
    pub page_index: usize,
    /// `ceil(total_count / page_size)`.
    pub page_count: usize,
    /// Length of the whole filtered collection.
    pub total_count: usize,
}

/// Page position shown by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_count: usize,
    pub total_count: usize,
}

impl<T> Page<'_, T> {
    /// Position of this page without the rows.
    #[must_use]
    pub const fn info(&self) -> PageInfo {
        PageInfo {
            page_index: self.page_index,
            page_count: self.page_count,
            total_count: self.total_count,
        }
    }
}

/// Slices `items` into the page at `page_index`.
///
/// An index past the last page yields empty rows rather than an error. The
/// index is never clamped here; see [`clamp_page_index`].
#[must_use]
pub fn paginate<T>(items: &[T], page_index: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let size = page_size.get();
    let total_count = items.len();
    let rows = page_index
        .checked_mul(size)
        .and_then(|start| items.get(start..))
        .unwrap_or_default();
    let rows = rows.get(..size).unwrap_or(rows);

    Page {
        rows,
        page_index,
        page_count: total_count.div_ceil(size),
        total_count,
    }
}

/// Pulls `page_index` back onto the last page when it is out of range.
///
/// Callers use this after the page size or the filtered total changes.
#[must_use]
pub fn clamp_page_index(page_index: usize, total_count: usize, page_size: NonZeroUsize) -> usize {
    let page_count = total_count.div_ceil(page_size.get());
    page_index.min(page_count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn last_partial_page() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 2, size(10));
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.rows, &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn past_the_end_is_empty_not_error() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 3, size(10));
        assert!(page.rows.is_empty());
        assert_eq!(page.page_count, 3);
        assert!(paginate(&items, usize::MAX, size(10)).rows.is_empty());
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 0, size(10));
        assert_eq!(page.page_count, 0);
        assert!(page.rows.is_empty());
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(7, 3)]
    #[case(30, 10)]
    #[case(31, 10)]
    #[case(17, 40)]
    fn pages_concatenate_to_source(#[case] len: usize, #[case] page_size: usize) {
        let items: Vec<usize> = (0..len).collect();
        let first = paginate(&items, 0, size(page_size));
        let joined: Vec<usize> = (0..first.page_count)
            .flat_map(|i| paginate(&items, i, size(page_size)).rows.to_vec())
            .collect();
        assert_eq!(joined, items);
        for i in 0..first.page_count {
            assert!(paginate(&items, i, size(page_size)).rows.len() <= page_size);
        }
    }

    #[rstest]
    #[case(5, 25, 10, 2)]
    #[case(1, 25, 10, 1)]
    #[case(4, 0, 10, 0)]
    #[case(2, 25, 25, 0)]
    fn clamp_pulls_index_back(
        #[case] index: usize,
        #[case] total: usize,
        #[case] page_size: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(clamp_page_index(index, total, size(page_size)), expected);
    }
}
