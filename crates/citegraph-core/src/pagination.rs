//! # Pagination Cursor
//!
//! Stateless windowing over an ordered result sequence.
//!
//! Pages are 1-indexed. The cursor never clamps: a page outside
//! `1..=total_pages` is a caller error. Callers that accept raw user input
//! go through [`clamp_page`] first.

use crate::CiteError;
use crate::primitives::MAX_FULL_PAGE_LINKS;
use serde::{Deserialize, Serialize};

/// Number of pages for `len` items; never less than 1.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Clamp a requested page number into `1..=total_pages`.
#[must_use]
pub fn clamp_page(page_number: usize, len: usize, page_size: usize) -> usize {
    page_number.clamp(1, total_pages(len, page_size))
}

/// The slice of `items` shown on page `page_number`.
///
/// The last page may be shorter than `page_size`; the single page of an
/// empty sequence is empty.
pub fn page<T>(items: &[T], page_size: usize, page_number: usize) -> Result<&[T], CiteError> {
    if page_size == 0 {
        return Err(CiteError::InvalidPageSize);
    }
    let total = total_pages(items.len(), page_size);
    if page_number < 1 || page_number > total {
        return Err(CiteError::PageOutOfRange {
            page: page_number,
            total,
        });
    }
    let start = (page_number - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Ok(&items[start..end])
}

// =============================================================================
// PAGE LINKS
// =============================================================================

/// One entry of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLink {
    /// A clickable page number.
    Page(usize),
    /// An elided run of pages.
    Gap,
}

/// The page links to show around `current`.
///
/// All pages when there are at most `MAX_FULL_PAGE_LINKS`; otherwise the
/// first and last page, the neighbours of `current`, and gaps in between.
#[must_use]
pub fn visible_pages(current: usize, total: usize) -> Vec<PageLink> {
    if total <= MAX_FULL_PAGE_LINKS {
        return (1..=total).map(PageLink::Page).collect();
    }

    let mut links = vec![PageLink::Page(1)];
    if current > 4 {
        links.push(PageLink::Gap);
    }
    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);
    links.extend((start..=end).map(PageLink::Page));
    if current.saturating_add(3) < total {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Page(total));
    links
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_partial_page() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(total_pages(items.len(), 10), 3);
        let third = page(&items, 10, 3).expect("page");
        assert_eq!(third, &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn empty_sequence_has_one_empty_page() {
        let items: Vec<u8> = Vec::new();
        assert_eq!(total_pages(0, 10), 1);
        assert!(page(&items, 10, 1).expect("page").is_empty());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let items = [1, 2, 3];
        assert!(matches!(
            page(&items, 2, 0),
            Err(CiteError::PageOutOfRange { page: 0, total: 2 })
        ));
        assert!(matches!(
            page(&items, 2, 3),
            Err(CiteError::PageOutOfRange { page: 3, total: 2 })
        ));
        assert!(matches!(page(&items, 0, 1), Err(CiteError::InvalidPageSize)));
    }

    #[test]
    fn clamp_keeps_pages_in_range() {
        assert_eq!(clamp_page(0, 25, 10), 1);
        assert_eq!(clamp_page(9, 25, 10), 3);
        assert_eq!(clamp_page(2, 25, 10), 2);
    }

    #[test]
    fn few_pages_all_visible() {
        assert_eq!(
            visible_pages(1, 3),
            vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)]
        );
    }

    #[test]
    fn many_pages_collapse_around_current() {
        use PageLink::{Gap, Page};

        assert_eq!(
            visible_pages(1, 20),
            vec![Page(1), Page(2), Gap, Page(20)]
        );
        assert_eq!(
            visible_pages(10, 20),
            vec![Page(1), Gap, Page(9), Page(10), Page(11), Gap, Page(20)]
        );
        assert_eq!(
            visible_pages(20, 20),
            vec![Page(1), Gap, Page(19), Page(20)]
        );
        assert_eq!(
            visible_pages(4, 20),
            vec![Page(1), Page(3), Page(4), Page(5), Gap, Page(20)]
        );
    }
}
