//! Deterministic pagination over an already-ordered result set.

/// Fixed page size for every listing surface.
pub const POSTS_PER_PAGE: usize = 10;

/// One page of an ordered result set, with navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slice `items` into fixed-size pages and return the requested one.
///
/// Out-of-range requests never error: a missing or non-positive page falls
/// back to page 1, a page past the end falls back to the last valid page.
/// An empty input yields a single empty page (`total_pages == 1`).
pub fn paginate<T>(items: Vec<T>, page_size: usize, requested: Option<usize>) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);

    let current_page = match requested {
        None | Some(0) => 1,
        Some(p) if p > total_pages => total_pages,
        Some(p) => p,
    };

    let start = (current_page - 1) * page_size;
    let page_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Page {
        items: page_items,
        current_page,
        total_pages,
        has_next: current_page < total_pages,
        has_previous: current_page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_full_and_partial_pages() {
        let page = paginate((1..=23).collect(), 10, Some(1));
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(!page.has_previous);

        let page = paginate((1..=23).collect(), 10, Some(3));
        assert_eq!(page.items, vec![21, 22, 23]);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn overflow_falls_back_to_last_page() {
        let overflow = paginate((1..=23).collect(), 10, Some(5));
        let last = paginate((1..=23).collect(), 10, Some(3));
        assert_eq!(overflow, last);
        assert_eq!(overflow.current_page, 3);
    }

    #[test]
    fn missing_or_zero_page_falls_back_to_first() {
        let page = paginate((1..=5).collect::<Vec<_>>(), 10, None);
        assert_eq!(page.current_page, 1);

        let page = paginate((1..=5).collect::<Vec<_>>(), 10, Some(0));
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let page = paginate(Vec::<i32>::new(), 10, Some(7));
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let page = paginate((1..=20).collect::<Vec<_>>(), 10, Some(2));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next);
    }
}
