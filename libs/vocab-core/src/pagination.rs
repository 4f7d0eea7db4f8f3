//! Pagination over in-memory collections.

/// One page of a collection, borrowed from the source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `items` into the 1-indexed `current_page` of size `per_page`.
///
/// `total_pages` is `ceil(len / per_page)`. An out-of-range page yields an
/// empty slice rather than an error; callers clamp the page on next/prev
/// navigation and reset it to 1 when the source collection is re-filtered.
pub fn paginate<T>(items: &[T], current_page: usize, per_page: usize) -> Page<'_, T> {
    if per_page == 0 {
        return Page {
            items: &[],
            total_pages: 0,
        };
    }

    let total_pages = items.len().div_ceil(per_page);
    let start = current_page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());

    let items = if start >= items.len() {
        &[]
    } else {
        &items[start..end]
    };

    Page { items, total_pages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_total_pages_is_ceil() {
        let items: Vec<u32> = (0..11).collect();
        assert_eq!(paginate(&items, 1, 5).total_pages, 3);
        assert_eq!(paginate(&items, 1, 11).total_pages, 1);
        assert_eq!(paginate(&items, 1, 12).total_pages, 1);
        assert_eq!(paginate::<u32>(&[], 1, 5).total_pages, 0);
    }

    #[test]
    fn test_last_page_may_be_short() {
        let items: Vec<u32> = (0..7).collect();
        let page = paginate(&items, 2, 5);
        assert_eq!(page.items, &[5, 6]);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..3).collect();
        assert!(paginate(&items, 2, 5).is_empty());
        assert!(paginate(&items, 100, 5).is_empty());
        // page 0 clamps to the first page; callers never go below 1
        assert_eq!(paginate(&items, 0, 5).items, &[0, 1, 2]);
    }

    #[test]
    fn test_zero_per_page_yields_nothing() {
        let items: Vec<u32> = (0..3).collect();
        let page = paginate(&items, 1, 0);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_pages_concatenate_to_source() {
        for len in 0..25usize {
            let items: Vec<usize> = (0..len).collect();
            for per_page in 1..7 {
                let total = paginate(&items, 1, per_page).total_pages;
                let mut rebuilt = Vec::new();
                for page in 1..=total {
                    rebuilt.extend_from_slice(paginate(&items, page, per_page).items);
                }
                assert_eq!(rebuilt, items, "len={len} per_page={per_page}");
            }
        }
    }
}
