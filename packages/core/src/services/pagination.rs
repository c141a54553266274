//! Fixed-size, 1-indexed pagination over a materialized result set

/// Default number of questions per listing page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// One page of a result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in `[(page-1)*page_size, page*page_size)`, clamped to the input
    pub items: Vec<T>,

    /// Length of the whole input, independent of `items`
    pub total_count: usize,
}

/// Slice `items` into the `page`-th window of `page_size` items.
///
/// Pages are 1-indexed; page 0 is treated as page 1. A page past the end
/// yields no items, with `total_count` still reporting the full length.
/// Whether an empty page is an error is left to the caller.
///
/// ```
/// use trivia_core::services::paginate;
///
/// let page = paginate((1..=12).collect::<Vec<_>>(), 2, 10);
/// assert_eq!(page.items, vec![11, 12]);
/// assert_eq!(page.total_count, 12);
/// ```
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: usize) -> Page<T> {
    let total_count = items.len();
    let page_index = page.max(1) as usize - 1;
    let start = page_index.saturating_mul(page_size);

    let items = items.into_iter().skip(start).take(page_size).collect();

    Page { items, total_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = paginate((0..25).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate((0..25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn test_page_past_end_is_empty_with_total() {
        let page = paginate((0..25).collect::<Vec<_>>(), 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 25);

        let far = paginate((0..25).collect::<Vec<_>>(), u32::MAX, 10);
        assert!(far.items.is_empty());
        assert_eq!(far.total_count, 25);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = paginate(vec!['a', 'b', 'c'], 0, 2);
        assert_eq!(page.items, vec!['a', 'b']);
    }

    #[test]
    fn test_empty_input() {
        let page = paginate(Vec::<u8>::new(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn test_pages_reassemble_input_exactly_once() {
        for len in 1..=31usize {
            for page_size in 1..=7usize {
                let input: Vec<usize> = (0..len).collect();
                let expected_pages = len.div_ceil(page_size);

                let mut reassembled = Vec::new();
                let mut non_empty_pages = 0;
                for page in 1..=(expected_pages as u32 + 1) {
                    let slice = paginate(input.clone(), page, page_size);
                    assert_eq!(slice.total_count, len);
                    if !slice.items.is_empty() {
                        non_empty_pages += 1;
                    }
                    reassembled.extend(slice.items);
                }

                assert_eq!(non_empty_pages, expected_pages, "len={len} size={page_size}");
                assert_eq!(reassembled, input, "len={len} size={page_size}");
            }
        }
    }
}
