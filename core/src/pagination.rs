/// Offset/limit window over a sorted result set.
///
/// `page` is 1-based. A page of zero or below means "no offset", so the
/// first `limit` results are returned.
///
/// # Examples
///
/// ```rust
/// use clinic_core::pagination::Pagination;
///
/// let pagination = Pagination::new(10, 2);
/// assert_eq!(pagination.skip(), 10);
/// assert_eq!(pagination.page_count(25), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    page: i64,
}

impl Pagination {
    pub fn new(limit: i64, page: i64) -> Self {
        Self { limit, page }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Number of matching documents to skip before the page starts
    pub fn skip(&self) -> u64 {
        if self.page <= 0 || self.limit <= 0 {
            return 0;
        }
        (self.page - 1).saturating_mul(self.limit) as u64
    }

    /// Total pages needed for `total` matches, `ceil(total / limit)`
    pub fn page_count(&self, total: u64) -> u64 {
        if self.limit <= 0 {
            return 0;
        }
        total.div_ceil(self.limit as u64)
    }

    /// Cut this page out of an already sorted, already filtered sequence
    pub fn window<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let take = usize::try_from(self.limit.max(0)).unwrap_or(usize::MAX);
        let skip = usize::try_from(self.skip()).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_skip() {
        assert_eq!(Pagination::new(10, 1).skip(), 0);
        assert_eq!(Pagination::new(10, 2).skip(), 10);
        assert_eq!(Pagination::new(10, 0).skip(), 0);
        assert_eq!(Pagination::new(10, -3).skip(), 0);
        assert_eq!(Pagination::new(10, i64::MAX).skip(), i64::MAX as u64);
    }

    #[test]
    fn test_page_count() {
        let pagination = Pagination::new(10, 1);
        assert_eq!(pagination.page_count(0), 0);
        assert_eq!(pagination.page_count(1), 1);
        assert_eq!(pagination.page_count(10), 1);
        assert_eq!(pagination.page_count(11), 2);
        assert_eq!(pagination.page_count(25), 3);
        assert_eq!(Pagination::new(0, 1).page_count(25), 0);
    }

    #[test]
    fn test_window() {
        let ranked: Vec<u32> = (1..=25).collect();
        assert_eq!(
            Pagination::new(10, 2).window(ranked.clone()),
            (11..=20).collect::<Vec<_>>()
        );
        assert_eq!(Pagination::new(10, 3).window(ranked.clone()), (21..=25).collect::<Vec<_>>());
        assert!(Pagination::new(10, 4).window(ranked.clone()).is_empty());
        assert_eq!(Pagination::new(10, 0).window(ranked).len(), 10);
    }

    proptest! {
        #[test]
        fn page_count_is_ceiling_division(total in 0u64..1_000_000, limit in 1i64..500) {
            let pages = Pagination::new(limit, 1).page_count(total);
            let expected = (total as f64 / limit as f64).ceil() as u64;
            prop_assert_eq!(pages, expected);
        }

        #[test]
        fn pages_cover_every_item_exactly_once(total in 0usize..300, limit in 1i64..40) {
            let items: Vec<usize> = (0..total).collect();
            let pages = Pagination::new(limit, 1).page_count(total as u64) as i64;
            let mut seen = Vec::new();
            for page in 1..=pages {
                seen.extend(Pagination::new(limit, page).window(items.clone()));
            }
            prop_assert_eq!(seen, items);
        }
    }
}
