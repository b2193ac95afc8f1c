//! Pager: 1-based page slicing and navigation.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageSizeError {
    #[error("page size must be a positive integer, got {0:?}")]
    Invalid(String),
}

/// Number of records per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Sizes offered to the user.
    pub const OPTIONS: [usize; 4] = [10, 20, 50, 100];

    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl FromStr for PageSize {
    type Err = PageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(PageSize::new)
            .ok_or_else(|| PageSizeError::Invalid(s.to_string()))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The visible slice of a record list plus page-count metadata.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based index that was requested (not clamped).
    pub index: usize,
    pub size: PageSize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Inclusive 1-based item window shown on a page; `(0, 0)` when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    pub fn range(&self) -> PageRange {
        let size = self.size.get();
        let start = if self.total_items > 0 {
            self.index.saturating_sub(1).saturating_mul(size).saturating_add(1)
        } else {
            0
        };
        let end = self.index.saturating_mul(size).min(self.total_items);
        PageRange {
            start,
            end,
            total: self.total_items,
        }
    }
}

/// `ceil(len / size)`; zero records means zero pages.
pub fn total_pages(len: usize, size: PageSize) -> usize {
    len.div_ceil(size.get())
}

/// Slice `records` for the 1-based `index`. Out-of-range pages (including
/// index 0) come back empty; the index is never clamped.
pub fn paginate<T>(records: &[T], index: usize, size: PageSize) -> Page<'_, T> {
    let len = records.len();
    let items = match index.checked_sub(1) {
        Some(zero_based) => {
            let start = zero_based.saturating_mul(size.get()).min(len);
            let end = start.saturating_add(size.get()).min(len);
            &records[start..end]
        }
        None => &records[..0],
    };
    Page {
        items,
        index,
        size,
        total_pages: total_pages(len, size),
        total_items: len,
    }
}

/// Page navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

impl PageNav {
    /// Pure index transform. Each command is a no-op at its boundary.
    pub fn apply(self, index: usize, total_pages: usize) -> usize {
        match self {
            PageNav::First | PageNav::Previous if index <= 1 => index,
            PageNav::First => 1,
            PageNav::Previous => index - 1,
            PageNav::Next | PageNav::Last if index >= total_pages => index,
            PageNav::Next => index + 1,
            PageNav::Last => total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn twenty_five_records_in_pages_of_ten() {
        let records: Vec<u32> = (0..25).collect();
        let lens: Vec<usize> = (1..=3)
            .map(|p| paginate(&records, p, size(10)).items.len())
            .collect();
        assert_eq!(lens, vec![10, 10, 5]);
        assert_eq!(paginate(&records, 1, size(10)).total_pages, 3);
    }

    #[test]
    fn pages_are_disjoint_and_reconstruct_input() {
        let records: Vec<u32> = (0..23).collect();
        let page_size = size(4);
        let pages = total_pages(records.len(), page_size);
        let joined: Vec<u32> = (1..=pages)
            .flat_map(|p| paginate(&records, p, page_size).items.to_vec())
            .collect();
        assert_eq!(joined, records);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let records: Vec<u32> = Vec::new();
        let page = paginate(&records, 1, size(10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.range(), PageRange { start: 0, end: 0, total: 0 });
    }

    #[test]
    fn out_of_range_page_is_empty_not_clamped() {
        let records: Vec<u32> = (0..5).collect();
        let page = paginate(&records, 4, size(2));
        assert!(page.items.is_empty());
        assert_eq!(page.index, 4);
        assert_eq!(page.total_pages, 3);
        assert!(paginate(&records, 0, size(2)).items.is_empty());
    }

    #[test]
    fn range_for_partial_last_page() {
        let records: Vec<u32> = (0..25).collect();
        let page = paginate(&records, 3, size(10));
        assert_eq!(page.range(), PageRange { start: 21, end: 25, total: 25 });
    }

    #[test]
    fn navigation_boundaries() {
        assert_eq!(PageNav::Previous.apply(1, 3), 1);
        assert_eq!(PageNav::First.apply(1, 3), 1);
        assert_eq!(PageNav::Previous.apply(3, 3), 2);
        assert_eq!(PageNav::First.apply(3, 3), 1);
        assert_eq!(PageNav::Next.apply(3, 3), 3);
        assert_eq!(PageNav::Last.apply(3, 3), 3);
        assert_eq!(PageNav::Next.apply(1, 3), 2);
        assert_eq!(PageNav::Last.apply(1, 3), 3);
    }

    #[test]
    fn navigation_with_no_pages_is_a_no_op() {
        for nav in [PageNav::First, PageNav::Previous, PageNav::Next, PageNav::Last] {
            assert_eq!(nav.apply(1, 0), 1);
        }
    }

    #[test]
    fn page_size_parsing() {
        assert_eq!("20".parse::<PageSize>(), Ok(size(20)));
        assert!("0".parse::<PageSize>().is_err());
        assert!("ten".parse::<PageSize>().is_err());
        assert_eq!(PageSize::default().get(), 10);
    }
}
