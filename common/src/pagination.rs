//! Abstractions for page-based pagination.

use std::num::NonZeroUsize;

use derive_more::Display;

/// Size of a [`Page`] (maximum number of items on it).
pub type Size = NonZeroUsize;

/// Default [`Size`] of a [`Page`].
pub const DEFAULT_SIZE: Size = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// 1-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Number(NonZeroUsize);

impl Number {
    /// Number of the first [`Page`].
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Creates a new [`Number`] out of the provided 1-based `number`.
    ///
    /// [`None`] is returned for `0`.
    #[must_use]
    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Self)
    }

    /// Creates a new [`Number`] only if the provided 1-based `number`
    /// addresses one of the `total` pages.
    #[must_use]
    pub fn checked(number: usize, total: NonZeroUsize) -> Option<Self> {
        Self::new(number).filter(|n| n.is_within(total))
    }

    /// Returns the 1-based value of this [`Number`].
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Indicates whether this [`Number`] addresses one of the `total` pages.
    #[must_use]
    pub fn is_within(self, total: NonZeroUsize) -> bool {
        self.0 <= total
    }

    /// Clamps this [`Number`] to the last of the `total` pages.
    #[must_use]
    pub fn clamp(self, total: NonZeroUsize) -> Self {
        Self(self.0.min(total))
    }

    /// Returns the [`Number`] of the next page, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Returns the [`Number`] of the previous page, if any.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }

    /// Returns the index of the first item on the page with this [`Number`].
    fn offset(self, size: Size) -> usize {
        (self.get() - 1).saturating_mul(size.get())
    }
}

impl From<Number> for usize {
    fn from(number: Number) -> Self {
        number.get()
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Returns the total number of pages needed to hold `count` items.
///
/// There is always at least one page, so an empty set still has a (blank)
/// first page.
#[must_use]
pub fn total_pages(count: usize, size: Size) -> NonZeroUsize {
    NonZeroUsize::new(count.div_ceil(size.get())).unwrap_or(NonZeroUsize::MIN)
}

/// Page of items.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page<'i, T> {
    /// Items on this [`Page`].
    pub items: &'i [T],

    /// [`Number`] of this [`Page`].
    pub number: Number,

    /// Total number of pages.
    pub total: NonZeroUsize,
}

impl<'i, T> Page<'i, T> {
    /// Cuts the [`Page`] with the provided [`Number`] out of `items`.
    ///
    /// A [`Number`] beyond the last page yields an empty [`Page`]. Callers
    /// are expected to validate the [`Number`] beforehand (see
    /// [`Number::checked()`]).
    #[must_use]
    pub fn new(items: &'i [T], number: Number, size: Size) -> Self {
        let start = number.offset(size).min(items.len());
        let end = start.saturating_add(size.get()).min(items.len());
        Self {
            items: &items[start..end],
            number,
            total: total_pages(items.len(), size),
        }
    }

    /// Indicates whether there is a page before this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > Number::FIRST
    }

    /// Indicates whether there is a page after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number.get() < self.total.get()
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use super::{total_pages, Number, Page, DEFAULT_SIZE};

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn page(n: usize) -> Number {
        Number::new(n).unwrap()
    }

    #[test]
    fn counts_total_pages() {
        assert_eq!(total_pages(0, DEFAULT_SIZE), nz(1));
        assert_eq!(total_pages(1, DEFAULT_SIZE), nz(1));
        assert_eq!(total_pages(5, DEFAULT_SIZE), nz(1));
        assert_eq!(total_pages(6, DEFAULT_SIZE), nz(2));
        assert_eq!(total_pages(10, DEFAULT_SIZE), nz(2));
        assert_eq!(total_pages(11, DEFAULT_SIZE), nz(3));
        assert_eq!(total_pages(7, nz(1)), nz(7));
    }

    #[test]
    fn slices_pages() {
        let items = (1..=12).collect::<Vec<_>>();

        let first = Page::new(&items, page(1), DEFAULT_SIZE);
        assert_eq!(first.items, &[1, 2, 3, 4, 5]);
        assert_eq!(first.total, nz(3));
        assert!(!first.has_previous());
        assert!(first.has_next());

        let second = Page::new(&items, page(2), DEFAULT_SIZE);
        assert_eq!(second.items, &[6, 7, 8, 9, 10]);
        assert!(second.has_previous());
        assert!(second.has_next());

        let last = Page::new(&items, page(3), DEFAULT_SIZE);
        assert_eq!(last.items, &[11, 12]);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[test]
    fn empty_set_has_single_blank_page() {
        let items: [u8; 0] = [];

        let page = Page::new(&items, Number::FIRST, DEFAULT_SIZE);
        assert!(page.items.is_empty());
        assert_eq!(page.total, nz(1));
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn page_beyond_last_is_empty() {
        let items = [1, 2, 3];

        let page = Page::new(&items, page(4), DEFAULT_SIZE);
        assert!(page.items.is_empty());
        assert_eq!(page.total, nz(1));
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert_eq!(Number::new(0), None);
        assert_eq!(Number::checked(0, nz(3)), None);
        assert_eq!(Number::checked(4, nz(3)), None);
        assert_eq!(Number::checked(3, nz(3)), Some(page(3)));
        assert_eq!(Number::checked(1, nz(1)), Some(Number::FIRST));
    }

    #[test]
    fn clamps_to_last_page() {
        assert_eq!(page(5).clamp(nz(3)), page(3));
        assert_eq!(page(2).clamp(nz(3)), page(2));
        assert!(!page(2).is_within(nz(1)));
    }

    #[test]
    fn steps_between_pages() {
        assert_eq!(Number::FIRST.previous(), None);
        assert_eq!(Number::FIRST.next(), Some(page(2)));
        assert_eq!(page(3).previous(), Some(page(2)));
        assert_eq!(page(3).to_string(), "3");
        assert_eq!(usize::from(page(3)), 3);
    }
}
