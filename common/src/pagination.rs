//! Abstractions for page-number pagination over an already fetched list.

use std::num::NonZeroUsize;

/// A page of items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// 1-based number of this [`Page`].
    pub number: NonZeroUsize,

    /// Total number of pages available.
    pub total_pages: usize,

    /// Total number of items across all the pages.
    pub total_count: usize,
}

impl<I> Page<I> {
    /// Cuts the [`Page`] requested by the provided [`Arguments`] out of the
    /// provided `items`.
    ///
    /// Requesting a page beyond the last one results in an empty [`Page`]
    /// which still reports correct totals.
    #[must_use]
    pub fn paginate(
        items: impl IntoIterator<Item = I>,
        args: Arguments,
    ) -> Self {
        let Arguments { page, per_page } = args;

        let items = items.into_iter().collect::<Vec<_>>();
        let total_count = items.len();
        let total_pages = total_count.div_ceil(per_page.get());
        let skip = (page.get() - 1).saturating_mul(per_page.get());

        Self {
            items: items.into_iter().skip(skip).take(per_page.get()).collect(),
            number: page,
            total_pages,
            total_count,
        }
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            has_next_page: self.number.get() < self.total_pages,
            has_previous_page: self.number.get() > 1,
        }
    }
}

/// Information about the neighbours of a [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo {
    /// Indicator whether a next [`Page`] exists.
    pub has_next_page: bool,

    /// Indicator whether a previous [`Page`] exists.
    pub has_previous_page: bool,
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested [`Page`].
    pub page: NonZeroUsize,

    /// Maximum number of items on a [`Page`].
    pub per_page: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`].
    ///
    /// [`None`] is returned if the `page` is `0` or `per_page` is `0`.
    #[must_use]
    pub fn new(page: usize, per_page: usize) -> Option<Self> {
        Some(Self {
            page: NonZeroUsize::new(page)?,
            per_page: NonZeroUsize::new(per_page)?,
        })
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F, S> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Filter being applied before paginating.
    pub filter: F,

    /// Sort order being applied before paginating.
    pub sort: S,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty, $sort:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter, $sort>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    #[test]
    fn cuts_requested_page() {
        let page = Page::paginate(1..=14, Arguments::new(2, 6).unwrap());

        assert_eq!(page.items, vec![7, 8, 9, 10, 11, 12]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 14);
        assert!(page.page_info().has_next_page);
        assert!(page.page_info().has_previous_page);
    }

    #[test]
    fn last_page_is_partial() {
        let page = Page::paginate(1..=14, Arguments::new(3, 6).unwrap());

        assert_eq!(page.items, vec![13, 14]);
        assert!(!page.page_info().has_next_page);
    }

    #[test]
    fn page_beyond_last_is_empty() {
        let page = Page::paginate(1..=4, Arguments::new(5, 6).unwrap());

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let page =
            Page::paginate(Vec::<u8>::new(), Arguments::new(1, 6).unwrap());

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.page_info().has_next_page);
        assert!(!page.page_info().has_previous_page);
    }

    #[test]
    fn rejects_zero_arguments() {
        assert!(Arguments::new(0, 6).is_none());
        assert!(Arguments::new(1, 0).is_none());
    }
}
