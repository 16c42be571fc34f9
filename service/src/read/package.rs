//! [`Package`]-related read definitions.

#[cfg(doc)]
use crate::domain::Package;

pub mod list {
    //! [`Package`] list definitions.

    use std::{cmp::Reverse, str::FromStr as _};

    use common::{define_kind, define_pagination};
    use rust_decimal::Decimal;

    use crate::domain::Package;

    define_pagination!(Package, Filter, Sort);

    /// Selector of all the [`Package`]s listed on the marketplace.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Marketplace;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Text (or exact price) to search for.
        pub search: Option<String>,
    }

    impl Filter {
        /// Indicates whether the provided [`Package`] passes this [`Filter`].
        ///
        /// Matches a case-insensitive substring of the title, the pickup or
        /// the drop location, or an exact expected price.
        #[must_use]
        pub fn matches(&self, package: &Package) -> bool {
            let Some(query) = self.search.as_deref().map(str::trim) else {
                return true;
            };
            if query.is_empty() {
                return true;
            }

            let needle = query.to_lowercase();
            let fields: [&str; 3] = [
                package.title.as_ref(),
                package.pickup_location.as_ref(),
                package.drop_location.as_ref(),
            ];
            let text_matches =
                fields.iter().any(|s| s.to_lowercase().contains(&needle));

            text_matches
                || Decimal::from_str(query).is_ok_and(|price| {
                    price == package.price_expectation.amount
                })
        }
    }

    define_kind! {
        #[doc = "Sort order of a [`Package`] list. Always descending."]
        #[case = "lowercase"]
        enum Sort {
            #[doc = "Newest [`Package`]s first."]
            Latest = 1,

            #[doc = "Heaviest [`Package`]s first."]
            Weight = 2,

            #[doc = "Most paying [`Package`]s first."]
            Price = 3,
        }
    }

    impl Default for Sort {
        fn default() -> Self {
            Self::Latest
        }
    }

    impl Sort {
        /// Sorts the provided [`Package`]s in this order, keeping equal ones
        /// in their original order.
        pub fn apply(self, packages: &mut [Package]) {
            match self {
                Self::Latest => packages.sort_by_key(|p| Reverse(p.created_at)),
                Self::Weight => packages.sort_by_key(|p| Reverse(p.weight)),
                Self::Price => packages
                    .sort_by_key(|p| Reverse(p.price_expectation.amount)),
            }
        }
    }

    /// Selects a [`Page`] out of the provided [`Package`]s.
    #[must_use]
    pub fn select(packages: Vec<Package>, selector: Selector) -> Page {
        let Selector {
            arguments,
            filter,
            sort,
        } = selector;

        let mut packages = packages
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect::<Vec<_>>();
        sort.apply(&mut packages);

        Page::paginate(packages, arguments)
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{package, Package};

    use super::list::{select, Arguments, Filter, Selector, Sort};

    fn package(id: u64, title: &str, price: i64, weight: i64) -> Package {
        Package {
            id: package::Id::from(id),
            title: String::from(title).into(),
            description: String::new(),
            pickup_location: String::from("Mumbai").into(),
            drop_location: String::from("Delhi").into(),
            weight: package::Weight::new(Decimal::new(weight, 0)).unwrap(),
            price_expectation: Money::new(Decimal::new(price, 0), Currency::Inr),
            image: None,
            status: package::Status::Available,
            created_at: DateTime::from_date(&format!("2024-05-{id:02}"))
                .unwrap()
                .coerce(),
        }
    }

    fn catalog() -> Vec<Package> {
        vec![
            package(1, "Cotton bales", 500, 300),
            package(2, "Office chairs", 1500, 120),
            package(3, "Machine parts", 2500, 120),
        ]
    }

    fn ids(packages: &[Package]) -> Vec<u64> {
        packages.iter().map(|p| p.id.into()).collect()
    }

    fn search(query: &str) -> Filter {
        Filter {
            search: Some(query.into()),
        }
    }

    #[test]
    fn searches_exact_price() {
        let found = catalog()
            .into_iter()
            .filter(|p| search("1500").matches(p))
            .collect::<Vec<_>>();

        assert_eq!(ids(&found), [2]);
    }

    #[test]
    fn searches_text_case_insensitively() {
        let found = catalog()
            .into_iter()
            .filter(|p| search("  CHAIRS ").matches(p))
            .collect::<Vec<_>>();
        assert_eq!(ids(&found), [2]);

        let found = catalog()
            .into_iter()
            .filter(|p| search("delhi").matches(p))
            .collect::<Vec<_>>();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn empty_search_matches_all() {
        for filter in [Filter::default(), search(""), search("   ")] {
            assert!(catalog().iter().all(|p| filter.matches(p)));
        }
    }

    #[test]
    fn sorts_descending_and_stable() {
        let mut packages = catalog();

        Sort::Price.apply(&mut packages);
        assert_eq!(ids(&packages), [3, 2, 1]);

        Sort::Latest.apply(&mut packages);
        assert_eq!(ids(&packages), [3, 2, 1]);

        let mut packages = catalog();
        Sort::Weight.apply(&mut packages);
        assert_eq!(ids(&packages), [1, 2, 3]);
    }

    #[test]
    fn selects_filtered_sorted_page() {
        let packages = (1..=14)
            .map(|id| package(id, "Crates", 100, 10))
            .collect::<Vec<_>>();

        let page = select(
            packages,
            Selector {
                arguments: Arguments::new(3, 6).unwrap(),
                filter: Filter::default(),
                sort: Sort::Latest,
            },
        );

        assert_eq!(ids(&page.items), [2, 1]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 14);
    }
}
