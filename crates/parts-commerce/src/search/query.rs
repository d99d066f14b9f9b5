//! Product query: filters, sort order and page.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::search::{Filter, Pagination, SearchResults};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Items per page when none is given.
pub const DEFAULT_PER_PAGE: i64 = 12;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Sort by newest first.
    #[default]
    Newest,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
        }
    }


    fn sort(&self, products: &mut [&Product]) {
        match self {
            SortOption::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOption::PriceAsc => products.sort_by_key(|p| p.price.amount_cents),
            SortOption::PriceDesc => {
                products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
            }
            SortOption::NameAsc => {
                products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "price_asc" | "price-asc" => Ok(SortOption::PriceAsc),
            "price_desc" | "price-desc" => Ok(SortOption::PriceDesc),
            "name_asc" | "name-asc" | "name" => Ok(SortOption::NameAsc),
            _ => Err(CommerceError::unknown("sort option", s)),
        }
    }
}

/// A product listing query evaluated over an in-memory product list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductQuery {
    /// Filters, all of which must match.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: SortOption::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: i64, per_page: i64) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter, sort and paginate.
    pub fn run<'a>(&self, products: &'a [Product]) -> SearchResults<&'a Product> {
        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        self.sort.sort(&mut matched);

        let pagination = Pagination::new(self.page, self.per_page, matched.len() as i64);
        let items = matched
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(self.per_page as usize)
            .collect();

        SearchResults::new(items, pagination)
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}
