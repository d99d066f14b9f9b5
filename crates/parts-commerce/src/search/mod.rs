//! Search module.
//!
//! Contains filters, sorting, and pagination over the product list.

mod filter;
mod query;
mod results;

pub use filter::Filter;
pub use query::{ProductQuery, SortOption, DEFAULT_PER_PAGE};
pub use results::{Pagination, SearchResults};
