//! Medical supplies catalog.
//!
//! Read-only product records and the queries the supplies pages run over them
//! (categories, featured, search, related). Nothing here mutates after load.

pub mod catalog;
pub mod product;
pub mod supplies;

pub use catalog::{Catalog, CatalogStats, CategoryFilter, DEFAULT_RELATED_LIMIT};
pub use product::{Category, Product};
pub use supplies::supplies;
