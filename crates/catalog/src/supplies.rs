//! Built-in medical supplies catalog.

use std::sync::OnceLock;

use crate::catalog::Catalog;

const SUPPLIES_JSON: &str = include_str!("../data/supplies.json");

/// The medical supplies offered on the website, parsed once per process.
///
/// An invalid embedded document degrades to an empty catalog (and an error log)
/// instead of taking the caller down.
pub fn supplies() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| match Catalog::from_json(SUPPLIES_JSON) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::error!(error = %err, "embedded supplies catalog is invalid");
            Catalog::empty()
        }
    })
}
