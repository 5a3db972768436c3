use std::collections::HashSet;

use happyhome_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{Category, Product};

/// How many related products the product detail page shows by default.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Category selection on the supplies page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Slug(String),
}

impl CategoryFilter {
    /// `"all"` (any case) selects everything, anything else is a category slug.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Slug(raw.to_string())
        }
    }

    fn accepts(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Slug(slug) => product.category_slug() == slug,
        }
    }
}

/// Totals shown in the supplies page header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_categories: usize,
    pub featured_products: usize,
}

/// Ordered, read-only list of products.
///
/// Product ids and slugs are unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for product in &products {
            if product.id().is_blank() {
                return Err(DomainError::validation(format!(
                    "product {:?} has an empty id",
                    product.name()
                )));
            }
            if !ids.insert(product.id().clone()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    product.id()
                )));
            }
            if !product.slug().is_empty() && !slugs.insert(product.slug().to_string()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product slug {}",
                    product.slug()
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn empty() -> Self {
        Self { products: Vec::new() }
    }

    /// Parse a JSON array of product records.
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("invalid catalog document: {e}")))?;
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Like [`Catalog::get`], but a missing product is an error.
    pub fn require(&self, id: &ProductId) -> DomainResult<&Product> {
        self.get(id).ok_or_else(DomainError::not_found)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug() == slug)
    }

    /// Unique categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for product in &self.products {
            match categories.iter_mut().find(|c| c.slug == product.category_slug()) {
                Some(category) => category.product_count += 1,
                None => categories.push(Category {
                    name: product.category().to_string(),
                    slug: product.category_slug().to_string(),
                    description: category_description(product.category_slug()).to_string(),
                    product_count: 1,
                }),
            }
        }
        categories
    }

    pub fn by_category(&self, category_slug: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category_slug() == category_slug)
            .collect()
    }

    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.accepts(p)).collect()
    }

    /// Popular products, optionally truncated to `limit`. A zero limit means no limit.
    pub fn featured(&self, limit: Option<usize>) -> Vec<&Product> {
        let featured = self.products.iter().filter(|p| p.is_popular());
        match limit.filter(|n| *n > 0) {
            Some(limit) => featured.take(limit).collect(),
            None => featured.collect(),
        }
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect()
    }

    /// Products in the same category as `slug`, excluding it.
    pub fn related(&self, slug: &str, limit: usize) -> Vec<&Product> {
        let Some(current) = self.by_slug(slug) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category_slug() == current.category_slug() && p.slug() != slug)
            .take(limit)
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_products: self.products.len(),
            total_categories: self.categories().len(),
            featured_products: self.featured(None).len(),
        }
    }
}

fn category_description(slug: &str) -> &'static str {
    match slug {
        "mobility-aids" => {
            "Essential walking aids and canes to help maintain independence and mobility in daily life."
        }
        "walkers-rollators" => {
            "Stable walking support devices including standard walkers, rollators, and specialized knee walkers."
        }
        "wheelchairs" => {
            "Comfortable and reliable wheelchairs for both manual and powered mobility needs."
        }
        "hospital-beds" => {
            "Adjustable hospital beds and accessories designed for home care and recovery."
        }
        "lift-chairs" => {
            "Power lift recliners that assist with sitting and standing while providing therapeutic comfort."
        }
        "bathroom-safety" => {
            "Safety equipment to prevent falls and increase independence in the bathroom."
        }
        "hearing-aids" => "Advanced hearing aid solutions for improved hearing and quality of life.",
        "oxygen-equipment" => {
            "Respiratory equipment including oxygen concentrators, tanks, and CPAP machines."
        }
        "daily-living-aids" => {
            "Helpful tools and devices that make everyday tasks easier and more manageable."
        }
        _ => "",
    }
}
