use serde::{Deserialize, Serialize};

use happyhome_core::{Entity, ProductId};

/// A catalog product record.
///
/// Immutable once loaded. Quotes capture a full copy at add time, so the field
/// names serialize in camelCase to stay compatible with quotes already stored
/// by the website (`categorySlug`, `priceRange`).
///
/// Only `id` and `name` are required when deserializing; display attributes
/// fall back to empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    category_slug: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    image: String,
    #[serde(default)]
    price_range: String,
    #[serde(default)]
    popular: bool,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: String::new(),
            category: String::new(),
            category_slug: String::new(),
            description: String::new(),
            features: Vec::new(),
            image: String::new(),
            price_range: String::new(),
            popular: false,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_category(mut self, name: impl Into<String>, slug: impl Into<String>) -> Self {
        self.category = name.into();
        self.category_slug = slug.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_price_range(mut self, price_range: impl Into<String>) -> Self {
        self.price_range = price_range.into();
        self
    }

    pub fn with_popular(mut self, popular: bool) -> Self {
        self.popular = popular;
        self
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn category_slug(&self) -> &str {
        &self.category_slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn price_range(&self) -> &str {
        &self.price_range
    }

    pub fn is_popular(&self) -> bool {
        self.popular
    }

    /// Case-insensitive match against name, description and features.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.features.iter().any(|f| f.to_lowercase().contains(needle))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A product category, derived from the products that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub product_count: usize,
}
