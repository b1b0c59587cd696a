use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One labelled entry in a product's feature or spec list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductFeature {
    pub label: String,
    pub value: String,
}

/// Structured description of the product under review, produced by phase 1
/// and treated as read-only input for the rest of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price kept as display text (e.g. "149.99€"), as scraped.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub main_features: Vec<ProductFeature>,
    #[serde(default)]
    pub technical_specs: Vec<ProductFeature>,
}

impl Product {
    /// Minimal record written when extraction produced nothing parseable,
    /// so "has phase 1 run?" never regresses to a missing artifact.
    pub fn placeholder() -> Self {
        Self {
            name: "Producto".to_string(),
            description: "Descripción no disponible".to_string(),
            price: String::new(),
            image: String::new(),
            category: String::new(),
            main_features: Vec::new(),
            technical_specs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_literals() {
        let p = Product::placeholder();
        assert_eq!(p.name, "Producto");
        assert_eq!(p.description, "Descripción no disponible");
        assert!(p.main_features.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let p: Product = serde_json::from_str(r#"{"name": "Lamp"}"#).unwrap();
        assert_eq!(p.name, "Lamp");
        assert!(p.price.is_empty());
        assert!(p.technical_specs.is_empty());
    }
}
