//! Product Model

use serde::{Deserialize, Serialize};

/// Product kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    #[default]
    Comida,
    Bebida,
    Postre,
    Adicional,
}

/// Minutes the kitchen plans for when nothing else is configured
pub const DEFAULT_PREPARATION_TIME: i32 = 15;

fn default_preparation_time() -> i32 {
    DEFAULT_PREPARATION_TIME
}

fn default_true() -> bool {
    true
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<String>,
    /// Unique short code, case-insensitive (e.g. "CAF-01")
    pub code: String,
    /// Unique per category, case-insensitive
    pub name: String,
    /// Category reference (String ID, required)
    pub category_id: String,
    /// Price in currency units, strictly positive
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preparation time in minutes
    #[serde(default = "default_preparation_time")]
    pub preparation_time: i32,
    /// Visible in the admin catalog
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    /// Orderable from the POS
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub code: String,
    pub name: String,
    pub category_id: String,
    pub price: f64,
    #[serde(rename = "type", default)]
    pub kind: ProductKind,
    pub description: Option<String>,
    pub preparation_time: Option<i32>,
    pub is_enabled: Option<bool>,
    pub is_available: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<String>,
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<ProductKind>,
    pub description: Option<String>,
    pub preparation_time: Option<i32>,
    pub is_enabled: Option<bool>,
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_labels() {
        assert_eq!(
            serde_json::to_string(&ProductKind::Comida).unwrap(),
            "\"COMIDA\""
        );
        let kind: ProductKind = serde_json::from_str("\"ADICIONAL\"").unwrap();
        assert_eq!(kind, ProductKind::Adicional);
    }

    #[test]
    fn test_wire_field_names_and_defaults() {
        let json = r#"{
            "id": "p1",
            "code": "CAF-01",
            "name": "Café solo",
            "categoryId": "c1",
            "price": 1.5,
            "type": "BEBIDA"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category_id, "c1");
        assert_eq!(product.kind, ProductKind::Bebida);
        assert_eq!(product.preparation_time, DEFAULT_PREPARATION_TIME);
        assert!(product.is_enabled);
        assert!(product.is_available);

        let out = serde_json::to_value(&product).unwrap();
        assert_eq!(out["categoryId"], "c1");
        assert_eq!(out["type"], "BEBIDA");
        assert_eq!(out["preparationTime"], 15);
    }
}
