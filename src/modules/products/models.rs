use serde::Deserialize;
use serde_json::{Map, Value};
use trove_db::{CollectionSchema, FieldRule};

/// Collection product documents are stored in.
pub const COLLECTION: &str = "products";

/// Request model for creating a new product.
///
/// Only these six fields are read from the body; anything else is discarded
/// before the store sees it. Values are kept untyped so the store's schema
/// decides whether they are acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: Option<Value>,
    pub category: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    pub stock_quantity: Option<Value>,
    pub supplier: Option<Value>,
}

impl NewProduct {
    /// Fields present in the request, keyed by their wire names.
    pub fn into_fields(self) -> Map<String, Value> {
        [
            ("title", self.title),
            ("category", self.category),
            ("description", self.description),
            ("price", self.price),
            ("stockQuantity", self.stock_quantity),
            ("supplier", self.supplier),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect()
    }
}

/// Store schema for products. Strict: undeclared fields are dropped.
pub fn schema() -> CollectionSchema {
    CollectionSchema::new(COLLECTION, "Product")
        .field(FieldRule::string("title").required())
        .field(FieldRule::string("category"))
        .field(FieldRule::string("description"))
        .field(FieldRule::number("price").required().min(0.0))
        .field(FieldRule::integer("stockQuantity").min(0.0).default_value(0))
        // name, contactEmail, contactPhone, rating
        .field(FieldRule::object("supplier"))
        .strict()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_named_fields_are_extracted() {
        let product: NewProduct = serde_json::from_value(json!({
            "title": "Pen",
            "price": 1.5,
            "stockQuantity": 3,
            "extra": "ignored"
        }))
        .unwrap();

        let fields = product.into_fields();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields["stockQuantity"], json!(3));
        assert!(!fields.contains_key("extra"));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let product: NewProduct = serde_json::from_value(json!({})).unwrap();
        assert!(product.into_fields().is_empty());
    }
}
