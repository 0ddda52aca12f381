//! Schema validation of the decoded payload.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::SchemaError;
use crate::models::receipt::{Category, Product};

/// Top-level keys the payload must carry, in reporting order.
const REQUIRED_FIELDS: [&str; 4] = ["store_name", "total_amount", "date", "products"];

/// Keys every product entry must carry.
const PRODUCT_FIELDS: [&str; 3] = ["name", "price", "category"];

/// Typed fields recovered from a validated payload.
///
/// The date stays raw text here; normalizing it is a separate stage. A
/// receipt-level `category` key in the payload is ignored outright, the
/// final category is derived from the products.
#[derive(Debug, Clone)]
pub struct ValidatedPayload {
    /// Store name as reported by the engine.
    pub store_name: String,

    /// Receipt total.
    pub total_amount: Decimal,

    /// Engine-reported date text.
    pub date_raw: String,

    /// Typed products in reported order.
    pub products: Vec<Product>,
}

/// Check a decoded payload against the receipt schema and type its
/// fields.
///
/// Presence and shape are checked first, in a fixed order: required
/// top-level keys, then the products list shape, then the keys of each
/// product entry. Only then are the present values converted to their
/// field types. Value-level semantics (a negative price, a category
/// that does not match its product) are deliberately not judged here.
pub fn validate_payload(payload: &Value) -> Result<ValidatedPayload, SchemaError> {
    for field in REQUIRED_FIELDS {
        if payload.get(field).is_none() {
            return Err(SchemaError::MissingField(field));
        }
    }

    let entries = payload["products"]
        .as_array()
        .ok_or(SchemaError::InvalidProductsShape)?;

    for (index, entry) in entries.iter().enumerate() {
        let present = entry
            .as_object()
            .is_some_and(|fields| PRODUCT_FIELDS.iter().all(|f| fields.contains_key(*f)));
        if !present {
            return Err(SchemaError::InvalidProductShape(index));
        }
    }

    let store_name = string_field(payload, "store_name")?;
    let total_amount = decimal_value(&payload["total_amount"], "total_amount")?;
    let date_raw = string_field(payload, "date")?;

    let mut products = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        products.push(product_entry(entry, index)?);
    }

    Ok(ValidatedPayload {
        store_name,
        total_amount,
        date_raw,
        products,
    })
}

fn product_entry(entry: &Value, index: usize) -> Result<Product, SchemaError> {
    let name = entry["name"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_value(&format!("products[{index}].name"), &entry["name"]))?;

    let price = decimal_value(&entry["price"], &format!("products[{index}].price"))?;

    let category_field = format!("products[{index}].category");
    let category = entry["category"]
        .as_str()
        .and_then(Category::from_str)
        .ok_or_else(|| invalid_value(&category_field, &entry["category"]))?;

    Ok(Product {
        name,
        price,
        category,
    })
}

fn string_field(payload: &Value, field: &str) -> Result<String, SchemaError> {
    payload[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid_value(field, &payload[field]))
}

fn decimal_value(value: &Value, field: &str) -> Result<Decimal, SchemaError> {
    serde_json::from_value(value.clone()).map_err(|_| invalid_value(field, value))
}

fn invalid_value(field: &str, value: &Value) -> SchemaError {
    SchemaError::InvalidFieldValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
