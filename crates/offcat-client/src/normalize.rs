//! Normalization of heterogeneous upstream response shapes into the fixed
//! pagination envelope.
//!
//! The upstream returns product lists in at least three shapes: a
//! `{"products": [...]}` wrapper (search endpoints), a bare JSON array, and a
//! `{"tags": [{"products": [...]}]}` category wrapper. Pagination metadata is
//! equally loose: numbers and numeric strings both occur in the wild.

use serde_json::Value;

use offcat_core::{page_count_for, PageEnvelope, Product};

/// Maps a raw upstream response into a well-formed [`PageEnvelope`].
///
/// `fallback_page` / `fallback_page_size` fill in whatever pagination fields
/// the response omits. Zero items still produce a valid envelope, never an
/// error; when the response carries no `count`, `page_count` comes out 0.
#[must_use]
pub fn normalize_page(raw: &Value, fallback_page: u32, fallback_page_size: u32) -> PageEnvelope {
    let products = extract_items(raw);

    let count = field_u64(raw, "count").unwrap_or(products.len() as u64);
    let page = field_u32(raw, "page").unwrap_or(fallback_page);
    let page_size = field_u32(raw, "page_size").unwrap_or(fallback_page_size);
    let page_count =
        field_u32(raw, "page_count").unwrap_or_else(|| page_count_for(count, page_size));

    PageEnvelope {
        products,
        count,
        page,
        page_size,
        page_count,
    }
}

/// Pulls the product list out of whichever wrapper shape the response uses.
///
/// Elements that fail to deserialize are skipped individually rather than
/// failing the whole page; upstream records are crowd-sourced and a single
/// malformed entry is routine.
#[must_use]
pub fn extract_items(raw: &Value) -> Vec<Product> {
    let list = if let Some(products) = raw.get("products").and_then(Value::as_array) {
        if products.is_empty() {
            locate_fallback_list(raw)
        } else {
            Some(products)
        }
    } else if let Some(arr) = raw.as_array() {
        Some(arr)
    } else {
        locate_fallback_list(raw)
    };

    list.map(|values| {
        values
            .iter()
            .filter_map(|v| serde_json::from_value::<Product>(v.clone()).ok())
            .collect()
    })
    .unwrap_or_default()
}

/// The category wrapper shape: the first tag entry carrying a product list.
fn locate_fallback_list(raw: &Value) -> Option<&Vec<Value>> {
    raw.get("tags")?
        .as_array()?
        .first()?
        .get("products")?
        .as_array()
}

fn field_u64(raw: &Value, key: &str) -> Option<u64> {
    value_as_u64(raw.get(key)?)
}

fn field_u32(raw: &Value, key: &str) -> Option<u32> {
    field_u64(raw, key).and_then(|v| u32::try_from(v).ok())
}

/// Accepts both JSON numbers and numeric strings.
fn value_as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_values(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "code": format!("{i:04}") })).collect()
    }

    #[test]
    fn uses_products_field_when_present() {
        let raw = json!({
            "products": product_values(2),
            "count": 50,
            "page": 1,
            "page_size": 24
        });
        let env = normalize_page(&raw, 1, 24);
        assert_eq!(env.products.len(), 2);
        assert_eq!(env.count, 50);
        assert_eq!(env.page_count, 3);
    }

    #[test]
    fn accepts_bare_array_response() {
        let raw = Value::Array(product_values(3));
        let env = normalize_page(&raw, 2, 24);
        assert_eq!(env.products.len(), 3);
        assert_eq!(env.count, 3);
        assert_eq!(env.page, 2);
        assert_eq!(env.page_size, 24);
        assert_eq!(env.page_count, 1);
    }

    #[test]
    fn accepts_category_tag_wrapper() {
        let raw = json!({ "tags": [ { "name": "Snacks", "products": product_values(4) } ] });
        let env = normalize_page(&raw, 1, 24);
        assert_eq!(env.products.len(), 4);
        assert_eq!(env.count, 4);
    }

    #[test]
    fn empty_products_field_falls_through_to_tag_wrapper() {
        let raw = json!({
            "products": [],
            "tags": [ { "products": product_values(1) } ]
        });
        assert_eq!(extract_items(&raw).len(), 1);
    }

    #[test]
    fn unknown_shape_yields_empty_envelope() {
        let raw = json!({ "status": "unexpected" });
        let env = normalize_page(&raw, 1, 24);
        assert!(env.products.is_empty());
        assert_eq!(env.count, 0);
        assert_eq!(env.page_count, 0);
    }

    #[test]
    fn numeric_strings_are_accepted_for_pagination_fields() {
        let raw = json!({
            "products": product_values(1),
            "count": "50",
            "page": "2",
            "page_size": "24",
            "page_count": "3"
        });
        let env = normalize_page(&raw, 1, 24);
        assert_eq!(env.count, 50);
        assert_eq!(env.page, 2);
        assert_eq!(env.page_size, 24);
        assert_eq!(env.page_count, 3);
    }

    #[test]
    fn empty_page_keeps_upstream_count_and_page_count() {
        // Page 4 of a 50-match search at page size 24: no items, but the
        // envelope still describes the full result set.
        let raw = json!({ "products": [], "count": 50, "page": 4, "page_size": 24 });
        let env = normalize_page(&raw, 4, 24);
        assert!(env.products.is_empty());
        assert_eq!(env.count, 50);
        assert_eq!(env.page, 4);
        assert_eq!(env.page_count, 3);
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let raw = json!({
            "products": [
                { "code": "0001" },
                { "code": 42 },
                { "no_code_at_all": true },
                { "code": "0002" }
            ]
        });
        let items = extract_items(&raw);
        let codes: Vec<&str> = items.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["0001", "0002"]);
    }

    #[test]
    fn missing_count_defaults_to_item_length() {
        let raw = json!({ "products": product_values(5) });
        let env = normalize_page(&raw, 1, 24);
        assert_eq!(env.count, 5);
        assert_eq!(env.page_count, 1);
    }
}
