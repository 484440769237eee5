use serde::{Deserialize, Serialize};

/// A food product as returned by the upstream database, keyed by barcode.
///
/// Every field except `code` is optional: upstream records are crowd-sourced
/// and frequently incomplete. Unknown fields are dropped on deserialization.
/// A product is immutable once fetched; it is never locally mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream barcode, unique per product.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_small_url: Option<String>,
    /// Free-text comma-separated category labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text_en: Option<String>,
    /// Nutrition grade `"a"`..`"e"`, absent when not computed upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriscore_grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriscore_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriments: Option<Nutriments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    /// Package size as free text, e.g. `"330 ml"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
}

impl Product {
    /// Creates a product with only the barcode set. Mostly useful as a base
    /// for struct-update syntax in tests and fixtures.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            product_name: None,
            product_name_en: None,
            image_url: None,
            image_small_url: None,
            categories: None,
            categories_tags: Vec::new(),
            ingredients_text: None,
            ingredients_text_en: None,
            nutriscore_grade: None,
            nutriscore_score: None,
            nutriments: None,
            labels: None,
            labels_tags: Vec::new(),
            brands: None,
            quantity: None,
            packaging: None,
        }
    }

    /// Returns the best available display name, preferring the default-locale
    /// name, then the English name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.product_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                self.product_name_en
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or("Unknown product")
    }

    /// Returns `true` if a nutrition grade between `a` and `e` is present.
    #[must_use]
    pub fn has_nutrition_grade(&self) -> bool {
        self.nutriscore_grade
            .as_deref()
            .is_some_and(|g| matches!(g, "a" | "b" | "c" | "d" | "e"))
    }
}

/// Per-100g nutrient values. Each field is independently optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutriments {
    #[serde(
        rename = "energy-kcal_100g",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub energy_kcal_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_100g: Option<f64>,
    #[serde(
        rename = "saturated-fat_100g",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub saturated_fat_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins_100g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt_100g: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_default_locale() {
        let p = Product {
            product_name: Some("Chocolat noir".into()),
            product_name_en: Some("Dark chocolate".into()),
            ..bare("123")
        };
        assert_eq!(p.display_name(), "Chocolat noir");
    }

    #[test]
    fn display_name_falls_back_to_english() {
        let p = Product {
            product_name: Some("   ".into()),
            product_name_en: Some("Dark chocolate".into()),
            ..bare("123")
        };
        assert_eq!(p.display_name(), "Dark chocolate");
    }

    #[test]
    fn display_name_handles_fully_anonymous_products() {
        assert_eq!(bare("123").display_name(), "Unknown product");
    }

    #[test]
    fn deserializes_sparse_upstream_record() {
        let raw = serde_json::json!({
            "code": "3017620422003",
            "product_name": "Nutella",
            "nutriscore_grade": "e",
            "nutriments": { "energy-kcal_100g": 539.0, "sugars_100g": 56.3 },
            "unknown_upstream_field": { "ignored": true }
        });
        let p: Product = serde_json::from_value(raw).expect("should deserialize");
        assert_eq!(p.code, "3017620422003");
        assert!(p.has_nutrition_grade());
        let n = p.nutriments.expect("nutriments present");
        assert_eq!(n.energy_kcal_100g, Some(539.0));
        assert_eq!(n.fat_100g, None);
    }

    #[test]
    fn unrecognized_grade_does_not_count() {
        let p = Product {
            nutriscore_grade: Some("unknown".into()),
            ..bare("1")
        };
        assert!(!p.has_nutrition_grade());
    }

    fn bare(code: &str) -> Product {
        Product::with_code(code)
    }
}
