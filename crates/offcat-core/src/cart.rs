//! The per-session shopping cart.
//!
//! The cart is an explicit, injectable store with a defined lifecycle: load
//! it at session start, pass it to whatever consumes it, save it on change.
//! Persistence is a local JSON file (the durable per-client storage this
//! system offers); nothing is ever mirrored server-side.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;

/// Errors from cart persistence.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to read cart file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write cart file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cart file {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One cart line: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    /// Always at least 1; an entry at 0 is removed instead.
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// Mutable mapping from product code to cart entry.
///
/// Entries iterate in code order so listings are deterministic. All
/// operations are purely in-memory; callers decide when to [`CartStore::save`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartStore {
    entries: BTreeMap<String, CartEntry>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a cart from `path`. A missing file is an empty cart, not an
    /// error; a corrupt file is surfaced so the caller can decide.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Read`] on I/O failure other than not-found, or
    /// [`CartError::Parse`] if the file exists but is not a valid cart.
    pub fn load(path: &Path) -> Result<Self, CartError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(CartError::Read {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|e| CartError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Writes the cart to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Write`] on I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), CartError> {
        // Serializing a map of plain structs cannot fail.
        let json = serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, json).map_err(|e| CartError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Adds one unit of `product`: inserts at quantity 1, or increments the
    /// existing entry.
    pub fn add(&mut self, product: Product) {
        self.entries
            .entry(product.code.clone())
            .and_modify(|e| e.quantity += 1)
            .or_insert_with(|| CartEntry {
                product,
                quantity: 1,
                added_at: Utc::now(),
            });
    }

    /// Sets the quantity for `code`; 0 removes the entry. Unknown codes are
    /// ignored.
    pub fn set_quantity(&mut self, code: &str, quantity: u32) {
        if quantity == 0 {
            self.entries.remove(code);
        } else if let Some(entry) = self.entries.get_mut(code) {
            entry.quantity = quantity;
        }
    }

    pub fn remove(&mut self, code: &str) {
        self.entries.remove(code);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.quantity)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CartEntry> {
        self.entries.get(code)
    }

    /// Entries in code order.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }
}
