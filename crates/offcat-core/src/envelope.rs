//! The normalized pagination envelope returned by every listing operation.
//!
//! Field names match the upstream wire format (`products`, `count`, ...) so
//! the envelope serializes directly onto the local HTTP surface without a
//! second mapping layer.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// One page of products plus pagination metadata.
///
/// Invariants:
/// - `page` is 1-based.
/// - `page_count == ceil(count / page_size)` whenever `page_size > 0`.
/// - An out-of-range `page` carries empty `products` with the remaining
///   fields unchanged; zero matches yield `page_count == 0`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub products: Vec<Product>,
    /// Total number of matches across all pages.
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
}

impl PageEnvelope {
    /// An envelope for zero matches at the given position.
    #[must_use]
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            products: Vec::new(),
            count: 0,
            page,
            page_size,
            page_count: 0,
        }
    }

    /// Returns `true` if a page beyond `page` exists.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.page_count
    }
}

/// Number of pages needed to hold `count` items at `page_size` per page.
///
/// Returns 0 when `page_size` is 0 (degenerate input, no pages).
#[must_use]
pub fn page_count_for(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// Slices a fully materialized item list into a page envelope.
///
/// This is the client-side pagination used when the dedicated category
/// endpoint hands back the entire listing at once. A `page` past the end
/// yields empty `products` while `count` and `page_count` still describe
/// the whole list.
#[must_use]
pub fn paginate(items: &[Product], page: u32, page_size: u32) -> PageEnvelope {
    let count = items.len() as u64;
    let page_count = page_count_for(count, page_size);

    let start = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
    let products = if start >= items.len() || page_size == 0 {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size as usize).min(items.len());
        items[start..end].to_vec()
    };

    PageEnvelope {
        products,
        count,
        page,
        page_size,
        page_count,
    }
}
