//! Formatted product summaries

use serde::{Deserialize, Serialize};

/// One product summary, ready for delivery
///
/// Every text field already carries its final markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnit {
    pub sku: String,
    pub title: String,
    /// Markdown hyperlink to the product page
    pub description: String,
    pub regular_price: String,
    pub sale_price: String,
    pub image_url: String,
    /// e.g. `In Stock: 5`
    pub online_stock: String,
    /// e.g. `In Stock: 7`
    pub in_store_stock: String,
    /// Per-store quantities, present only when some store has stock
    pub store_breakdown: Option<String>,
    /// `SKU: <sku> requested at: <timestamp>`
    pub footer: String,
}
