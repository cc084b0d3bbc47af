use serde::{Deserialize, Serialize};

/// Concise product description generated from a product-page URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub summary: String,
}
