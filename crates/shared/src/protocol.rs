use serde::{Deserialize, Serialize};

/// Create request body; the server answers with the full entity including
/// the assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
}
