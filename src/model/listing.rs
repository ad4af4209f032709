use crate::types::{InvoiceId, ValidatedUrl};
use serde::{Deserialize, Serialize};

/// A document as it appears in the listing, before its detail is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: InvoiceId,
    /// Listing fields other than the id, kept verbatim.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl DocumentRef {
    pub fn new(id: InvoiceId) -> Self {
        Self {
            id,
            metadata: serde_json::Map::new(),
        }
    }
}

/// One page of the document listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub items: Vec<DocumentRef>,
    pub next_cursor: Option<ValidatedUrl>,
    pub prev_cursor: Option<ValidatedUrl>,
    pub has_more: bool,
}
