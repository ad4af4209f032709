use crate::types::InvoiceId;
use serde::{Deserialize, Serialize};

/// The full invoice record, as returned by the data API.
///
/// Top-level fields are checked when the response is decoded. The client and
/// settings sub-records stay optional here: whether their absence matters is
/// up to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub id: InvoiceId,
    pub number: String,
    pub total_amount: f64,
    pub balance_due: f64,
    pub client: Option<ClientRecord>,
    pub setting: Option<InvoiceSetting>,
}

/// The billed client, embedded in an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: Option<String>,
}

/// Per-invoice settings; only the free-text comment is exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSetting {
    pub comment: Option<String>,
}
