mod invoice;
mod listing;

pub use invoice::{ClientRecord, InvoiceDetail, InvoiceSetting};
pub use listing::{DocumentRef, ListingPage};

use crate::types::SessionToken;

/// An authenticated session with the invoicing service.
///
/// Created once by the authenticator and handed by reference to every
/// later stage; nothing mutates or refreshes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
}

impl Session {
    pub fn new(token: SessionToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}
