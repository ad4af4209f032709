// src/api/test_support.rs
//! In-memory `InvoiceService` for exercising the stages without a network.

use super::InvoiceService;
use crate::error::AppError;
use crate::model::{ClientRecord, DocumentRef, InvoiceDetail, InvoiceSetting, ListingPage, Session};
use crate::types::{Credentials, InvoiceId, SessionToken, ValidatedUrl};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn session() -> Session {
    Session::new(SessionToken::new("r:test-session").unwrap())
}

pub fn page_url(n: usize) -> ValidatedUrl {
    ValidatedUrl::parse(&format!("https://app.test/api/docs?page={}", n)).unwrap()
}

/// `count` documents with ids `doc0`, `doc1`, ...
pub fn documents(count: usize) -> Vec<DocumentRef> {
    (0..count)
        .map(|i| DocumentRef::new(InvoiceId::parse(&format!("doc{}", i)).unwrap()))
        .collect()
}

pub fn invoice_for(id: &InvoiceId) -> InvoiceDetail {
    InvoiceDetail {
        id: id.clone(),
        number: format!("INV-{}", id),
        total_amount: 100.0,
        balance_due: 25.0,
        client: Some(ClientRecord {
            name: Some(format!("Client {}", id)),
        }),
        setting: Some(InvoiceSetting {
            comment: Some("thanks".to_string()),
        }),
    }
}

#[derive(Default)]
pub struct FakeInvoiceService {
    login_token: Option<String>,
    pages: HashMap<String, ListingPage>,
    invoices: HashMap<InvoiceId, InvoiceDetail>,
    failing: HashSet<InvoiceId>,
    login_calls: AtomicUsize,
    listing_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeInvoiceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login_token(mut self, token: &str) -> Self {
        self.login_token = Some(token.to_string());
        self
    }

    /// Serves pages of the given sizes at `page_url(1)`, `page_url(2)`, ...
    pub fn with_listing(self, sizes: &[usize]) -> Self {
        self.with_listing_at(&page_url(1), sizes)
    }

    /// Like `with_listing`, but the first page is served at `start`.
    pub fn with_listing_at(mut self, start: &ValidatedUrl, sizes: &[usize]) -> Self {
        let all = documents(sizes.iter().sum());
        let mut offset = 0;
        for (index, size) in sizes.iter().enumerate() {
            let number = index + 1;
            let is_last = number == sizes.len();
            let page = ListingPage {
                items: all[offset..offset + size].to_vec(),
                next_cursor: (!is_last).then(|| page_url(number + 1)),
                prev_cursor: (number > 1).then(|| page_url(number - 1)),
                has_more: !is_last,
            };
            let url = if number == 1 {
                start.clone()
            } else {
                page_url(number)
            };
            self.pages.insert(url.as_str().to_string(), page);
            offset += size;
        }
        self
    }

    /// Serves `page` verbatim at `url`.
    pub fn with_page(mut self, url: &ValidatedUrl, page: ListingPage) -> Self {
        self.pages.insert(url.as_str().to_string(), page);
        self
    }

    pub fn with_invoices(mut self, items: &[DocumentRef]) -> Self {
        for item in items {
            self.invoices.insert(item.id.clone(), invoice_for(&item.id));
        }
        self
    }

    pub fn with_invoice(mut self, detail: InvoiceDetail) -> Self {
        self.invoices.insert(detail.id.clone(), detail);
        self
    }

    pub fn failing_invoice(mut self, id: &InvoiceId) -> Self {
        self.failing.insert(id.clone());
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl InvoiceService for FakeInvoiceService {
    async fn login(&self, _credentials: &Credentials) -> Result<Session, AppError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        match &self.login_token {
            Some(token) => Ok(Session::new(SessionToken::new(token.clone())?)),
            None => Err(AppError::AuthenticationRejected(
                "the service did not accept the credentials".to_string(),
            )),
        }
    }

    async fn list_documents(
        &self,
        url: &ValidatedUrl,
        _session: &Session,
    ) -> Result<ListingPage, AppError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("no page at {}", url)))
    }

    async fn retrieve_invoice(
        &self,
        id: &InvoiceId,
        _session: &Session,
    ) -> Result<InvoiceDetail, AppError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        // Let the other requests get polled while this one is "on the wire".
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(id) {
            return Err(AppError::MalformedResponse(format!(
                "no invoice matched objectId {}",
                id
            )));
        }
        self.invoices
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("no invoice matched objectId {}", id)))
    }
}
