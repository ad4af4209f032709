// src/api/responses.rs
//! Wire schemas for the Invoice Simple endpoints.
//!
//! Requests are serialized from borrowed views so no credential or token is
//! cloned into a long-lived value. Responses decode into loosely-optional
//! shapes and are converted to domain types through `ToDomain`, where missing
//! fields become `MalformedResponse` errors instead of silent defaults.

use crate::constants::{
    CLIENT_APP, INSTALLATION_APPSFLYER_ID, INSTALLATION_DEVICE, INSTALLATION_LOCALE,
    INSTALLATION_OS, PARSE_APPLICATION_ID, PARSE_CLIENT_VERSION, PARSE_INSTALLATION_ID,
};
use crate::error::AppError;
use crate::model::{ClientRecord, DocumentRef, InvoiceDetail, InvoiceSetting, ListingPage, Session};
use crate::types::{Credentials, InvoiceId, SessionToken, ValidatedUrl};
use serde::{Deserialize, Serialize};

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

// --- Login ---

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub installation: InstallationDescriptor,
}

impl<'a> LoginRequest<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self {
            username: credentials.username(),
            password: credentials.password(),
            installation: InstallationDescriptor::default(),
        }
    }
}

/// Describes the client installation; the login endpoint requires it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationDescriptor {
    pub locale: &'static str,
    pub app_name: &'static str,
    pub os: &'static str,
    pub device: &'static str,
    pub appsflyer_id: &'static str,
    pub parse_version: &'static str,
}

impl Default for InstallationDescriptor {
    fn default() -> Self {
        Self {
            locale: INSTALLATION_LOCALE,
            app_name: CLIENT_APP,
            os: INSTALLATION_OS,
            device: INSTALLATION_DEVICE,
            appsflyer_id: INSTALLATION_APPSFLYER_ID,
            parse_version: PARSE_CLIENT_VERSION,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub succeeded: bool,
    pub session: Option<LoginSession>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub session_token: Option<String>,
}

impl ToDomain<Session> for LoginResponse {
    fn to_domain(self) -> Result<Session, AppError> {
        if !self.succeeded {
            return Err(AppError::AuthenticationRejected(
                "the service did not accept the credentials".to_string(),
            ));
        }

        let token = self
            .session
            .and_then(|s| s.session_token)
            .ok_or_else(|| {
                AppError::MalformedResponse(
                    "login succeeded but the response carries no session.sessionToken".to_string(),
                )
            })?;

        let token = SessionToken::new(token).map_err(|_| {
            AppError::MalformedResponse("login succeeded with an empty session token".to_string())
        })?;

        Ok(Session::new(token))
    }
}

// --- Document listing ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub next: Option<String>,
    pub prev: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub object_id: InvoiceId,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ToDomain<ListingPage> for DocumentListResponse {
    fn to_domain(self) -> Result<ListingPage, AppError> {
        Ok(ListingPage {
            items: self
                .documents
                .into_iter()
                .map(|doc| DocumentRef {
                    id: doc.object_id,
                    metadata: doc.metadata,
                })
                .collect(),
            next_cursor: parse_cursor("next", self.next)?,
            prev_cursor: parse_cursor("prev", self.prev)?,
            has_more: self.has_next_page,
        })
    }
}

fn parse_cursor(field: &str, raw: Option<String>) -> Result<Option<ValidatedUrl>, AppError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => ValidatedUrl::parse(url).map(Some).map_err(|e| {
            AppError::MalformedResponse(format!("listing '{}' cursor is not a URL: {}", field, e))
        }),
    }
}

// --- Invoice detail ---

/// Parse query for a single invoice, sent as a POST with a `_method` override.
#[derive(Debug, Serialize)]
pub struct InvoiceQuery<'a> {
    #[serde(rename = "where")]
    pub filter: ObjectIdFilter<'a>,
    pub limit: u32,
    #[serde(rename = "_method")]
    pub method: &'static str,
    #[serde(rename = "_ApplicationId")]
    pub application_id: &'static str,
    #[serde(rename = "_ClientVersion")]
    pub client_version: &'static str,
    #[serde(rename = "_InstallationId")]
    pub installation_id: &'static str,
    #[serde(rename = "_SessionToken")]
    pub session_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectIdFilter<'a> {
    pub object_id: &'a str,
}

impl<'a> InvoiceQuery<'a> {
    pub fn by_id(id: &'a InvoiceId, session: &'a Session) -> Self {
        Self {
            filter: ObjectIdFilter {
                object_id: id.as_str(),
            },
            limit: 1,
            method: "GET",
            application_id: PARSE_APPLICATION_ID,
            client_version: PARSE_CLIENT_VERSION,
            installation_id: PARSE_INSTALLATION_ID,
            session_token: session.token().as_str(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceQueryResponse {
    pub results: Vec<InvoiceRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub invoice_no: Option<String>,
    pub total: Option<f64>,
    pub balance_due: Option<f64>,
    pub client: Option<ClientRecord>,
    pub setting: Option<InvoiceSetting>,
}

impl InvoiceRecord {
    /// Validates the top-level fields and attaches the id the record was queried by.
    pub fn into_detail(self, id: InvoiceId) -> Result<InvoiceDetail, AppError> {
        let missing = |field: &str| {
            AppError::MalformedResponse(format!("invoice {} has no '{}' field", id, field))
        };

        Ok(InvoiceDetail {
            number: self.invoice_no.ok_or_else(|| missing("invoiceNo"))?,
            total_amount: self.total.ok_or_else(|| missing("total"))?,
            balance_due: self.balance_due.ok_or_else(|| missing("balanceDue"))?,
            client: self.client,
            setting: self.setting,
            id,
        })
    }
}
