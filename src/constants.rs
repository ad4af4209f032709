// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. The remote
//! identifiers below are the values the Invoice Simple web app presents; the
//! service rejects requests that omit them.

// ---------------------------------------------------------------------------
// Invoice Simple endpoints
// ---------------------------------------------------------------------------

/// Root of the account API (login).
pub const DEFAULT_API_BASE: &str = "https://api.getinvoicesimple.com";

/// Root of the web app API (document listing).
pub const DEFAULT_APP_BASE: &str = "https://app.invoicesimple.com";

/// Root of the Parse data API (invoice records).
pub const DEFAULT_DATA_BASE: &str = "https://data.getinvoicesimple.com";

pub const LOGIN_PATH: &str = "/api/v3/app/login";
pub const DOCUMENTS_PATH: &str = "/api/docs";
pub const INVOICE_QUERY_PATH: &str = "/parse/classes/Invoice";

// ---------------------------------------------------------------------------
// Client identity presented to the service
// ---------------------------------------------------------------------------

pub const ACCEPT_HEADER_VALUE: &str = "application/json, text/plain, */*";
pub const SESSION_TOKEN_HEADER: &str = "x-parse-session-token";

pub const CLIENT_PLATFORM: &str = "web";
pub const CLIENT_APP: &str = "app.invoicesimple.com";
pub const CLIENT_VERSION: &str = "779.0.0-production";
pub const CLIENT_INSTALLATION: &str = "c8ffcd60-af98-11ec-9ee6-d5081be09e98";

pub const INSTALLATION_LOCALE: &str = "en-US";
pub const INSTALLATION_OS: &str = "Linux x86_64";
pub const INSTALLATION_DEVICE: &str = "desktop";
pub const INSTALLATION_APPSFLYER_ID: &str = "web";

/// Parse SDK version string, sent both at login and with every data query.
pub const PARSE_CLIENT_VERSION: &str = "js2.10.0";
pub const PARSE_APPLICATION_ID: &str = "F8pgJyHm8jxQhXxYnpdEzBTxLP2Nhu68JLtmek3y";
pub const PARSE_INSTALLATION_ID: &str = "3719d178-b899-43a0-867b-cb951b1792ac";

// ---------------------------------------------------------------------------
// Listing boundaries
// ---------------------------------------------------------------------------

/// How many documents the listing endpoint returns per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Document type filter for invoices (estimates use a different code).
pub const INVOICE_DOCTYPE: &str = "0";
pub const LISTING_SORT_FIELD: &str = "invoiceDate";
pub const LISTING_SORT_DIRECTION: &str = "desc";

// ---------------------------------------------------------------------------
// Detail fan-out boundaries
// ---------------------------------------------------------------------------

/// In-flight invoice detail requests when none is configured.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 16;

/// Upper bound on in-flight invoice detail requests.
///
/// Every permit is an open connection to the data API; beyond this the
/// service starts refusing connections for a single session.
pub const MAX_DETAIL_CONCURRENCY: usize = 64;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

pub const DEFAULT_OUTPUT_FILE: &str = "invoicesimple-export.csv";

pub const USERNAME_ENV_VAR: &str = "INVOICE_SIMPLE_USERNAME";
pub const PASSWORD_ENV_VAR: &str = "INVOICE_SIMPLE_PASSWORD";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
