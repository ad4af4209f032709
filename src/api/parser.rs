// src/api/parser.rs
//! Turns raw HTTP responses into domain values.
//!
//! Status handling lives here rather than in the client so each endpoint
//! can decide what a non-success status means for it.

use super::client::ApiResponse;
use super::responses::{DocumentListResponse, InvoiceQueryResponse, LoginResponse, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;
use crate::model::{InvoiceDetail, ListingPage, Session};
use crate::types::InvoiceId;

/// Parse any Invoice Simple response body, failing on non-success status.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        decode_body(&result.data, &result.url)
    } else {
        log::error!("HTTP {} from {}", result.status, result.url);
        Err(AppError::ServiceError {
            status: result.status,
            url: result.url,
        })
    }
}

fn decode_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!(
            "{} (from {}; body: {})",
            e,
            url,
            preview(body)
        ))
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse the login response into a session.
///
/// A 4xx means the service refused the credentials; anything else that is
/// not a success is a service failure.
pub fn parse_login_response(result: ApiResponse<String>) -> Result<Session, AppError> {
    if result.status.is_client_error() {
        return Err(AppError::AuthenticationRejected(format!(
            "login returned HTTP {}",
            result.status
        )));
    }
    let response: LoginResponse = parse_api_response(result)?;
    response.to_domain()
}

/// Parse one page of the document listing.
pub fn parse_listing_response(result: ApiResponse<String>) -> Result<ListingPage, AppError> {
    let response: DocumentListResponse = parse_api_response(result)?;
    response.to_domain()
}

/// Parse an invoice query response, reading the first result only.
pub fn parse_invoice_response(
    result: ApiResponse<String>,
    requested: &InvoiceId,
) -> Result<InvoiceDetail, AppError> {
    let response: InvoiceQueryResponse = parse_api_response(result)?;

    if response.results.len() > 1 {
        log::warn!(
            "Query for invoice {} matched {} records; using the first",
            requested,
            response.results.len()
        );
    }

    let record = response.results.into_iter().next().ok_or_else(|| {
        AppError::MalformedResponse(format!("no invoice matched objectId {}", requested))
    })?;

    record.into_detail(requested.clone())
}
