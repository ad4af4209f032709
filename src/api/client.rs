// src/api/client.rs
//! HTTP client wrapper for the Invoice Simple APIs.
//!
//! This module provides a thin wrapper around reqwest. It attaches the
//! client identity and session headers and hands raw responses to the
//! parser; it makes no decisions about what a response means.

use super::parser;
use super::responses::{InvoiceQuery, LoginRequest};
use crate::config::ServiceEndpoints;
use crate::constants::{
    ACCEPT_HEADER_VALUE, CLIENT_APP, CLIENT_INSTALLATION, CLIENT_PLATFORM, CLIENT_VERSION,
    SESSION_TOKEN_HEADER,
};
use crate::error::AppError;
use crate::model::{InvoiceDetail, ListingPage, Session};
use crate::types::{Credentials, InvoiceId, ValidatedUrl};
use reqwest::{header, Client, Response};
use serde::Serialize;

/// A thin wrapper around reqwest Client for Invoice Simple requests.
#[derive(Clone)]
pub struct InvoiceSimpleClient {
    client: Client,
    endpoints: ServiceEndpoints,
}

impl InvoiceSimpleClient {
    /// Creates a new HTTP client that talks to the given endpoints.
    pub fn new(endpoints: ServiceEndpoints) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .build()?;
        Ok(Self { client, endpoints })
    }

    /// Creates the default headers sent with every request.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(ACCEPT_HEADER_VALUE),
        );
        headers
    }

    /// Headers identifying the web app, required by the login endpoint.
    fn client_identity_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert("x-is-platform", header::HeaderValue::from_static(CLIENT_PLATFORM));
        headers.insert("x-is-app", header::HeaderValue::from_static(CLIENT_APP));
        headers.insert("x-is-version", header::HeaderValue::from_static(CLIENT_VERSION));
        headers.insert(
            "x-is-installation",
            header::HeaderValue::from_static(CLIENT_INSTALLATION),
        );
        headers
    }

    fn session_header(session: &Session) -> Result<header::HeaderValue, AppError> {
        let mut value = header::HeaderValue::from_str(session.token().as_str()).map_err(|e| {
            AppError::MalformedResponse(format!("Session token is not a valid header value: {}", e))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Makes an authenticated GET request.
    pub async fn get(&self, url: &ValidatedUrl, session: &Session) -> Result<Response, AppError> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(SESSION_TOKEN_HEADER, Self::session_header(session)?)
            .send()
            .await?;

        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }

    /// Makes a POST request with JSON body and optional extra headers.
    pub async fn post<T: Serialize>(
        &self,
        url: &ValidatedUrl,
        body: &T,
        headers: header::HeaderMap,
    ) -> Result<Response, AppError> {
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url.as_str())
            .headers(headers)
            .json(body)
            .send()
            .await?;

        log::debug!("POST {} -> {}", url, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::InvoiceService for InvoiceSimpleClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let body = LoginRequest::new(credentials);
        let response = self
            .post(&self.endpoints.login, &body, Self::client_identity_headers())
            .await?;
        let result = extract_response_text(response).await?;
        parser::parse_login_response(result)
    }

    async fn list_documents(
        &self,
        url: &ValidatedUrl,
        session: &Session,
    ) -> Result<ListingPage, AppError> {
        let response = self.get(url, session).await?;
        let result = extract_response_text(response).await?;
        parser::parse_listing_response(result)
    }

    async fn retrieve_invoice(
        &self,
        id: &InvoiceId,
        session: &Session,
    ) -> Result<InvoiceDetail, AppError> {
        let body = InvoiceQuery::by_id(id, session);
        let response = self
            .post(&self.endpoints.invoice_query, &body, header::HeaderMap::new())
            .await?;
        let result = extract_response_text(response).await?;
        parser::parse_invoice_response(result, id)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
