// src/api/auth.rs
//! Session establishment.

use super::InvoiceService;
use crate::error::AppError;
use crate::model::Session;
use crate::types::Credentials;

/// Exchanges credentials for a session with a single login attempt.
///
/// `Credentials` cannot be built from empty fields, so a missing username or
/// password has already failed as a configuration error before this runs.
pub async fn authenticate<S>(service: &S, credentials: &Credentials) -> Result<Session, AppError>
where
    S: InvoiceService + ?Sized,
{
    log::info!("Logging in as {}", credentials.username());

    let session = service.login(credentials).await?;

    log::debug!("Session established (token {})", session.token());
    Ok(session)
}
