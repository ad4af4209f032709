// src/api/pagination.rs
//! Cursor-following pagination over the document listing.
//!
//! Pages are strictly sequential: each `next` cursor is only known once the
//! previous page has arrived.

use super::types::PaginationResult;
use super::InvoiceService;
use crate::error::AppError;
use crate::model::{DocumentRef, ListingPage, Session};
use crate::types::ValidatedUrl;
use futures::stream::{self, Stream, TryStreamExt};

struct Cursor {
    next_url: Option<ValidatedUrl>,
    pages_fetched: u32,
}

/// Lazily walks the listing starting at `start`, one request per page.
///
/// The stream ends after the first page that reports no further pages. With
/// `max_pages` set, asking for a page beyond the cap yields
/// `PaginationLimitExceeded` instead of issuing the request.
pub fn listing_pages<'a, S>(
    service: &'a S,
    session: &'a Session,
    start: ValidatedUrl,
    max_pages: Option<u32>,
) -> impl Stream<Item = Result<ListingPage, AppError>> + Send + 'a
where
    S: InvoiceService + ?Sized,
{
    let cursor = Cursor {
        next_url: Some(start),
        pages_fetched: 0,
    };

    stream::try_unfold(cursor, move |cursor| async move {
        let Some(url) = cursor.next_url else {
            return Ok(None);
        };

        if let Some(max) = max_pages {
            if cursor.pages_fetched >= max {
                log::warn!("Reached maximum page limit: {}", max);
                return Err(AppError::PaginationLimitExceeded(max));
            }
        }

        log::debug!("Fetching listing page {}", cursor.pages_fetched + 1);
        let page = service.list_documents(&url, session).await?;

        let next_url = match (page.has_more, &page.next_cursor) {
            (false, _) => None,
            (true, Some(next)) => Some(next.clone()),
            (true, None) => {
                return Err(AppError::MalformedResponse(
                    "listing reported hasNextPage without a next cursor".to_string(),
                ))
            }
        };

        let cursor = Cursor {
            next_url,
            pages_fetched: cursor.pages_fetched + 1,
        };
        Ok::<_, AppError>(Some((page, cursor)))
    })
}

/// Fetches every page and appends their items in server order.
///
/// No re-sorting and no de-duplication: the result is exactly the
/// concatenation of the pages.
pub async fn collect_all<S>(
    service: &S,
    session: &Session,
    start: ValidatedUrl,
    max_pages: Option<u32>,
) -> Result<PaginationResult<DocumentRef>, AppError>
where
    S: InvoiceService + ?Sized,
{
    let pages = listing_pages(service, session, start, max_pages);
    futures::pin_mut!(pages);

    let mut all_items = Vec::new();
    let mut pages_fetched = 0u32;

    while let Some(page) = pages.try_next().await? {
        pages_fetched += 1;
        all_items.extend(page.items);
    }

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
        pages_fetched,
    })
}
