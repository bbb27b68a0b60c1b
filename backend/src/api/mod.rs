//! REST API modules.

pub mod contacts;
pub mod health;
pub mod sitemap;
pub mod state;
pub mod users;

pub use state::HttpState;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::HttpRequest;
use tracing::debug;

use crate::models::Error;

/// Convert JSON body extractor failures into the shared error shape.
///
/// Covers absent bodies, wrong content types, and malformed JSON, so every
/// parse failure surfaces as the standard `{error, status_code}` payload.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}")).into()
}

/// Convert path extractor failures into the shared error shape.
///
/// An id that does not parse as an integer matches no record, so it reports
/// the same 404 as an unknown id.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "path extraction failed");
    Error::not_found("contact not found").into()
}
