//! Error response types.

use crate::middleware::trace::TraceId;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Stable machine-readable error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// The mutation collides with an existing record.
    Conflict,
    /// The storage layer failed to complete the operation.
    StorageFailure,
}

/// Error reply wire format.
///
/// Every failure serialises to exactly `{"error": message, "status_code": n}`
/// with the status code repeated in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ErrorBody {
    /// Human-readable error message.
    #[schema(example = "contact not found")]
    pub error: String,
    /// HTTP status code mirrored in the payload.
    #[schema(example = 404)]
    pub status_code: u16,
}

/// API error carrying the taxonomy kind and a client-facing message.
///
/// # Examples
/// ```
/// use contacts_api::models::{Error, ErrorKind};
///
/// let err = Error::not_found("contact not found");
/// assert_eq!(err.kind, ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Stable machine-readable error kind.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    ///
    /// Logged alongside storage failures; never serialised into the payload.
    pub trace_id: Option<String>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// is correlated automatically.
    ///
    /// # Examples
    /// ```
    /// use contacts_api::models::{Error, ErrorKind};
    /// let err = Error::new(ErrorKind::InvalidRequest, "bad");
    /// assert_eq!(err.kind, ErrorKind::InvalidRequest);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Attach a trace identifier to the error.
    ///
    /// # Examples
    /// ```
    /// use contacts_api::models::Error;
    /// let err = Error::not_found("missing").with_trace_id("abc");
    /// assert_eq!(err.trace_id.as_deref(), Some("abc"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorKind::InvalidRequest`].
    ///
    /// # Examples
    /// ```
    /// use contacts_api::models::Error;
    ///
    /// let err = Error::invalid_request("bad input");
    /// ```
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    ///
    /// # Examples
    /// ```
    /// use contacts_api::models::Error;
    ///
    /// let err = Error::not_found("contact not found");
    /// ```
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    ///
    /// # Examples
    /// ```
    /// use contacts_api::models::Error;
    ///
    /// let err = Error::conflict("a contact with this email already exists");
    /// ```
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::StorageFailure`].
    ///
    /// # Examples
    /// ```
    /// use contacts_api::models::Error;
    ///
    /// let err = Error::storage_failure("commit failed");
    /// ```
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageFailure, message)
    }

    /// Build the serialisable payload for this error.
    ///
    /// Storage failures are logged with their original message and redacted
    /// so persistence internals never reach clients.
    fn body(&self) -> ErrorBody {
        let status_code = self.status_code().as_u16();
        if matches!(self.kind, ErrorKind::StorageFailure) {
            if let Some(trace_id) = &self.trace_id {
                error!(%trace_id, message = %self.message, "storage failure");
            } else {
                error!(message = %self.message, "storage failure");
            }
            return ErrorBody {
                error: "storage failure".to_owned(),
                status_code,
            };
        }
        ErrorBody {
            error: self.message.clone(),
            status_code,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl ErrorKind {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.kind.as_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header(("trace-id", id.clone()));
        }
        builder.json(self.body())
    }
}
