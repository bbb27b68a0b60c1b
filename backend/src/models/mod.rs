//! Domain data models.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error carrying kind and message.
//! - ErrorBody (alias to `error::ErrorBody`) — error reply wire format.
//! - ErrorKind (alias to `error::ErrorKind`) — stable error taxonomy.
//! - Contact types (aliases into `contact`) — address-book records and the
//!   validated creation/update payloads.
//! - User (alias to `user::User`) — stored account identity.

pub mod contact;
pub mod error;
pub mod user;
pub use self::contact::{Contact, ContactChanges, MissingFields, NewContact};
pub use self::error::{Error, ErrorBody, ErrorKind};
pub use self::user::User;

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
