//! User data model.

use serde::Serialize;

/// Stored user account.
///
/// `password` and `is_active` are storage-only fields: serialisation emits
/// `{id, email}` and nothing else, so credentials can never leak through a
/// JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: i32,
    /// Login email; unique across accounts.
    pub email: String,
    /// Password as provided at registration.
    #[serde(skip_serializing)]
    pub password: String,
    /// Whether the account may sign in.
    #[serde(skip_serializing)]
    pub is_active: bool,
}
