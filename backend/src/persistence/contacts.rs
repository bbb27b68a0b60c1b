//! SQLite-backed contact repository using Diesel ORM.
//!
//! Defines the [`ContactRepository`] port consumed by the HTTP layer and the
//! Diesel adapter implementing it. "Not found" is explicit in every return
//! type (`Option`, `bool`); only conflicts and storage faults surface as
//! [`RepositoryError`] values, so callers decide the HTTP mapping.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::models::{Contact, ContactChanges, NewContact};

use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A mutation violated a uniqueness constraint.
    #[error("contact conflict: {message}")]
    Conflict { message: String },

    /// Repository connection could not be established.
    #[error("contact repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query { message: String },
}

impl RepositoryError {
    /// Create a conflict error with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for contact storage and retrieval.
///
/// "Not found" is a value, not an error: lookups return `Option`, deletion
/// reports whether a row was removed, and updates return the refreshed
/// record only when the id matched.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fetch every contact ordered by id ascending.
    async fn list(&self) -> Result<Vec<Contact>, RepositoryError>;

    /// Insert a validated contact and return the stored record.
    async fn insert(&self, contact: &NewContact) -> Result<Contact, RepositoryError>;

    /// Fetch a single contact by id; `None` when no record matches.
    async fn find_by_id(&self, contact_id: i32) -> Result<Option<Contact>, RepositoryError>;

    /// Apply the provided fields to an existing contact.
    ///
    /// Returns the refreshed record, or `None` when no record matches. An
    /// empty change set leaves the record untouched.
    async fn update(
        &self,
        contact_id: i32,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, RepositoryError>;

    /// Delete a contact by id, reporting whether a row was removed.
    async fn delete(&self, contact_id: i32) -> Result<bool, RepositoryError>;
}

/// Diesel implementation of the contact repository port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to contact repository errors.
fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to contact repository errors.
fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            conflict_error(info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => RepositoryError::query("database error"),
        DieselError::NotFound => RepositoryError::query("record not found"),
        _ => RepositoryError::query("database error"),
    }
}

/// Identify the API field named by a SQLite uniqueness violation.
///
/// SQLite reports violations as `UNIQUE constraint failed: contacts.<column>`;
/// the `name` column surfaces as `full_name` in the API.
fn conflicting_field(message: &str) -> Option<&'static str> {
    const UNIQUE_COLUMNS: [(&str, &str); 3] = [
        ("contacts.name", "full_name"),
        ("contacts.email", "email"),
        ("contacts.phone", "phone"),
    ];

    UNIQUE_COLUMNS
        .iter()
        .find(|(column, _)| message.contains(column))
        .map(|(_, field)| *field)
}

/// Build a conflict error naming the colliding field when identifiable.
fn conflict_error(message: &str) -> RepositoryError {
    match conflicting_field(message) {
        Some(field) => {
            RepositoryError::conflict(format!("a contact with this {field} already exists"))
        }
        None => RepositoryError::conflict("contact violates a uniqueness constraint"),
    }
}

/// Convert a database row to a domain Contact.
fn row_to_contact(row: ContactRow) -> Contact {
    Contact {
        id: row.id,
        full_name: row.name,
        email: row.email,
        phone: row.phone,
        address: row.address,
    }
}

/// Borrow a change set as a Diesel changeset.
fn changes_to_changeset(changes: &ContactChanges) -> ContactChangeset<'_> {
    ContactChangeset {
        name: changes.full_name.as_deref(),
        email: changes.email.as_deref(),
        phone: changes.phone.as_deref(),
        address: changes.address.as_deref(),
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::id.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_contact).collect())
    }

    async fn insert(&self, contact: &NewContact) -> Result<Contact, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewContactRow {
            name: &contact.full_name,
            email: &contact.email,
            phone: &contact.phone,
            address: &contact.address,
        };

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_contact(row))
    }

    async fn find_by_id(&self, contact_id: i32) -> Result<Option<Contact>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(contact_id)
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_contact))
    }

    async fn update(
        &self,
        contact_id: i32,
        changes: &ContactChanges,
    ) -> Result<Option<Contact>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let existing: Option<ContactRow> = contacts::table
            .find(contact_id)
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(existing_row) = existing else {
            return Ok(None);
        };

        // Diesel rejects an all-None changeset, so the no-op case must
        // return before building the UPDATE.
        if changes.is_empty() {
            return Ok(Some(row_to_contact(existing_row)));
        }

        diesel::update(contacts::table.find(contact_id))
            .set(&changes_to_changeset(changes))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let refreshed: Option<ContactRow> = contacts::table
            .find(contact_id)
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(refreshed.map(row_to_contact))
    }

    async fn delete(&self, contact_id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(contacts::table.find(contact_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
