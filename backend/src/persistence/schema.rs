//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    ///
    /// Provisioned ahead of the registration flow; no HTTP endpoint reads or
    /// mutates this table yet.
    users (id) {
        /// Primary key assigned by the database.
        id -> Integer,
        /// Login email; UNIQUE constraint.
        email -> Text,
        /// Password as provided at registration.
        password -> Text,
        /// Whether the account may sign in.
        is_active -> Bool,
    }
}

diesel::table! {
    /// Address-book contacts.
    ///
    /// The `name` column surfaces as `full_name` in the API; `name`, `email`,
    /// and `phone` each carry a UNIQUE constraint.
    contacts (id) {
        /// Primary key assigned by the database.
        id -> Integer,
        /// Display name; UNIQUE constraint.
        name -> Text,
        /// Email address; UNIQUE constraint.
        email -> Text,
        /// Phone number; UNIQUE constraint.
        phone -> Text,
        /// Free-form postal address.
        address -> Text,
    }
}
