//! Contact data model.
//!
//! The storage column `name` surfaces as the API field `full_name`; the
//! persistence layer owns that mapping, so everything above it speaks
//! `full_name` exclusively.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Address-book contact record.
///
/// Serialisation contract: `{id, full_name, email, phone, address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    /// Display name; unique across the collection.
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    /// Email address; unique across the collection.
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Phone number; unique across the collection.
    #[schema(example = "555-0100")]
    pub phone: String,
    /// Free-form postal address.
    #[schema(example = "1 High Street")]
    pub address: String,
}

/// Validated data for creating a contact.
///
/// Construction goes through presence validation, so every field is
/// guaranteed non-absent by the time storage sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    /// Display name for the new contact.
    pub full_name: String,
    /// Email address for the new contact.
    pub email: String,
    /// Phone number for the new contact.
    pub phone: String,
    /// Postal address for the new contact.
    pub address: String,
}

/// Partial-update change set for an existing contact.
///
/// Absent fields leave the stored value untouched; unknown JSON keys are
/// ignored on deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactChanges {
    /// Replacement display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    /// Replacement email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    /// Replacement phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "555-0199")]
    pub phone: Option<String>,
    /// Replacement postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "2 Low Street")]
    pub address: Option<String>,
}

impl ContactChanges {
    /// True when no field is provided, making the update a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

/// Presence-validation failure listing the absent required fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);
