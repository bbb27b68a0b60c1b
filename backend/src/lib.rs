//! Contacts service library modules.

pub mod api;
pub mod doc;
pub mod middleware;
pub mod models;
pub mod persistence;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
