//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint (sitemap, users, contacts, health)
//! - **Schemas**: the wire types exchanged with clients
//!
//! The generated specification backs Swagger UI (debug builds) and the route
//! listing served at `/`.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts API",
        description = "CRUD HTTP interface for a contacts address book."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::sitemap::sitemap,
        crate::api::users::hello_user,
        crate::api::contacts::list_contacts,
        crate::api::contacts::create_contact,
        crate::api::contacts::get_contact,
        crate::api::contacts::update_contact,
        crate::api::contacts::delete_contact,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        crate::models::Contact,
        crate::models::ContactChanges,
        crate::models::ErrorBody,
        crate::api::contacts::CreateContactRequest,
        crate::api::sitemap::RouteEntry,
        crate::api::sitemap::Sitemap,
        crate::api::users::Greeting,
    )),
    tags(
        (name = "meta", description = "Service index"),
        (name = "contacts", description = "Operations on the contact collection"),
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
