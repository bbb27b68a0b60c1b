//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::api::contacts::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact,
};
use crate::api::health::{live, ready, HealthState};
use crate::api::sitemap::sitemap;
use crate::api::users::hello_user;
use crate::api::{json_error_handler, path_error_handler, HttpState};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::persistence::DieselContactRepository;
use crate::Trace;

/// Shared state injected into every worker's application instance.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags served by the health probes.
    pub health_state: web::Data<HealthState>,
    /// Repository handles shared across HTTP handlers.
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application with routing, extractor configuration, and
/// middleware.
///
/// Trailing slashes are trimmed before route matching, so `/contact/all/`
/// resolves to the same handler as `/contact/all`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .service(sitemap)
        .service(hello_user)
        // The static /contact/all segment must register before the
        // {contact_id} matcher.
        .service(list_contacts)
        .service(create_contact)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address and database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig { bind_addr, db_pool } = config;
    let http_state = web::Data::new(HttpState::new(Arc::new(DieselContactRepository::new(
        db_pool,
    ))));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
