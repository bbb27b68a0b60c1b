//! Service index handler.
//!
//! ```text
//! GET /
//! ```
//!
//! Answers with a generated listing of the live routes so the API is
//! explorable without external documentation. The listing is derived from
//! the OpenAPI document, so it cannot drift from the registered handlers.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::OpenApi;

use crate::doc::ApiDoc;

/// Welcome line included in the index payload.
const WELCOME: &str = "Welcome to the Contacts API";

/// HTTP methods that may appear as operation keys in an OpenAPI path item.
const KNOWN_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// One route in the sitemap listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RouteEntry {
    /// HTTP method in upper case.
    #[schema(example = "GET")]
    pub method: String,
    /// Route template as registered with the server.
    #[schema(example = "/contact/{contact_id}")]
    pub path: String,
}

/// Sitemap payload returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Sitemap {
    /// Welcome message.
    #[schema(example = "Welcome to the Contacts API")]
    pub msg: String,
    /// Every documented route, sorted by path then method.
    pub endpoints: Vec<RouteEntry>,
}

/// Describe the live API surface.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Route listing", body = Sitemap)),
    tags = ["meta"],
    operation_id = "sitemap"
)]
#[get("/")]
pub async fn sitemap() -> web::Json<Sitemap> {
    web::Json(Sitemap {
        msg: WELCOME.to_owned(),
        endpoints: route_entries(&ApiDoc::openapi()),
    })
}

/// Flatten the OpenAPI paths object into sorted `(method, path)` entries.
///
/// Walks the serialised document rather than utoipa's typed tree so the
/// listing depends only on the stable OpenAPI wire format. Path items carry
/// non-operation keys (`parameters`, `summary`), so keys are filtered
/// against the known method set.
fn route_entries(openapi: &utoipa::openapi::OpenApi) -> Vec<RouteEntry> {
    let document = match serde_json::to_value(openapi) {
        Ok(document) => document,
        Err(error) => {
            warn!(error = %error, "failed to serialise the OpenAPI document");
            return Vec::new();
        }
    };
    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut entries: Vec<RouteEntry> = paths
        .iter()
        .flat_map(|(path, item)| {
            item.as_object()
                .map(|operations| {
                    operations
                        .keys()
                        .filter(|method| KNOWN_METHODS.contains(&method.as_str()))
                        .map(|method| RouteEntry {
                            method: method.to_uppercase(),
                            path: path.clone(),
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));
    entries
}
