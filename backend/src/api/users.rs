//! Users API handlers.
//!
//! ```text
//! GET /user
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

/// Greeting payload returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Greeting {
    /// Human-readable greeting message.
    #[schema(example = "Hello, this is your GET /user response")]
    pub msg: String,
}

/// Greet the caller.
///
/// The registration flow that will expose stored user records is not built
/// yet; until then this endpoint answers with a fixed greeting.
#[utoipa::path(
    get,
    path = "/user",
    responses((status = 200, description = "Greeting", body = Greeting)),
    tags = ["users"],
    operation_id = "helloUser"
)]
#[get("/user")]
pub async fn hello_user() -> web::Json<Greeting> {
    web::Json(Greeting {
        msg: "Hello, this is your GET /user response".to_owned(),
    })
}
