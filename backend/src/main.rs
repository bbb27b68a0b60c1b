//! Contacts API entry-point: wires configuration, migrations, and the HTTP server.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use contacts_api::api::health::HealthState;
use contacts_api::persistence::{run_pending_migrations, DbPool, PoolConfig};
use contacts_api::server::{create_server, ServerConfig};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "contacts.db";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
    let port = resolve_port(env::var("PORT").ok())?;
    let bind_addr = SocketAddr::from(([0, 0, 0, 0], port));

    run_pending_migrations(&database_url)
        .await
        .wrap_err("database migration failed")?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("database pool construction failed")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, pool))
        .wrap_err("server start-up failed")?;
    info!(%bind_addr, %database_url, "contacts API listening");
    server.await.wrap_err("server terminated abnormally")
}

/// Resolve the listening port from the `PORT` environment variable.
fn resolve_port(raw: Option<String>) -> Result<u16> {
    match raw {
        Some(value) => value
            .parse()
            .wrap_err_with(|| format!("invalid PORT value '{value}'")),
        None => Ok(DEFAULT_PORT),
    }
}
