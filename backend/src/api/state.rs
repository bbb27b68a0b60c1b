//! Shared application state for HTTP handlers.

use std::sync::Arc;

use crate::persistence::ContactRepository;

/// Dependencies injected into contact handlers via `web::Data`.
#[derive(Clone)]
pub struct HttpState {
    /// Contact storage port.
    pub contacts: Arc<dyn ContactRepository>,
}

impl HttpState {
    /// Create state backed by the given repository.
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }
}
