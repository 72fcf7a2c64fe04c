//! Application state management

use domain_products::HttpProductClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Pooled upstream client, cloned into each domain router
    pub client: HttpProductClient,
}
