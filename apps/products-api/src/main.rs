//! Products API - REST facade over the upstream catalog

use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::HttpProductClient;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        base_url = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout.as_secs(),
        "Using upstream catalog"
    );

    let client = HttpProductClient::new(&config.upstream)?;
    let state = AppState { config, client };

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.server)?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{}",
        state.config.app.name, state.config.app.version
    );

    create_app(app, &state.config.server).await?;

    info!("Products API shutdown complete");
    Ok(())
}
