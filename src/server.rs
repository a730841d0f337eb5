use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config::Settings, management::JobManager};

/// State shared by all web handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub settings: Arc<Settings>,
    pub jobs: Arc<Mutex<JobManager>>,
}

impl ApiContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            jobs: Arc::new(Mutex::new(JobManager::new())),
        }
    }
}

pub fn router(context: ApiContext) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/analyze", post(api::analyze))
        .route("/status", get(api::status))
        .route("/status.json", get(api::status_json))
        .route("/download/detailed.csv", get(api::download_detailed))
        .route("/download/formatted.csv", get(api::download_formatted))
        .route("/health", get(api::health))
        .layer(Extension(context))
}

pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_address)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;
    let app = router(ApiContext::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
