use crate::cli::ServeArgs;
use crate::infra::{portrait_resolver, AppState};
use crate::routes::with_portrait_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bademeister::config::AppConfig;
use bademeister::error::AppError;
use bademeister::store::{JsonFileStore, KeyValueStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.store.path)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        portraits: portrait_resolver(&config, store)?,
        calendar: config.calendar,
    };

    let app = with_portrait_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "bademeister portrait service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
