use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::app_router;
use axum_prometheus::PrometheusMetricLayer;
use qap_score::config::AppConfig;
use qap_score::error::AppError;
use qap_score::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle, config.export.output_dir.clone());
    let readiness_flag = app_state.readiness.clone();

    let app = app_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "QAP score calculator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
