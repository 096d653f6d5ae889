use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBoardRepository};
use crate::routes::with_campaign_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hasjob::config::AppConfig;
use hasjob::error::AppError;
use hasjob::forms::CampaignFormService;
use hasjob::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let boards = Arc::new(InMemoryBoardRepository::seeded());
    let forms = Arc::new(CampaignFormService::new(boards, config.forms.clone()));

    let app = with_campaign_routes(forms)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, timezone = %config.forms.timezone, "campaign admin ready");

    axum::serve(listener, app).await?;
    Ok(())
}
