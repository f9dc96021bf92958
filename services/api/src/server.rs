use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository, LocalOutbox};
use crate::relay::HttpMailRelay;
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_broker::config::{AppConfig, ConfigError};
use loan_broker::error::AppError;
use loan_broker::telemetry;
use loan_broker::workflows::leads::{LeadService, NotificationPublisher};
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
    if let Some(rate) = args.rate.take() {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::InvalidNumber {
                key: "--rate",
                value: rate.to_string(),
            }
            .into());
        }
        config.simulation.annual_rate_percent = rate;
    }

    telemetry::init(&config.telemetry)?;

    match config.mail.relay_url.clone() {
        Some(endpoint) => {
            info!(%endpoint, "relaying lead notifications over HTTP");
            serve(config, Arc::new(HttpMailRelay::spawn(endpoint))).await
        }
        None => serve(config, Arc::new(LocalOutbox::default())).await,
    }
}

async fn serve<N>(config: AppConfig, notifier: Arc<N>) -> Result<(), AppError>
where
    N: NotificationPublisher + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let lead_service = Arc::new(LeadService::new(
        repository,
        notifier,
        config.simulation,
        config.mail.receiver.clone(),
    ));

    let app = with_lead_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rate = config.simulation.annual_rate_percent,
        "loan broker api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
