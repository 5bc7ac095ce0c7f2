use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Duration;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use work_quote::config::AppConfig;
use work_quote::error::AppError;
use work_quote::pricing::{Catalog, QuoteEngine, QuoteService, SlidingWindowThrottle};
use work_quote::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(Catalog::standard());
    for issue in catalog.validate() {
        warn!(%issue, "catalog configuration issue");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let throttle = Arc::new(SlidingWindowThrottle::new(
        config.throttle.limit,
        Duration::seconds(config.throttle.window_secs.min(u64::from(u32::MAX)) as i64),
    ));
    let engine = QuoteEngine::new(catalog, config.pricing.clone());
    let quote_service = Arc::new(QuoteService::new(engine, throttle.clone()));

    let sweep_every = std::time::Duration::from_secs(config.throttle.window_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            if let Err(err) = throttle.sweep(chrono::Utc::now()) {
                warn!(%err, "throttle sweep failed");
            }
        }
    });

    let app = with_quote_routes(quote_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rate_limit = config.throttle.limit,
        "quote service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
