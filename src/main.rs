use tokio::net::TcpListener;
use tracing::info;
use vacation::config::AppConfig;
use vacation::error::AppError;
use vacation::routes::create_router;
use vacation::services::{planner::PlanService, storage::StorageService};
use vacation::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_logging(config.debug);

    let storage = StorageService::new();
    let planner = PlanService::default().with_strategy(config.plan_strategy);
    let state = AppState::new(config.clone(), storage, planner);

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(strategy = %config.plan_strategy, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fallback = if debug {
        "info,vacation=debug"
    } else {
        "info,vacation=info"
    };
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
