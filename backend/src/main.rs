use anyhow::Context;
use blog_backend::{AppState, config::AppConfig, db, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&settings);

    if let Err(e) = run(settings).await {
        tracing::error!(error = ?e, "Server failed to start");
        return Err(e);
    }
    Ok(())
}

async fn run(settings: AppConfig) -> anyhow::Result<()> {
    let pool = db::setup_database(&settings)
        .await
        .context("Unable to connect to the database")?;
    let addr = settings.server_addr();
    let app = routes::create_router(AppState::new(pool, settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(settings: &AppConfig) {
    let default_level = if settings.is_development() {
        "blog_backend=debug"
    } else {
        "blog_backend=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
