use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use spinwheel::config::Config;
use spinwheel::db::WheelStorage;
use spinwheel::router::{WheelState, wheel_router};
use spinwheel::service::bootstrap::seed_admin;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        listen_addr = %cfg.basic.listen_addr,
        upload_dir = %cfg.upload.dir,
        insecure_cookie = cfg.basic.insecure_cookie,
        loglevel = %cfg.basic.loglevel,
    );

    let storage = WheelStorage::connect(&cfg.basic.database_url).await?;
    seed_admin(&storage, &cfg.admin).await?;

    // Uploads are parsed in memory; the directory only has to exist.
    tokio::fs::create_dir_all(&cfg.upload.dir).await?;

    if cfg.secure_cookie_on_public_http() {
        warn!(
            listen_addr = %cfg.basic.listen_addr,
            "session cookie is Secure-only but the listener is plain HTTP; \
             logins over HTTP from other hosts will not persist. \
             Put TLS in front or set WHEEL_BASIC__INSECURE_COOKIE=true"
        );
    }
    if cfg.basic.cookie_secret.is_none() {
        warn!("no cookie_secret configured; sessions will not survive a restart");
    }
    let cookie_key = cfg.cookie_key()?;

    let state = WheelState::new(storage, cookie_key, &cfg);
    let app = wheel_router(state);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
