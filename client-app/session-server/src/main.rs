use std::net::SocketAddr;

use session_server::{build_router, state::AppState};
use session_shared::config::AppConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    session_shared::telemetry::init_telemetry("info,tower_http=debug");

    info!("Session server starting...");

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let sessions = session_infrastructure::connect(&config).await?;
    let state = AppState::new(sessions);

    let demo_email = std::env::var("DEMO_USER_EMAIL").unwrap_or_else(|_| "demo@example.com".into());
    let demo_password = std::env::var("DEMO_USER_PASSWORD").unwrap_or_else(|_| "demo-password".into());
    state.seed_user(1, &demo_email, "Demo User", "member", &demo_password).await?;
    info!("Demo user {} registered", demo_email);

    let app = build_router(state);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
