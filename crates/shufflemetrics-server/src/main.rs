//! Shuffle-server metrics endpoint.
//!
//! - GET /metrics/{server,runtime,rpc,transport}
//! - GET /healthz

use tracing_subscriber::{fmt, EnvFilter};

use shufflemetrics_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("SHUFFLEMETRICS_CONFIG")
        .unwrap_or_else(|_| "shufflemetrics.yaml".into());
    let cfg = config::load_from_file(&path).expect("config load failed");

    let state = app_state::AppState::new(cfg).expect("metrics state init failed");
    let listen = state
        .cfg()
        .server
        .listen_addr()
        .expect("server.listen validated at load");
    let app = router::build_router(state);

    tracing::info!(%listen, "shufflemetrics-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
