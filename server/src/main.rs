mod config;
mod pages;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment and defaults still apply.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();
    let addr = config.bind_addr();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        uploads_dir = %config.uploads_dir.display(),
        debug = config.debug,
        "configuration loaded"
    );
    if config.debug {
        tracing::warn!("debug routes enabled: spin outcomes can be forced");
    }

    let state = state::AppState::load(config).await;
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "gallery listening");
    axum::serve(listener, app).await.expect("server failed");
}
