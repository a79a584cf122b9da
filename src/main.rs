use habit_board::{AppState, BackendClient, Config, HabitBoard, load_board, router};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let backend = BackendClient::new(&config.backend_url)?;
    let snapshot = load_board(&config.data_path).await;
    info!(
        habits = snapshot.items.len(),
        backend = %backend.base_url(),
        "board loaded from {}",
        config.data_path.display()
    );

    let state = AppState::new(config.data_path, backend, HabitBoard::from_snapshot(snapshot));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
