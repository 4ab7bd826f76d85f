use exercise_tracker::{router, AppState, Config, ExerciseStore, FileStorage};
use tokio::{fs, net::TcpListener, signal};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;

    let storage = FileStorage::new(&config.data_dir);
    info!("storing exercises under {}", storage.dir().display());

    let mut store = ExerciseStore::open(storage);
    store.subscribe(|snapshot| debug!(count = snapshot.len(), "exercise list changed"));
    info!(count = store.len(), "loaded exercises");

    let app = router(AppState::new(store));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
