use axum::{
    Router,
    routing::{get, put},
};

use std::{future::Future, sync::Arc};

use crate::currency;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the router serving the currency endpoints.
pub fn app(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/currency", get(currency::get).post(currency::create))
        .route("/currency/{currency_id}", put(currency::update))
        .with_state(ServerState { engine })
}

/// Serve on `listener` until `shutdown` resolves; in-flight requests are
/// allowed to finish.
pub async fn run_with_listener<F>(
    engine: Arc<Engine>,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine))
        .with_graceful_shutdown(shutdown)
        .await
}

pub fn spawn_with_listener(
    engine: Arc<Engine>,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener, std::future::pending()).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
