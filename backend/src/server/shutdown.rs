//! Graceful shutdown: fail the health probes, then stop the listener.

use std::future::Future;

use actix_web::web;
use tokio::signal;
use tracing::{info, warn};

use registration::inbound::http::health::HealthState;

/// Wait for Ctrl-C or, on Unix, SIGTERM.
///
/// A handler that cannot be installed never fires; the other one still does.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C, draining"),
        () = terminate => info!("received SIGTERM, draining"),
    }
}

/// Once `signal` resolves, mark the server as draining and run `stop`.
pub async fn drain_on<S, F, Fut>(signal: S, health_state: web::Data<HealthState>, stop: F)
where
    S: Future<Output = ()>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    signal.await;
    health_state.begin_drain();
    stop().await;
    info!("server stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn drain_fails_probes_before_stopping() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let stopped = Arc::new(AtomicBool::new(false));

        let observed_state = health_state.clone();
        let observed_stop = Arc::clone(&stopped);
        drain_on(async {}, health_state.clone(), move || async move {
            assert!(!observed_state.is_alive());
            assert!(!observed_state.is_ready());
            observed_stop.store(true, Ordering::Release);
        })
        .await;

        assert!(stopped.load(Ordering::Acquire));
    }
}
