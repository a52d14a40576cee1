//! `api` crate: HTTP REST API layer.
//!
//! Exposes:
//!   POST   /employees
//!   GET    /employees/{id}
//!   PUT    /employees/{id}
//!   DELETE /employees/{id}
//!   GET    /companies/{companyId}/employees
//!   GET    /companies/{companyId}/departments/{departmentId}/employees
//!   POST   /departments
//!   GET    /departments/{id}
//!   GET    /health

pub mod error;
pub mod handlers;
pub mod state;
pub mod validation;

use std::future::Future;
use std::io;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::{timeout::error::Elapsed, BoxError, ServiceBuilder};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;
pub use state::AppState;

use handlers::{departments, employees, health};

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Upper bound on handling a single request.
    pub request_timeout: Duration,
    /// How long in-flight requests may run after the shutdown signal.
    pub shutdown_timeout: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(15),
        }
    }
}

/// Routes only, without middleware.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(employees::create))
        .route(
            "/employees/:id",
            get(employees::get)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route("/companies/:company_id/employees", get(employees::list_by_company))
        .route(
            "/companies/:company_id/departments/:department_id/employees",
            get(employees::list_by_department),
        )
        .route("/departments", post(departments::get_or_create))
        .route("/departments/:id", get(departments::get))
        .route("/health", get(health::health))
        .with_state(state)
}

/// The full application: routes plus tracing and timeout layers.
pub fn app(state: AppState, settings: &ServerSettings) -> Router {
    with_timeout(routes(state), settings.request_timeout).layer(TraceLayer::new_for_http())
}

/// Fail requests running longer than `timeout` with a 408 `ApiError` body.
pub(crate) fn with_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(middleware_error))
            .timeout(timeout),
    )
}

async fn middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Middleware(err.to_string())
    }
}

/// Bind `bind` and serve `app` until `shutdown` resolves.
///
/// After the signal, in-flight requests get `settings.shutdown_timeout` to
/// finish before the server task is aborted.
pub async fn serve<F>(
    bind: &str,
    app: Router,
    settings: &ServerSettings,
    shutdown: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind).await?;
    info!("API listening on {}", listener.local_addr()?);

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let signal = async move {
        shutdown.await;
        let _ = signalled_tx.send(());
    };

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
    });

    tokio::select! {
        joined = &mut server => return joined.map_err(io::Error::other)?,
        _ = signalled_rx => info!("Shutdown signal received, draining connections"),
    }

    match tokio::time::timeout(settings.shutdown_timeout, &mut server).await {
        Ok(joined) => {
            joined.map_err(io::Error::other)??;
            info!("Server stopped gracefully");
        }
        Err(_) => {
            warn!(
                timeout_secs = settings.shutdown_timeout.as_secs(),
                "Graceful shutdown timed out, aborting remaining connections"
            );
            server.abort();
        }
    }
    Ok(())
}

#[cfg(test)]
mod routes_tests;
