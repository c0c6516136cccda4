//! HTTP server for the clinic directory API
//!
//! Builds the axum router over any pair of repositories and serves it with
//! graceful shutdown.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use clinic_core::{DoctorRepository, TaskRepository};
use serde_json::{json, Value};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{doctors, error::ApiError, request_logger, tasks};

/// Shared state for handlers
pub struct AppState<T, D> {
    pub tasks: Arc<T>,
    pub doctors: Arc<D>,
}

impl<T, D> Clone for AppState<T, D> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            doctors: Arc::clone(&self.doctors),
        }
    }
}

/// HTTP server over a task and a doctor repository
pub struct ApiServer<T, D> {
    state: AppState<T, D>,
}

impl<T, D> ApiServer<T, D>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    pub fn new(tasks: Arc<T>, doctors: Arc<D>) -> Self {
        Self {
            state: AppState { tasks, doctors },
        }
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_listener(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// In-flight requests are drained before this returns.
    pub async fn serve_with_listener<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(address = %listener.local_addr()?, "Starting HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Create the router with all endpoints
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/ping", get(ping_handler))
            .route("/health", get(health_handler::<T, D>))
            .route(
                "/tasks/",
                get(tasks::list_tasks::<T, D>)
                    .post(tasks::create_task::<T, D>)
                    .put(tasks::update_task::<T, D>),
            )
            .route(
                "/tasks",
                get(tasks::list_tasks::<T, D>)
                    .post(tasks::create_task::<T, D>)
                    .put(tasks::update_task::<T, D>),
            )
            .route("/tasks/:id", get(tasks::get_task::<T, D>))
            .route(
                "/doctors/",
                get(doctors::list_doctors::<T, D>)
                    .post(doctors::create_doctor::<T, D>)
                    .put(doctors::update_doctor::<T, D>),
            )
            .route(
                "/doctors",
                get(doctors::list_doctors::<T, D>)
                    .post(doctors::create_doctor::<T, D>)
                    .put(doctors::update_doctor::<T, D>),
            )
            .route("/doctors/:id", get(doctors::get_doctor::<T, D>))
            .layer(middleware::from_fn(
                request_logger::request_logging_middleware,
            ))
            .layer(CorsLayer::permissive())
            .with_state(self.state)
    }
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "msg": "Healthy" }))
}

async fn ping_handler() -> &'static str {
    "pong"
}

/// `GET /health` → 200 when both stores answer, 503 otherwise
async fn health_handler<T, D>(
    State(state): State<AppState<T, D>>,
) -> Result<(StatusCode, Json<Value>), ApiError>
where
    T: TaskRepository + 'static,
    D: DoctorRepository + 'static,
{
    let (tasks, doctors) = tokio::join!(state.tasks.health_check(), state.doctors.health_check());
    tasks
        .and(doctors)
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;

    Ok((StatusCode::OK, Json(json!({ "status": "healthy" }))))
}
