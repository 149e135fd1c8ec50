//! HTTP/JSON front end for the todo store.
//!
//! # Design
//! `app` assembles the full router around a `TodoStore` handle passed in by
//! the caller, so tests can serve an in-memory store and the binary a file
//! backed one. Handlers are stateless; the store clone is the only shared
//! state.

use std::future::Future;

use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use todo_core::TodoStore;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;

pub use config::Config;
pub use error::ApiError;

pub const API_PREFIX: &str = "/api/v1";

pub fn app(store: TodoStore) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(API_PREFIX, todo_routes())
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(store)
}

fn todo_routes() -> Router<TodoStore> {
    use handlers::*;

    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/complete", patch(complete_todo))
        .route("/todos/{id}/uncomplete", patch(uncomplete_todo))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// CorsLayer answers every OPTIONS request itself with 200 and an empty body.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let preflight = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Todo API is running"
    }))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Todo API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "todos": format!("{API_PREFIX}/todos"),
        }
    }))
}

pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn run_until<F>(
    listener: TcpListener,
    store: TodoStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
