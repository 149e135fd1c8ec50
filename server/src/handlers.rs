//! Todo route handlers.
//!
//! Ids are captured as raw strings and parsed here so a malformed id gets the
//! same JSON error body as every other client error, including segments that
//! axum's `Path` extractor itself rejects. Body rejections from axum's `Json`
//! extractor are folded into `ApiError::InvalidBody`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use todo_core::{CreateTodo, Todo, TodoStore, UpdateTodo};
use tracing::debug;

use crate::error::ApiError;

type ApiResult<T> = Result<T, ApiError>;

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

fn path_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    match path {
        Ok(Path(raw)) => parse_id(&raw),
        Err(rejection) => {
            debug!(%rejection, "rejected id segment");
            Err(ApiError::InvalidId)
        }
    }
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!(%rejection, "rejected request body");
            Err(ApiError::InvalidBody)
        }
    }
}

/// GET /todos
pub async fn list_todos(State(store): State<TodoStore>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = store
        .get_all()
        .await
        .map_err(|e| ApiError::from_store(e, "retrieve todos", None))?;
    Ok(Json(todos))
}

/// GET /todos/{id}
pub async fn get_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    let id = path_id(path)?;
    let todo = store
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_store(e, "retrieve todo", Some(id)))?;
    Ok(Json(todo))
}

/// POST /todos
pub async fn create_todo(
    State(store): State<TodoStore>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let input = parse_body(payload)?;
    input.validate()?;

    let todo = store
        .create(&input.title, input.description())
        .await
        .map_err(|e| ApiError::from_store(e, "create todo", None))?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id}
pub async fn update_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let id = path_id(path)?;
    let input = parse_body(payload)?;
    input.validate()?;

    let todo = store
        .update(id, &input.title, input.description())
        .await
        .map_err(|e| ApiError::from_store(e, "update todo", Some(id)))?;
    Ok(Json(todo))
}

/// DELETE /todos/{id}
///
/// `TodoStore::delete` succeeds for unknown ids, so existence is checked
/// first to report 404.
pub async fn delete_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let id = path_id(path)?;
    store
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_store(e, "retrieve todo", Some(id)))?;
    store
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "delete todo", Some(id)))?;
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}

/// PATCH /todos/{id}/complete
pub async fn complete_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    set_completed(&store, path_id(path)?, true).await
}

/// PATCH /todos/{id}/uncomplete
pub async fn uncomplete_todo(
    State(store): State<TodoStore>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    set_completed(&store, path_id(path)?, false).await
}

async fn set_completed(store: &TodoStore, id: i64, completed: bool) -> ApiResult<Json<Todo>> {
    let todo = store
        .toggle_complete(id, completed)
        .await
        .map_err(|e| ApiError::from_store(e, "update todo", Some(id)))?;
    Ok(Json(todo))
}
