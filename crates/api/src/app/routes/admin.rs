//! Administrative surface mounted at a fixed prefix.
//!
//! Opaque to resource routing: requests under `/admin` are forwarded here
//! wholesale and never matched against the registration table. The mount
//! carries its own fallback so no admin path reaches resource dispatch.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use taskhub_core::TodoId;

use crate::app::resources::ResourceTable;
use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(overview))
        .route("/todos", get(list_todos))
        .route("/todos/:id", get(get_todo))
        .fallback(admin_not_found)
}

/// GET /admin/ - service overview: registered resources and record counts.
pub async fn overview(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(table): Extension<Arc<ResourceTable>>,
) -> impl IntoResponse {
    let resources: Vec<_> = table
        .registry()
        .registrations()
        .iter()
        .map(|registration| {
            serde_json::json!({
                "name": registration.name(),
                "base_path": registration.base_path(),
                "operations": registration
                    .capabilities()
                    .iter_names()
                    .map(|(name, _)| name.to_ascii_lowercase())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "service": "taskhub",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": resources,
        "todo_count": services.todos().list().len(),
    }))
}

/// GET /admin/todos - every record, unfiltered.
pub async fn list_todos(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items: Vec<_> = services
        .todos()
        .list()
        .into_iter()
        .map(dto::todo_to_json)
        .collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// GET /admin/todos/:id - inspect a single record.
pub async fn get_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TodoId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid todo id");
        }
    };

    match services.todos().get(id) {
        Some(todo) => (StatusCode::OK, Json(dto::todo_to_json(todo))).into_response(),
        None => errors::not_found("todo not found"),
    }
}

async fn admin_not_found() -> axum::response::Response {
    errors::not_found("unknown admin path")
}
