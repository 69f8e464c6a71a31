use serde::Deserialize;

use taskhub_todos::Todo;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Full replacement (`PUT`): title is required, the rest falls back to
/// defaults, matching replace semantics.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Sparse update (`PATCH`): everything optional.
#[derive(Debug, Deserialize)]
pub struct PatchTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn todo_to_json(todo: Todo) -> serde_json::Value {
    serde_json::json!({
        "id": todo.id.to_string(),
        "title": todo.title,
        "description": todo.description,
        "completed": todo.completed,
        "created_at": todo.created_at.to_rfc3339(),
        "updated_at": todo.updated_at.to_rfc3339(),
    })
}
