use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use taskhub_core::TodoId;
use taskhub_routing::Capabilities;
use taskhub_todos::{NewTodo, TodoPatch};

use crate::app::{dto, errors, resources::ResourceHandler, services::AppServices};

/// The `todos` collection: full CRUD over the todo store.
pub struct TodosResource {
    services: Arc<AppServices>,
}

impl TodosResource {
    pub fn new(services: Arc<AppServices>) -> Self {
        Self { services }
    }

    fn parse_id(id: &str) -> Result<TodoId, Response> {
        id.parse().map_err(|_| {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid todo id")
        })
    }
}

impl ResourceHandler for TodosResource {
    fn capabilities(&self) -> Capabilities {
        Capabilities::crud()
    }

    fn list(&self) -> Response {
        let items: Vec<_> = self
            .services
            .todos()
            .list()
            .into_iter()
            .map(dto::todo_to_json)
            .collect();
        (StatusCode::OK, Json(items)).into_response()
    }

    fn create(&self, body: serde_json::Value) -> Response {
        let req: dto::CreateTodoRequest = match serde_json::from_value(body) {
            Ok(req) => req,
            Err(e) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.to_string());
            }
        };

        let cmd = NewTodo {
            title: req.title,
            description: req.description.unwrap_or_default(),
            completed: req.completed.unwrap_or(false),
        };

        let todo = match cmd.into_todo(TodoId::new(), Utc::now()) {
            Ok(todo) => todo,
            Err(e) => return errors::domain_error_to_response(e),
        };

        self.services.todos().upsert(todo.clone());
        (StatusCode::CREATED, Json(dto::todo_to_json(todo))).into_response()
    }

    fn retrieve(&self, id: &str) -> Response {
        let id = match Self::parse_id(id) {
            Ok(id) => id,
            Err(response) => return response,
        };

        match self.services.todos().get(id) {
            Some(todo) => (StatusCode::OK, Json(dto::todo_to_json(todo))).into_response(),
            None => errors::not_found("todo not found"),
        }
    }

    fn update(&self, id: &str, body: serde_json::Value, partial: bool) -> Response {
        let id = match Self::parse_id(id) {
            Ok(id) => id,
            Err(response) => return response,
        };

        let Some(mut todo) = self.services.todos().get(id) else {
            return errors::not_found("todo not found");
        };

        let now = Utc::now();
        let result = if partial {
            match serde_json::from_value::<dto::PatchTodoRequest>(body) {
                Ok(req) => todo.apply_patch(
                    TodoPatch {
                        title: req.title,
                        description: req.description,
                        completed: req.completed,
                    },
                    now,
                ),
                Err(e) => {
                    return errors::json_error(
                        StatusCode::BAD_REQUEST,
                        "invalid_body",
                        e.to_string(),
                    );
                }
            }
        } else {
            match serde_json::from_value::<dto::UpdateTodoRequest>(body) {
                Ok(req) => todo.replace(
                    NewTodo {
                        title: req.title,
                        description: req.description.unwrap_or_default(),
                        completed: req.completed.unwrap_or(false),
                    },
                    now,
                ),
                Err(e) => {
                    return errors::json_error(
                        StatusCode::BAD_REQUEST,
                        "invalid_body",
                        e.to_string(),
                    );
                }
            }
        };

        match result {
            Ok(()) => {
                self.services.todos().upsert(todo.clone());
                (StatusCode::OK, Json(dto::todo_to_json(todo))).into_response()
            }
            Err(e) => errors::domain_error_to_response(e),
        }
    }

    fn delete(&self, id: &str) -> Response {
        let id = match Self::parse_id(id) {
            Ok(id) => id,
            Err(response) => return response,
        };

        match self.services.todos().remove(id) {
            Some(_) => StatusCode::NO_CONTENT.into_response(),
            None => errors::not_found("todo not found"),
        }
    }
}
