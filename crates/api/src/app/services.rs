//! Infrastructure wiring: the stores behind the exposed resources.

use std::sync::Arc;

use taskhub_todos::{InMemoryTodoStore, TodoStore};

/// Shared application services handed to resource handlers.
#[derive(Clone)]
pub struct AppServices {
    todos: Arc<dyn TodoStore>,
}

impl AppServices {
    pub fn todos(&self) -> &dyn TodoStore {
        self.todos.as_ref()
    }
}

/// Build the default service wiring (in-memory store).
pub fn build_services() -> AppServices {
    AppServices {
        todos: Arc::new(InMemoryTodoStore::new()),
    }
}
