//! `taskhub-todos` — the todos collection: records, commands, storage.

pub mod store;
pub mod todo;

pub use store::{InMemoryTodoStore, TodoStore};
pub use todo::{NewTodo, Todo, TodoPatch};
