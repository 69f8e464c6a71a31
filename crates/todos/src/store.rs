//! Storage seam for todo records.

use std::collections::BTreeMap;
use std::sync::RwLock;

use taskhub_core::TodoId;

use crate::todo::Todo;

/// Key/value storage abstraction behind the todos collection.
///
/// Implementations must be safe to share across request handlers; all
/// methods take `&self`.
pub trait TodoStore: Send + Sync {
    fn get(&self, id: TodoId) -> Option<Todo>;
    fn upsert(&self, todo: Todo);
    /// All records, in id order.
    fn list(&self) -> Vec<Todo>;
    /// Remove a record, returning it if it existed.
    fn remove(&self, id: TodoId) -> Option<Todo>;
}

/// In-memory store for dev/test deployments.
///
/// Keys are UUIDv7, so the ordered map keeps listings in id (creation-time)
/// order without a secondary index.
#[derive(Debug)]
pub struct InMemoryTodoStore {
    inner: RwLock<BTreeMap<TodoId, Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for InMemoryTodoStore {
    fn get(&self, id: TodoId) -> Option<Todo> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn upsert(&self, todo: Todo) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(todo.id, todo);
        }
    }

    fn list(&self) -> Vec<Todo> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn remove(&self, id: TodoId) -> Option<Todo> {
        let mut map = self.inner.write().ok()?;
        map.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::NewTodo;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_todo(title: &str) -> Todo {
        make_todo_with_id(title, TodoId::new())
    }

    fn make_todo_with_id(title: &str, id: TodoId) -> Todo {
        NewTodo {
            title: title.to_string(),
            ..NewTodo::default()
        }
        .into_todo(id, Utc::now())
        .unwrap()
    }

    #[test]
    fn upsert_then_get_roundtrips() {
        let store = InMemoryTodoStore::new();
        let todo = make_todo("buy milk");
        store.upsert(todo.clone());

        assert_eq!(store.get(todo.id), Some(todo));
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = InMemoryTodoStore::new();
        assert_eq!(store.get(TodoId::new()), None);
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let store = InMemoryTodoStore::new();
        let mut todo = make_todo("buy milk");
        store.upsert(todo.clone());

        todo.completed = true;
        store.upsert(todo.clone());

        assert_eq!(store.list().len(), 1);
        assert!(store.get(todo.id).unwrap().completed);
    }

    #[test]
    fn list_follows_id_order() {
        let store = InMemoryTodoStore::new();
        // Explicit ids: `TodoId::new()` calls within the same millisecond
        // are not ordered.
        let first = make_todo_with_id("first", TodoId::from_uuid(Uuid::from_u128(1)));
        let second = make_todo_with_id("second", TodoId::from_uuid(Uuid::from_u128(2)));
        let third = make_todo_with_id("third", TodoId::from_uuid(Uuid::from_u128(3)));

        // Insert out of order; listing follows id order, not insert order.
        store.upsert(second.clone());
        store.upsert(third.clone());
        store.upsert(first.clone());

        let titles: Vec<_> = store.list().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn remove_returns_record_and_deletes_it() {
        let store = InMemoryTodoStore::new();
        let todo = make_todo("buy milk");
        store.upsert(todo.clone());

        assert_eq!(store.remove(todo.id), Some(todo.clone()));
        assert_eq!(store.remove(todo.id), None);
        assert!(store.list().is_empty());
    }
}
