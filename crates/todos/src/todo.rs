use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::{DomainError, DomainResult, Entity, TodoId};

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Todo {
    type Id = TodoId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: create a todo (also the full-replacement payload for updates).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl NewTodo {
    fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        Ok(())
    }

    /// Materialize the command into a record.
    pub fn into_todo(self, id: TodoId, now: DateTime<Utc>) -> DomainResult<Todo> {
        self.validate()?;
        Ok(Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Command: partially update a todo. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl Todo {
    /// Full replacement: every field takes the new value (absent optional
    /// fields were already defaulted by the caller). Identity and creation
    /// time are preserved.
    pub fn replace(&mut self, new: NewTodo, now: DateTime<Utc>) -> DomainResult<()> {
        new.validate()?;
        self.title = new.title;
        self.description = new.description;
        self.completed = new.completed;
        self.updated_at = now;
        Ok(())
    }

    /// Sparse update: only supplied fields change. A supplied title must
    /// still be non-blank.
    pub fn apply_patch(&mut self, patch: TodoPatch, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title cannot be empty"));
            }
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
        Ok(())
    }
}
