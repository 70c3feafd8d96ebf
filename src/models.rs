//! Frontend Models
//!
//! Data structures matching the `/todos` resource of the data server.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Server-assigned identifier.
///
/// The server may hand back either a number or a string, so equality and
/// hashing go through the canonical string form: `1 == "1"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Num(serde_json::Number),
    Text(String),
}

impl TodoId {
    pub fn num(n: i64) -> Self {
        TodoId::Num(n.into())
    }

    pub fn canonical(&self) -> String {
        match self {
            TodoId::Num(n) => n.to_string(),
            TodoId::Text(s) => s.trim().to_string(),
        }
    }
}

impl PartialEq for TodoId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TodoId::Num(a), TodoId::Num(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for TodoId {}

impl Hash for TodoId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<i64> for TodoId {
    fn from(n: i64) -> Self {
        TodoId::num(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

/// Todo item (matches server)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Body of a create call. Ids are never fabricated client-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTodo<'a> {
    pub title: &'a str,
    pub completed: bool,
}

impl<'a> NewTodo<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title, completed: false }
    }
}

/// Partial update. Only `Some` fields go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn new(title: Option<String>, completed: Option<bool>) -> Self {
        Self { title, completed }
    }

    pub fn completed(completed: bool) -> Self {
        Self { title: None, completed: Some(completed) }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Trim and reject blank titles.
pub fn validate_title(title: &str) -> Result<String, TodoError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}
