//! Domain types for the todo service.
//!
//! # Design
//! `Todo` doubles as the row type (`sqlx::FromRow`) and the JSON response
//! body, so column names and JSON field names are the same snake_case
//! identifiers. Request payloads are separate types that carry only the
//! client-writable fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request payload for replacing the title and description of a todo.
/// `completed` is not writable here; use the complete/uncomplete routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl UpdateTodo {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Todo {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        Todo {
            id: 7,
            title: "Test".to_string(),
            description: String::new(),
            completed: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn todo_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["description"], "");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["updated_at"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn todo_timestamps_parse_back() {
        let todo = sample();
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
    }

    #[test]
    fn create_todo_description_is_optional() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"No description"}"#).unwrap();
        assert_eq!(input.title, "No description");
        assert_eq!(input.description(), "");

        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"Null description","description":null}"#).unwrap();
        assert_eq!(input.description(), "");
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"description":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_todo_ignores_completed_field() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"Done","completed":true}"#).unwrap();
        assert_eq!(input.title, "Done");
    }

    #[test]
    fn empty_title_fails_validation() {
        let input = UpdateTodo {
            title: String::new(),
            description: None,
        };
        assert_eq!(input.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn whitespace_title_is_not_empty() {
        let input = CreateTodo {
            title: "   ".to_string(),
            description: None,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn non_empty_title_passes_validation() {
        let input = CreateTodo {
            title: "Buy milk".to_string(),
            description: Some("2 litres".to_string()),
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.description(), "2 litres");
    }
}
