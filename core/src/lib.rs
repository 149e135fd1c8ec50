//! Data model and SQLite store for the todo service.
//!
//! # Overview
//! `TodoStore` owns the single `todos` table and exposes create, read,
//! update, delete and toggle operations. Each call is its own atomic unit;
//! there are no multi-operation transactions.
//!
//! # Design
//! - `TodoStore` is a cloneable handle over a connection pool, meant to be
//!   injected into whatever serves requests.
//! - Missing records are reported as `StoreError::NotFound`, except by
//!   `delete`, which is idempotent.
//! - Request payloads validate themselves; the store does not re-check
//!   titles beyond the schema's `CHECK` constraint.

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError, ValidationError};
pub use store::TodoStore;
pub use types::{CreateTodo, Todo, UpdateTodo};
