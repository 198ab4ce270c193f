//! Storage layer
//!
//! Repository types implementing the persistence collaborator contract the
//! core relies on. Backed by in-memory state; a database-backed deployment
//! replaces these behind the same method surface.

pub mod memory;

pub use memory::{GroupRepository, TaskRepository, TemplateRepository};
