//! Core library for the task management service
//!
//! This crate contains the business logic, including:
//! - Task model and store gateway
//! - Task lifecycle service
//! - Request/response mapping

pub mod error;
pub mod task;

pub use error::{StoreError, TaskError};
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
