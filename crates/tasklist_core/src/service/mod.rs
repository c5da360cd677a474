//! Core use-case services.
//!
//! # Responsibility
//! - Own the session's in-memory task list and its mutation rules.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_list_service;
