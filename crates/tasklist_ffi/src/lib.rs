//! Flutter-facing bridge over `tasklist_core`.

pub mod api;
