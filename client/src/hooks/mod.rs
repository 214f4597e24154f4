//! Reactive hooks over the backend.
//!
//! Each hook is a thin Leptos adapter around a plain core type that takes its
//! collaborators explicitly, so the cores run under native async tests.

pub mod conversion_metrics;
pub mod user_role;
