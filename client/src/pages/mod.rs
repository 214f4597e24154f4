//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates chrome to
//! `components::layout`.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod module;
