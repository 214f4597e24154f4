//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the application chrome and read shared state from
//! Leptos context providers.

pub mod app_sidebar;
pub mod header;
pub mod layout;
