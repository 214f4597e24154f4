//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `sidebar`) and the backend handle lives
//! in `backend`, so components depend on small focused models.

pub mod auth;
pub mod backend;
pub mod sidebar;
