//! Networking modules for the hosted auth + storage backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` defines the collaborator seam, `supabase` implements it over
//! HTTP, `api` holds typed queries, and `types` defines the row schema.

pub mod api;
pub mod backend;
#[cfg(test)]
pub(crate) mod backend_mock;
pub mod config;
pub mod grant;
pub mod supabase;
pub mod types;
