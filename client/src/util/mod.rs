//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so both stay testable outside the browser.

pub mod auth;
pub mod format;
pub mod storage;
