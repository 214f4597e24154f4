//! Navigation sidebar chrome state.
//!
//! DESIGN
//! ======
//! Desktop and mobile presentations are tracked separately: on wide screens
//! the sidebar collapses in place, below the tablet breakpoint it opens as a
//! drawer over the content. Only the desktop preference is persisted.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use crate::util::storage;

/// Viewport width (px) below which the layout switches to the mobile drawer.
pub const TABLET_BREAKPOINT_PX: f64 = 768.0;

const STORAGE_KEY: &str = "tutordesk.sidebar.open";

/// Sidebar visibility state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidebarState {
    /// Desktop sidebar expanded (true) or collapsed to icons (false).
    pub open: bool,
    /// Mobile drawer shown.
    pub open_mobile: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { open: true, open_mobile: false }
    }
}

impl SidebarState {
    /// Restore the persisted desktop preference, defaulting to expanded.
    #[must_use]
    pub fn restore() -> Self {
        let open = storage::read_json::<bool>(STORAGE_KEY).unwrap_or(true);
        Self { open, ..Self::default() }
    }

    /// Toggle the presentation relevant for the current viewport.
    pub fn toggle(&mut self, is_mobile: bool) {
        if is_mobile {
            self.open_mobile = !self.open_mobile;
        } else {
            self.open = !self.open;
            storage::write_json(STORAGE_KEY, &self.open);
        }
    }

    /// Close the mobile drawer (after navigation or a backdrop tap).
    pub fn close_mobile(&mut self) {
        self.open_mobile = false;
    }
}

/// Whether `width_px` falls below the tablet breakpoint.
#[must_use]
pub fn is_mobile_width(width_px: f64) -> bool {
    width_px < TABLET_BREAKPOINT_PX
}

/// Current viewport classification. Always desktop outside the browser.
#[must_use]
pub fn viewport_is_mobile() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .is_some_and(is_mobile_width)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}
