//! Best-effort conversion event tracking.
//!
//! Events are attributed to the signed-in professor's profile. Without a
//! resolved profile id nothing is written. Insert failures are logged and
//! dropped; the caller is never blocked on or told about them.

#[cfg(test)]
#[path = "conversion_metrics_test.rs"]
mod conversion_metrics_test;

use std::rc::Rc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::backend::Backend;
use crate::net::types::{ConversionEventType, ConversionMetric, EventData};
use crate::state::auth::AuthState;

/// Writes conversion events for one professor.
pub struct ConversionTracker {
    backend: Rc<dyn Backend>,
    professor_id: Option<String>,
}

impl ConversionTracker {
    /// An empty `professor_id` is treated as absent.
    pub fn new(backend: Rc<dyn Backend>, professor_id: Option<String>) -> Self {
        Self { backend, professor_id: professor_id.filter(|id| !id.is_empty()) }
    }

    #[must_use]
    pub fn professor_id(&self) -> Option<&str> {
        self.professor_id.as_deref()
    }

    /// Append one event row. A no-op without a professor id.
    pub async fn track_event(&self, event_type: ConversionEventType, event_data: Option<EventData>) {
        let Some(professor_id) = self.professor_id.clone() else {
            return;
        };
        let metric = ConversionMetric { professor_id, event_type, event_data: event_data.unwrap_or_default() };
        if let Err(e) = api::insert_conversion_metric(self.backend.as_ref(), &metric).await {
            leptos::logging::error!("conversion metrics: dropped {event_type:?} for {}: {e}", metric.professor_id);
        }
    }
}

/// Handle returned by [`use_conversion_metrics`].
#[derive(Clone, Copy)]
pub struct ConversionMetrics {
    auth: RwSignal<AuthState>,
    #[cfg(feature = "hydrate")]
    backend: Option<crate::state::backend::BackendContext>,
}

impl ConversionMetrics {
    /// Record `event_type` in the background and return immediately.
    pub fn track_event(&self, event_type: ConversionEventType, event_data: Option<EventData>) {
        let professor_id = self.auth.with_untracked(AuthState::profile_id);
        if professor_id.is_none() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let Some(backend) = self.backend.and_then(|ctx| ctx.try_get_value()) else {
                leptos::logging::warn!("conversion metrics: backend context missing");
                return;
            };
            let tracker = ConversionTracker::new(backend, professor_id);
            leptos::task::spawn_local(async move {
                tracker.track_event(event_type, event_data).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (event_type, event_data);
        }
    }
}

/// Event tracker bound to the current auth context.
pub fn use_conversion_metrics() -> ConversionMetrics {
    let auth = expect_context::<RwSignal<AuthState>>();
    ConversionMetrics {
        auth,
        #[cfg(feature = "hydrate")]
        backend: use_context::<crate::state::backend::BackendContext>(),
    }
}
