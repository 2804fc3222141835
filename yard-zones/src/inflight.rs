//! In-flight move tracking
//!
//! At most one reclassification per zone id may be outstanding; a second
//! attempt is rejected until the guard of the first is dropped.

use dashmap::DashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight {
    ids: Arc<DashSet<String>>,
}

impl InFlight {
    /// Claim `id`; `None` when a move of the same zone is already running
    pub(crate) fn try_begin(&self, id: &str) -> Option<InFlightGuard> {
        if self.ids.insert(id.to_string()) {
            Some(InFlightGuard {
                ids: self.ids.clone(),
                id: id.to_string(),
            })
        } else {
            None
        }
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Releases the zone id on drop, whatever the move's outcome
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    ids: Arc<DashSet<String>>,
    id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids.remove(&self.id);
    }
}
