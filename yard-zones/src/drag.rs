//! Drag-and-drop reclassification
//!
//! ```text
//! Idle --drag_start--> Dragging --drag_enter(other list)--> Hover
//!                        ^  |                                 |
//!                        |  +--------- drop ------------------+
//!                        +--drag_leave--  |
//!                                         v
//!                   same list: Idle   other list: Committing --complete--> Idle
//! ```
//!
//! Hover is a visual affordance only. Committing always returns to Idle,
//! whether the move succeeded or not.

use crate::{MoveError, MoveOutcome, ZoneClassifier, ZoneList};
use fleet_client::FleetApi;
use shared::AlertSink;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub zone_id: String,
    pub zone_name: String,
    pub source: ZoneList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragPayload),
    Hover {
        payload: DragPayload,
        over: ZoneList,
    },
    Committing {
        payload: DragPayload,
        to: ZoneList,
    },
}

/// What a drop asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropDecision {
    /// Nothing to do (same list, or no drag in progress)
    Ignore,
    /// Move `zone_id` into `to`
    Commit { zone_id: String, to: ZoneList },
}

/// Result of [`DragController::drop_on`]
#[derive(Debug)]
pub enum DropOutcome {
    Ignored,
    Committed(Result<MoveOutcome, MoveError>),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Committed(Ok(_)))
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// List currently highlighted as a drop target
    pub fn hovered(&self) -> Option<ZoneList> {
        match &self.state {
            DragState::Hover { over, .. } => Some(*over),
            _ => None,
        }
    }

    /// Begin dragging; only accepted while idle
    pub fn drag_start(&mut self, payload: DragPayload) -> bool {
        if !self.is_idle() {
            tracing::debug!(state = ?self.state, "drag_start ignored");
            return false;
        }
        self.state = DragState::Dragging(payload);
        true
    }

    /// Begin dragging a loaded zone by id
    pub fn drag_start_zone<A: FleetApi, N: AlertSink>(
        &mut self,
        classifier: &ZoneClassifier<A, N>,
        zone_id: &str,
    ) -> bool {
        match classifier.find(zone_id) {
            Some((source, zone)) => self.drag_start(DragPayload {
                zone_id: zone.id,
                zone_name: zone.name,
                source,
            }),
            None => false,
        }
    }

    /// Pointer entered a list; only the other list is a valid target
    pub fn drag_enter(&mut self, over: ZoneList) {
        let payload = match &self.state {
            DragState::Dragging(p) | DragState::Hover { payload: p, .. } => p.clone(),
            _ => return,
        };
        self.state = if over == payload.source {
            DragState::Dragging(payload)
        } else {
            DragState::Hover { payload, over }
        };
    }

    /// Pointer left the highlighted list
    pub fn drag_leave(&mut self) {
        if let DragState::Hover { payload, .. } = &self.state {
            self.state = DragState::Dragging(payload.clone());
        }
    }

    /// Drag ended without a drop
    pub fn drag_end(&mut self) {
        if !matches!(self.state, DragState::Committing { .. }) {
            self.state = DragState::Idle;
        }
    }

    /// Drop onto `target`
    pub fn drop_at(&mut self, target: ZoneList) -> DropDecision {
        let payload = match std::mem::take(&mut self.state) {
            DragState::Dragging(p) | DragState::Hover { payload: p, .. } => p,
            other => {
                self.state = other;
                return DropDecision::Ignore;
            }
        };
        if payload.source == target {
            tracing::debug!(zone_id = %payload.zone_id, "Dropped onto its own list");
            return DropDecision::Ignore;
        }
        let zone_id = payload.zone_id.clone();
        self.state = DragState::Committing {
            payload,
            to: target,
        };
        DropDecision::Commit {
            zone_id,
            to: target,
        }
    }

    /// The commit finished, successfully or not
    pub fn complete(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop onto `target` and run the resulting move to completion
    pub async fn drop_on<A: FleetApi, N: AlertSink>(
        &mut self,
        target: ZoneList,
        classifier: &ZoneClassifier<A, N>,
    ) -> DropOutcome {
        match self.drop_at(target) {
            DropDecision::Ignore => DropOutcome::Ignored,
            DropDecision::Commit { zone_id, to } => {
                let result = classifier.move_zone(&zone_id, to).await;
                self.complete();
                DropOutcome::Committed(result)
            }
        }
    }
}
