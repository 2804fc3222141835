//! Zone Classifier - session-owned zone state
//!
//! One `ZoneClassifier` lives for one activation of the view: constructed
//! and loaded on activation, refreshed on demand, dropped on navigation away.
//! All methods take `&self`; the state lock is never held across a network
//! call, so moves of different zones and refreshes can overlap.

use crate::filter::filter_zones;
use crate::inflight::InFlight;
use crate::partition::{ZoneList, ZonePartition};
use crate::resolver::resolve_yard_move_type;
use crate::stats::ZoneStats;
use crate::LoadError;
use fleet_client::FleetApi;
use parking_lot::RwLock;
use shared::{AlertSink, TracingAlerts, Zone, ZoneType};
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct ClassifierState {
    pub(crate) zone_types: Vec<ZoneType>,
    pub(crate) yard_move_type: Option<String>,
    pub(crate) partition: ZonePartition,
    pub(crate) regular_search: String,
    pub(crate) yard_move_search: String,
    pub(crate) load_error: Option<String>,
    /// Ticket of the load whose data is currently shown
    pub(crate) applied_load: u64,
    /// Moves applied locally so far; a load that saw fewer is stale
    pub(crate) moves_applied: u64,
}

impl ClassifierState {
    pub(crate) fn search(&self, list: ZoneList) -> &str {
        match list {
            ZoneList::Regular => &self.regular_search,
            ZoneList::YardMove => &self.yard_move_search,
        }
    }

    fn search_mut(&mut self, list: ZoneList) -> &mut String {
        match list {
            ZoneList::Regular => &mut self.regular_search,
            ZoneList::YardMove => &mut self.yard_move_search,
        }
    }

    pub(crate) fn visible(&self, list: ZoneList) -> Vec<Zone> {
        filter_zones(self.partition.list(list), self.search(list)).to_vec()
    }
}

/// Result of a load that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Data applied
    Loaded {
        zones: usize,
        yard_move_zones: usize,
        yard_move_type: Option<String>,
    },
    /// A newer load was issued while this one was in flight; its data was discarded
    Superseded,
}

// =============================================================================
// ZoneClassifier
// =============================================================================

/// Zone classifier for one session
pub struct ZoneClassifier<A, N = TracingAlerts> {
    pub(crate) api: A,
    pub(crate) alerts: N,
    pub(crate) state: RwLock<ClassifierState>,
    pub(crate) in_flight: InFlight,
    load_seq: AtomicU64,
}

impl<A, N> std::fmt::Debug for ZoneClassifier<A, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ZoneClassifier")
            .field("yard_move_type", &state.yard_move_type)
            .field("regular", &state.partition.regular().len())
            .field("yard_move", &state.partition.yard_move().len())
            .finish()
    }
}

impl<A: FleetApi, N: AlertSink> ZoneClassifier<A, N> {
    /// Create an empty classifier; nothing is fetched until [`refresh`](Self::refresh)
    pub fn new(api: A, alerts: N) -> Self {
        Self {
            api,
            alerts,
            state: RwLock::new(ClassifierState::default()),
            in_flight: InFlight::default(),
            load_seq: AtomicU64::new(0),
        }
    }

    /// Create and perform the initial load
    pub async fn activate(api: A, alerts: N) -> Result<Self, LoadError> {
        let classifier = Self::new(api, alerts);
        classifier.refresh().await?;
        Ok(classifier)
    }

    /// End of the session: all state is discarded
    pub fn teardown(self) {
        tracing::debug!(?self, "Zone classifier torn down");
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn alerts(&self) -> &N {
        &self.alerts
    }

    /// Fetch zones and zone types concurrently and rebuild the partition.
    ///
    /// Either fetch failing aborts the load: both lists are emptied and one
    /// error alert is raised. A load overtaken by a newer load, or by a move
    /// that completed while it was in flight, is discarded.
    pub async fn refresh(&self) -> Result<LoadOutcome, LoadError> {
        let ticket = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let moves_seen = self.state.read().moves_applied;
        tracing::debug!(ticket, "Loading zones");
        self.alerts.info("Loading zones...");

        let fetched = tokio::try_join!(
            self.api.get::<Zone>(None),
            self.api.get::<ZoneType>(None)
        );

        let mut state = self.state.write();
        let newer_load =
            ticket != self.load_seq.load(Ordering::SeqCst) || ticket < state.applied_load;
        // A move finished while this load was in flight; its data predates the move
        let newer_move = state.moves_applied != moves_seen;
        if newer_load || newer_move {
            tracing::debug!(ticket, newer_load, newer_move, "Discarding superseded zone load");
            return Ok(LoadOutcome::Superseded);
        }
        state.applied_load = ticket;

        let (zones, zone_types) = match fetched {
            Ok(data) => data,
            Err(err) => {
                state.partition.clear();
                state.load_error = Some(err.to_string());
                drop(state);
                tracing::error!(error = %err, "Zone load failed");
                self.alerts.error(format!("Error loading zones: {}", err));
                return Err(err.into());
            }
        };

        let yard_move_type = resolve_yard_move_type(&zone_types).map(str::to_string);
        state.partition = ZonePartition::new(zones, yard_move_type.as_deref());
        state.zone_types = zone_types;
        state.yard_move_type = yard_move_type.clone();
        state.load_error = None;

        let zones = state.partition.len();
        let yard_move_zones = state.partition.yard_move().len();
        drop(state);

        tracing::info!(zones, yard_move_zones, yard_move_type = ?yard_move_type, "Zones loaded");
        if yard_move_type.is_none() {
            self.alerts
                .warning("\"Yard Move Zones\" zone type not found; showing regular zones only");
        }
        self.alerts
            .success(format!("Successfully loaded {} zones", zones));

        let outcome = LoadOutcome::Loaded {
            zones,
            yard_move_zones,
            yard_move_type,
        };
        Ok(outcome)
    }

    // ========== Read access ==========

    /// Resolved "Yard Move Zones" type id
    pub fn yard_move_type(&self) -> Option<String> {
        self.state.read().yard_move_type.clone()
    }

    pub fn zone_types(&self) -> Vec<ZoneType> {
        self.state.read().zone_types.clone()
    }

    /// Copy of both unfiltered collections
    pub fn partition(&self) -> ZonePartition {
        self.state.read().partition.clone()
    }

    /// Unfiltered collection
    pub fn zones(&self, list: ZoneList) -> Vec<Zone> {
        self.state.read().partition.list(list).to_vec()
    }

    /// Filtered view of a collection under its current search term
    pub fn visible(&self, list: ZoneList) -> Vec<Zone> {
        self.state.read().visible(list)
    }

    /// Zone with `id` and the list holding it
    pub fn find(&self, id: &str) -> Option<(ZoneList, Zone)> {
        self.state
            .read()
            .partition
            .get(id)
            .map(|(list, zone)| (list, zone.clone()))
    }

    /// Message of the last failed load, if the last applied load failed
    pub fn load_error(&self) -> Option<String> {
        self.state.read().load_error.clone()
    }

    /// Whether a move of zone `id` is outstanding
    pub fn is_moving(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    pub fn stats(&self) -> ZoneStats {
        ZoneStats::from_state(&self.state.read())
    }

    // ========== Search ==========

    /// Apply a search term to one list immediately
    pub fn set_search(&self, list: ZoneList, term: impl Into<String>) {
        *self.state.write().search_mut(list) = term.into();
    }

    pub fn clear_search(&self, list: ZoneList) {
        self.state.write().search_mut(list).clear();
    }

    pub fn search_term(&self, list: ZoneList) -> String {
        self.state.read().search(list).to_string()
    }
}
