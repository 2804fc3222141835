//! Render model
//!
//! Everything a front end needs to draw both lists, taken under one read
//! lock so the two lists are always mutually consistent.

use crate::classifier::ClassifierState;
use crate::filter::filter_zones;
use crate::partition::ZoneList;
use crate::stats::ZoneStats;
use crate::ZoneClassifier;
use fleet_client::FleetApi;
use serde::Serialize;
use shared::{AlertSink, Zone};

/// One row of a zone list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneRow {
    pub id: String,
    pub name: String,
    pub zone_type_count: usize,
    pub point_count: usize,
    /// A move of this zone is still outstanding
    pub moving: bool,
}

impl ZoneRow {
    fn new(zone: &Zone, moving: bool) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            zone_type_count: zone.zone_types.len(),
            point_count: zone.points.len(),
            moving,
        }
    }
}

/// One list: its size, search term, and visible rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub list: ZoneList,
    pub title: &'static str,
    pub total: usize,
    pub search: String,
    pub rows: Vec<ZoneRow>,
}

/// Both lists plus header data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub yard_move_type: Option<String>,
    pub load_error: Option<String>,
    pub regular: ListSnapshot,
    pub yard_move: ListSnapshot,
    pub stats: ZoneStats,
}

impl<A: FleetApi, N: AlertSink> ZoneClassifier<A, N> {
    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.read();
        let list = |which: ZoneList| list_snapshot(&state, which, |id| self.in_flight.contains(id));
        BoardSnapshot {
            yard_move_type: state.yard_move_type.clone(),
            load_error: state.load_error.clone(),
            regular: list(ZoneList::Regular),
            yard_move: list(ZoneList::YardMove),
            stats: ZoneStats::from_state(&state),
        }
    }
}

fn list_snapshot(
    state: &ClassifierState,
    which: ZoneList,
    moving: impl Fn(&str) -> bool,
) -> ListSnapshot {
    let rows = filter_zones(state.partition.list(which), state.search(which))
        .iter()
        .map(|zone| ZoneRow::new(zone, moving(&zone.id)))
        .collect();
    ListSnapshot {
        list: which,
        title: which.title(),
        total: state.partition.list(which).len(),
        search: state.search(which).to_string(),
        rows,
    }
}
