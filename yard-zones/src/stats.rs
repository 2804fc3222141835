//! Counts shown in the header

use crate::classifier::ClassifierState;
use crate::filter::filter_zones;
use crate::partition::{ZoneList, ZonePartition};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneStats {
    pub total: usize,
    pub regular: usize,
    pub yard_move: usize,
    pub visible_regular: usize,
    pub visible_yard_move: usize,
}

impl ZoneStats {
    pub fn from_partition(
        partition: &ZonePartition,
        regular_search: &str,
        yard_move_search: &str,
    ) -> Self {
        let regular = partition.list(ZoneList::Regular);
        let yard_move = partition.list(ZoneList::YardMove);
        Self {
            total: partition.len(),
            regular: regular.len(),
            yard_move: yard_move.len(),
            visible_regular: filter_zones(regular, regular_search).len(),
            visible_yard_move: filter_zones(yard_move, yard_move_search).len(),
        }
    }

    pub(crate) fn from_state(state: &ClassifierState) -> Self {
        Self::from_partition(
            &state.partition,
            &state.regular_search,
            &state.yard_move_search,
        )
    }

    /// Share of zones in the yard-move list, in percent
    pub fn yard_move_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.yard_move as f64 * 100.0 / self.total as f64
        }
    }
}
