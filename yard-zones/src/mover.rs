//! Zone Mover - reclassify one zone, remote first
//!
//! 1. re-fetch the zone so the update carries the current version token
//! 2. add or remove the yard-move type reference (idempotent)
//! 3. submit the full record
//! 4. only after the update succeeded, move the local copy to the end of
//!    the destination list and give it the submitted zone types
//!
//! A failure in 1-3 leaves local state untouched.

use crate::{MoveError, ZoneClassifier, ZoneList};
use fleet_client::FleetApi;
use serde::Serialize;
use shared::{AlertSink, Zone, ZoneTypeRef};

/// A completed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub zone_id: String,
    pub zone_name: String,
    pub from: ZoneList,
    pub to: ZoneList,
    /// Zone type references now stored for the zone
    pub zone_types: Vec<ZoneTypeRef>,
}

/// Zone type references after moving a zone into `to`.
///
/// Adding keeps existing references and appends the yard-move type only if
/// absent; removing drops every reference to it.
pub fn edit_zone_types(
    current: &[ZoneTypeRef],
    yard_move_type: &str,
    to: ZoneList,
) -> Vec<ZoneTypeRef> {
    match to {
        ZoneList::YardMove => {
            let mut types = current.to_vec();
            if !types.iter().any(|t| t.id() == yard_move_type) {
                types.push(ZoneTypeRef::custom(yard_move_type));
            }
            types
        }
        ZoneList::Regular => current
            .iter()
            .filter(|t| t.id() != yard_move_type)
            .cloned()
            .collect(),
    }
}

impl<A: FleetApi, N: AlertSink> ZoneClassifier<A, N> {
    /// Move zone `zone_id` into list `to`, reporting the result as an alert
    pub async fn move_zone(&self, zone_id: &str, to: ZoneList) -> Result<MoveOutcome, MoveError> {
        match self.try_move(zone_id, to).await {
            Ok(outcome) => {
                tracing::info!(
                    zone_id = %outcome.zone_id,
                    from = %outcome.from,
                    to = %outcome.to,
                    "Zone reclassified"
                );
                self.alerts.success(match to {
                    ZoneList::YardMove => format!("{} added to Yard Move Zones", outcome.zone_name),
                    ZoneList::Regular => {
                        format!("{} removed from Yard Move Zones", outcome.zone_name)
                    }
                });
                Ok(outcome)
            }
            Err(err) => {
                match &err {
                    MoveError::AlreadyInList { .. } | MoveError::UnknownZone(_) => {
                        tracing::debug!(zone_id, error = %err, "Move ignored");
                    }
                    MoveError::CategoryMissing | MoveError::InFlight { .. } => {
                        tracing::warn!(zone_id, error = %err, "Move rejected");
                        self.alerts.warning(err.to_string());
                    }
                    _ => {
                        tracing::error!(zone_id, error = %err, "Zone move failed");
                        self.alerts.error(err.to_string());
                    }
                }
                Err(err)
            }
        }
    }

    /// Add a regular zone to "Yard Move Zones"
    pub async fn add_to_yard_move(&self, zone_id: &str) -> Result<MoveOutcome, MoveError> {
        self.move_zone(zone_id, ZoneList::YardMove).await
    }

    /// Return a yard-move zone to the regular list
    pub async fn remove_from_yard_move(&self, zone_id: &str) -> Result<MoveOutcome, MoveError> {
        self.move_zone(zone_id, ZoneList::Regular).await
    }

    async fn try_move(&self, zone_id: &str, to: ZoneList) -> Result<MoveOutcome, MoveError> {
        // Preconditions, checked before any network call
        let (yard_move_type, from, zone_name) = {
            let state = self.state.read();
            let yard_move_type = state
                .yard_move_type
                .clone()
                .ok_or(MoveError::CategoryMissing)?;
            let (from, zone) = state
                .partition
                .get(zone_id)
                .ok_or_else(|| MoveError::UnknownZone(zone_id.to_string()))?;
            (yard_move_type, from, zone.name.clone())
        };
        if from == to {
            return Err(MoveError::AlreadyInList {
                zone_name,
                list: to,
            });
        }
        let _guard = self
            .in_flight
            .try_begin(zone_id)
            .ok_or_else(|| MoveError::InFlight {
                zone_name: zone_name.clone(),
            })?;

        let current: Zone = self
            .api
            .get_by_id::<Zone>(zone_id)
            .await
            .map_err(|source| MoveError::Fetch {
                zone_name: zone_name.clone(),
                source,
            })?
            .ok_or_else(|| MoveError::Vanished {
                zone_name: zone_name.clone(),
            })?;

        let zone_types = edit_zone_types(&current.zone_types, &yard_move_type, to);
        let updated = Zone {
            zone_types: zone_types.clone(),
            ..current
        };

        self.api
            .set(&updated)
            .await
            .map_err(|source| MoveError::Update {
                zone_name: zone_name.clone(),
                source,
            })?;

        let relocated = {
            let mut state = self.state.write();
            state.moves_applied += 1;
            state.partition.relocate(zone_id, from, to, zone_types.clone())
        };
        if !relocated {
            tracing::debug!(zone_id, "Moved zone is no longer loaded locally");
        }

        Ok(MoveOutcome {
            zone_id: zone_id.to_string(),
            zone_name,
            from,
            to,
            zone_types,
        })
    }
}
