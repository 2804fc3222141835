//! Regular / yard-move partition
//!
//! A zone is a yard-move zone iff its zone-type references contain the
//! resolved yard-move type id. Both lists keep the remote system's order.

use serde::{Deserialize, Serialize};
use shared::{Zone, ZoneTypeRef};

/// Which of the two lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneList {
    Regular,
    YardMove,
}

impl ZoneList {
    pub fn other(self) -> Self {
        match self {
            Self::Regular => Self::YardMove,
            Self::YardMove => Self::Regular,
        }
    }

    /// Heading shown above the list
    pub fn title(self) -> &'static str {
        match self {
            Self::Regular => "Regular Zones",
            Self::YardMove => "Yard Move Zones",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::YardMove => "yard-move",
        }
    }
}

impl std::fmt::Display for ZoneList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ZoneList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Self::Regular),
            "yard-move" | "yard" => Ok(Self::YardMove),
            other => Err(format!("unknown zone list: {other}")),
        }
    }
}

/// Membership test; with no yard-move type every zone is regular
pub fn is_yard_move(zone: &Zone, yard_move_type: Option<&str>) -> bool {
    yard_move_type.is_some_and(|id| zone.has_zone_type(id))
}

/// Two disjoint, order-preserving zone collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZonePartition {
    regular: Vec<Zone>,
    yard_move: Vec<Zone>,
}

impl ZonePartition {
    /// Stable partition of `zones`
    pub fn new(zones: impl IntoIterator<Item = Zone>, yard_move_type: Option<&str>) -> Self {
        let (yard_move, regular) = zones
            .into_iter()
            .partition(|zone| is_yard_move(zone, yard_move_type));
        Self { regular, yard_move }
    }

    pub fn list(&self, which: ZoneList) -> &[Zone] {
        match which {
            ZoneList::Regular => &self.regular,
            ZoneList::YardMove => &self.yard_move,
        }
    }

    fn list_mut(&mut self, which: ZoneList) -> &mut Vec<Zone> {
        match which {
            ZoneList::Regular => &mut self.regular,
            ZoneList::YardMove => &mut self.yard_move,
        }
    }

    pub fn regular(&self) -> &[Zone] {
        &self.regular
    }

    pub fn yard_move(&self) -> &[Zone] {
        &self.yard_move
    }

    /// Zone with `id` and the list holding it
    pub fn get(&self, id: &str) -> Option<(ZoneList, &Zone)> {
        [ZoneList::Regular, ZoneList::YardMove]
            .into_iter()
            .find_map(|which| {
                self.list(which)
                    .iter()
                    .find(|z| z.id == id)
                    .map(|z| (which, z))
            })
    }

    pub fn locate(&self, id: &str) -> Option<ZoneList> {
        self.get(id).map(|(which, _)| which)
    }

    /// Total zones across both lists
    pub fn len(&self) -> usize {
        self.regular.len() + self.yard_move.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every zone, regular first
    pub fn iter(&self) -> impl Iterator<Item = (ZoneList, &Zone)> {
        self.regular
            .iter()
            .map(|z| (ZoneList::Regular, z))
            .chain(self.yard_move.iter().map(|z| (ZoneList::YardMove, z)))
    }

    /// Move zone `id` from `from` to the end of `to`, replacing its zone types.
    ///
    /// When the zone is no longer in `from` (a refresh landed meanwhile) but
    /// is found in `to`, only its zone types are updated. Returns `false`
    /// when the zone is in neither list.
    pub(crate) fn relocate(
        &mut self,
        id: &str,
        from: ZoneList,
        to: ZoneList,
        zone_types: Vec<ZoneTypeRef>,
    ) -> bool {
        let source = self.list_mut(from);
        if let Some(pos) = source.iter().position(|z| z.id == id) {
            let mut zone = source.remove(pos);
            zone.zone_types = zone_types;
            self.list_mut(to).push(zone);
            return true;
        }
        if let Some(zone) = self.list_mut(to).iter_mut().find(|z| z.id == id) {
            zone.zone_types = zone_types;
            return true;
        }
        false
    }

    pub(crate) fn clear(&mut self) {
        self.regular.clear();
        self.yard_move.clear();
    }
}
