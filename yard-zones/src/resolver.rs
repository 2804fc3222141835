//! Distinguished zone type lookup

use shared::ZoneType;

/// Name of the zone type this crate manages
pub const YARD_MOVE_ZONES: &str = "Yard Move Zones";

/// Id of the first zone type whose name is exactly `name` (case-sensitive)
pub fn resolve_zone_type<'a>(zone_types: &'a [ZoneType], name: &str) -> Option<&'a str> {
    zone_types
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.id.as_str())
}

/// Id of the "Yard Move Zones" zone type, or `None` when the database has none
pub fn resolve_yard_move_type(zone_types: &[ZoneType]) -> Option<&str> {
    resolve_zone_type(zone_types, YARD_MOVE_ZONES)
}
