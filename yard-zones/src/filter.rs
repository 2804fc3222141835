//! Search views
//!
//! Case-insensitive substring match on a zone's name or id. Views borrow
//! from the underlying list and are only ever used for display.

use shared::Zone;

/// Filtered view of one list
#[derive(Debug, Clone, PartialEq)]
pub enum FilteredView<'a> {
    /// Empty search: the list itself
    All(&'a [Zone]),
    /// Zones matching the search, in list order
    Matches(Vec<&'a Zone>),
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::All(zones) => zones.len(),
            Self::Matches(zones) => zones.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the view is the unfiltered list
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::All(_))
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &'a Zone> + '_> {
        match self {
            Self::All(zones) => {
                let zones: &'a [Zone] = *zones;
                Box::new(zones.iter())
            }
            Self::Matches(zones) => Box::new(zones.iter().copied()),
        }
    }

    pub fn to_vec(&self) -> Vec<Zone> {
        self.iter().cloned().collect()
    }
}

/// Whether `zone` matches an already lower-cased search needle
pub fn matches_needle(zone: &Zone, needle: &str) -> bool {
    zone.name.to_lowercase().contains(needle) || zone.id.to_lowercase().contains(needle)
}

/// Filter `zones` by `term`; a blank term yields the list itself
pub fn filter_zones<'a>(zones: &'a [Zone], term: &str) -> FilteredView<'a> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return FilteredView::All(zones);
    }
    FilteredView::Matches(zones.iter().filter(|z| matches_needle(z, &needle)).collect())
}
