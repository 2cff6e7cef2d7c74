use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Filter inputs: site selector and payload range
// ---------------------------------------------------------------------------

/// Which launch site the user picked in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Interpret a dropdown value. `all_value` is the sentinel for every site.
    pub fn from_value(value: &str, all_value: &str) -> Self {
        if value == all_value {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    /// Whether a record's site passes this selector. No site validation:
    /// an unknown name simply matches nothing.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => f.write_str("all sites"),
            SiteSelector::Site(s) => f.write_str(s),
        }
    }
}

/// Payload bounds from the range slider. Both ends are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `low < mass < high`. An inverted or empty range contains nothing.
    pub fn contains(&self, mass: f64) -> bool {
        self.low < mass && mass < self.high
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Indices of records whose site passes `selector`, ignoring payload.
pub fn site_indices(dataset: &LaunchDataset, selector: &SiteSelector) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selector.matches(&rec.site))
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of records that pass both the site and payload filters,
/// in dataset order.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    selector: &SiteSelector,
    range: &PayloadRange,
) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selector.matches(&rec.site) && range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}
