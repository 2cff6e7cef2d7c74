use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Numeric class value used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    /// Pie slice label.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RecordError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            1 => Ok(Outcome::Success),
            0 => Ok(Outcome::Failure),
            other => Err(RecordError::InvalidClass(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row that violates the record invariants.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("outcome class must be 0 or 1, got {0}")]
    InvalidClass(i64),
    #[error("payload mass must be a non-negative number, got {0}")]
    InvalidPayload(f64),
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    /// Only used as the scatter colour key.
    pub booster_version: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    /// Build a record, rejecting negative or non-finite payloads.
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version: impl Into<String>,
        outcome: Outcome,
    ) -> Result<Self, RecordError> {
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload(payload_mass_kg));
        }
        Ok(LaunchRecord {
            site: site.into(),
            payload_mass_kg,
            booster_version: booster_version.into(),
            outcome,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct site names in order of first appearance.
    sites: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build the site index and payload bounds from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for rec in &records {
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
        }

        let (payload_min, payload_max) = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg))
            })
        };

        LaunchDataset {
            records,
            sites,
            payload_min,
            payload_max,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Smallest payload mass in the dataset (0 when empty).
    pub fn payload_min(&self) -> f64 {
        self.payload_min
    }

    /// Largest payload mass in the dataset (0 when empty).
    pub fn payload_max(&self) -> f64 {
        self.payload_max
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
