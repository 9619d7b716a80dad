//! Unit roster - bedded patients for a single care unit
//!
//! Global invariants enforced:
//! - At most one record per bed
//! - Listing order is ascending bed number
//! - A failed upsert leaves the roster untouched
//!
//! The roster is an explicit session-owned store: created empty, discarded
//! with the session, never persisted and never a hidden singleton.

use crate::risk::{RiskBand, ScoreResult};
use crate::scales::SubScaleInputs;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of beds in the unit
pub const UNIT_CAPACITY: usize = 20;

/// One bedded patient with the score snapshotted at add-time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub bed: u8,
    pub initials: String,
    pub inputs: SubScaleInputs,
    pub score: f64,
    pub band: RiskBand,
    pub trigger: bool,
}

impl PatientRecord {
    /// Build a record from raw inputs and their scoring outcome
    pub fn new(bed: u8, initials: &str, inputs: SubScaleInputs, result: ScoreResult) -> Self {
        PatientRecord {
            bed,
            initials: initials.trim().to_uppercase(),
            inputs,
            score: result.score,
            band: result.band,
            trigger: result.trigger,
        }
    }
}

/// In-memory roster keyed by bed number
#[derive(Debug, Clone, Default)]
pub struct Roster {
    beds: BTreeMap<u8, PatientRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Insert or replace the record at its bed.
    ///
    /// Initials are trimmed and uppercased before storage; an upsert with
    /// blank initials fails without touching the roster.
    pub fn upsert(&mut self, mut record: PatientRecord) -> Result<()> {
        record.initials = record.initials.trim().to_uppercase();
        if record.initials.is_empty() {
            anyhow::bail!("patient initials must not be empty");
        }
        self.beds.insert(record.bed, record);
        Ok(())
    }

    /// Remove the record at a bed, reporting whether a removal occurred.
    ///
    /// Removing an empty bed is a no-op, not an error.
    pub fn remove_bed(&mut self, bed: u8) -> bool {
        self.beds.remove(&bed).is_some()
    }

    /// Empty the roster unconditionally
    pub fn clear(&mut self) {
        self.beds.clear();
    }

    /// All records in ascending bed order
    pub fn list(&self) -> impl Iterator<Item = &PatientRecord> {
        self.beds.values()
    }

    pub fn get(&self, bed: u8) -> Option<&PatientRecord> {
        self.beds.get(&bed)
    }

    pub fn len(&self) -> usize {
        self.beds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beds.is_empty()
    }
}
