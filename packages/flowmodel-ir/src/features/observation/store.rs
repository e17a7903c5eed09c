//! Observation Store with DashMap
//!
//! Lock-free concurrent store of per-implementation observations, keyed by
//! interface member and then by implementing type. Collection tasks for
//! different `(interface, implementer)` pairs write concurrently; entries are
//! shared as `Arc<ObservationEntry>` and never mutated after insertion.

use super::entry::{Observation, ObservationEntry};
use super::error::StoreError;
use crate::config::IngestConfig;
use crate::features::access_path::AccessPath;
use crate::features::flow_model::{MemberKey, RecordValidator};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Barrier state for one interface member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStatus {
    pub expected: usize,
    pub observed: usize,
    /// Expected implementers with no observation yet
    pub missing: BTreeSet<String>,
}

impl CollectionStatus {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Observations for one analysis run
#[derive(Debug)]
pub struct ObservationStore {
    /// interface member → implementing type → entries (insertion order)
    entries: DashMap<MemberKey, BTreeMap<String, Vec<Arc<ObservationEntry>>>>,
    validator: RecordValidator,
}

impl Default for ObservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationStore {
    /// Store validating records with the balanced ingestion checks
    pub fn new() -> Self {
        Self::with_validator(RecordValidator::new(&IngestConfig::default()))
    }

    pub fn with_validator(validator: RecordValidator) -> Self {
        Self {
            entries: DashMap::new(),
            validator,
        }
    }

    /// Append an observation.
    ///
    /// Rejected when a record fails ingestion checks against the interface
    /// member, when an `(input, output)` edge repeats for the same
    /// implementer, when neutral and flowing observations would mix, when a
    /// record belongs to a different member, or for source/sink neutrals.
    /// A rejected entry leaves the store untouched.
    pub fn record(&self, entry: ObservationEntry) -> Result<(), StoreError> {
        let interface = entry.interface_key().clone();
        if let Observation::Neutral(neutral) = entry.observation() {
            if !neutral.is_flow_neutral() {
                return Err(StoreError::NotFlowNeutral {
                    interface: interface.to_string(),
                    implementing_type: entry.implementing_type().to_string(),
                    category: neutral.category.as_str(),
                });
            }
        }
        for record in entry.records() {
            if record.subject.name != interface.name {
                return Err(StoreError::SubjectMismatch {
                    interface: interface.to_string(),
                    record_member: record.subject.to_string(),
                });
            }
            self.validator
                .validate_summary_on(&interface, record)
                .map_err(|source| StoreError::Invalid {
                    interface: interface.to_string(),
                    implementing_type: entry.implementing_type().to_string(),
                    source,
                })?;
        }

        let implementing_type = entry.implementing_type().to_string();
        match self.entries.entry(interface) {
            Entry::Occupied(mut slot) => {
                let existing = slot
                    .get()
                    .get(&implementing_type)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                admit(existing, &entry)?;
                slot.get_mut()
                    .entry(implementing_type)
                    .or_default()
                    .push(Arc::new(entry));
            }
            Entry::Vacant(slot) => {
                admit(&[], &entry)?;
                slot.insert(BTreeMap::from([(implementing_type, vec![Arc::new(entry)])]));
            }
        }
        Ok(())
    }

    /// Every observation for an interface member, ordered by implementing type.
    ///
    /// Empty when no implementation has been observed.
    pub fn query_by_interface(&self, interface: &MemberKey) -> Vec<Arc<ObservationEntry>> {
        self.entries
            .get(interface)
            .map(|slot| slot.values().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Observations of one implementer
    pub fn observations_for(
        &self,
        interface: &MemberKey,
        implementing_type: &str,
    ) -> Vec<Arc<ObservationEntry>> {
        self.entries
            .get(interface)
            .and_then(|slot| slot.get(implementing_type).cloned())
            .unwrap_or_default()
    }

    /// Implementing types with at least one observation
    pub fn observed_implementers(&self, interface: &MemberKey) -> BTreeSet<String> {
        self.entries
            .get(interface)
            .map(|slot| slot.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Compare observed implementers against the expected closed set
    pub fn collection_status(
        &self,
        interface: &MemberKey,
        expected: &BTreeSet<String>,
    ) -> CollectionStatus {
        let observed = self.observed_implementers(interface);
        let missing: BTreeSet<String> = expected.difference(&observed).cloned().collect();
        CollectionStatus {
            expected: expected.len(),
            observed: expected.len() - missing.len(),
            missing,
        }
    }

    /// Every expected implementer has reported
    pub fn is_collected(&self, interface: &MemberKey, expected: &BTreeSet<String>) -> bool {
        self.collection_status(interface, expected).is_complete()
    }

    /// Interface members with any observation, sorted
    pub fn interfaces(&self) -> BTreeSet<MemberKey> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|slot| slot.values().map(Vec::len).sum::<usize>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks `entry` against what its implementer already reported
fn admit(existing: &[Arc<ObservationEntry>], entry: &ObservationEntry) -> Result<(), StoreError> {
    check_neutral_exclusive(existing, entry)?;

    let mut seen: BTreeSet<(&AccessPath, &AccessPath)> = existing
        .iter()
        .flat_map(|e| e.records())
        .map(|r| r.edge())
        .collect();
    for record in entry.records() {
        if !seen.insert(record.edge()) {
            tracing::debug!(
                interface = %entry.interface_key(),
                implementer = entry.implementing_type(),
                "duplicate edge rejected"
            );
            return Err(StoreError::DuplicateEdge {
                interface: entry.interface_key().to_string(),
                implementing_type: entry.implementing_type().to_string(),
                input: record.input.to_string(),
                output: record.output.to_string(),
            });
        }
    }
    Ok(())
}

fn check_neutral_exclusive(
    existing: &[Arc<ObservationEntry>],
    entry: &ObservationEntry,
) -> Result<(), StoreError> {
    let conflict = || StoreError::NeutralConflict {
        interface: entry.interface_key().to_string(),
        implementing_type: entry.implementing_type().to_string(),
    };

    let has_flows = existing.iter().any(|e| !e.is_neutral());
    let has_declared_neutral = existing.iter().any(|e| e.is_declared_neutral());

    match entry.observation() {
        Observation::Neutral(_) if has_flows || has_declared_neutral => Err(conflict()),
        Observation::Flows(records) if !records.is_empty() && has_declared_neutral => {
            Err(conflict())
        }
        _ => Ok(()),
    }
}
