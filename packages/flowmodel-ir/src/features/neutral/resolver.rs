//! Neutral model classification and exclusivity
//!
//! `classify` turns "no summary observed" into a `NeutralRecord`. The
//! registry side enforces that a subject ingested as flowing is never also
//! ingested as neutral (and vice versa). Subjects are compared on their exact
//! key, so `p;T;true;m;()` and `p;T;false;m;()` conflict.

use crate::features::flow_model::{
    MemberKey, ModelRecord, NeutralRecord, Provenance, ValidationError,
};
use crate::features::observation::{Observation, ObservationEntry};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Registration {
    Flowing,
    Neutral(NeutralRecord),
}

#[derive(Debug, Default)]
pub struct NeutralModelResolver {
    provenance: Option<Provenance>,
    registry: DashMap<MemberKey, Registration>,
}

impl NeutralModelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provenance stamped on neutrals produced by `classify`
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Neutral record for `key` when nothing flows through it
    pub fn classify(&self, key: &MemberKey, has_any_record: bool) -> Option<NeutralRecord> {
        if has_any_record {
            return None;
        }
        let record = NeutralRecord::summary(key.exact());
        Some(match &self.provenance {
            Some(provenance) => record.with_provenance(provenance.clone()),
            None => record,
        })
    }

    /// Classify one implementer's observation on the implementer's own member.
    ///
    /// Declared neutrals are returned as declared.
    pub fn classify_observation(&self, entry: &ObservationEntry) -> Option<NeutralRecord> {
        match entry.observation() {
            Observation::Neutral(record) => {
                Some(record.clone()).filter(NeutralRecord::is_flow_neutral)
            }
            Observation::Flows(records) => {
                let implementer = entry.interface_key().on_type(entry.implementing_type());
                self.classify(&implementer, !records.is_empty())
            }
        }
    }

    /// Register an ingested record, rejecting a summary/neutral mix for one subject.
    ///
    /// Endpoint records and source/sink neutrals are not flow models and are
    /// accepted without bookkeeping.
    pub fn register(&self, record: &ModelRecord) -> Result<(), ValidationError> {
        let (subject, incoming) = match record {
            ModelRecord::Summary(summary) => (summary.subject.exact(), Registration::Flowing),
            ModelRecord::Neutral(neutral) if neutral.is_flow_neutral() => {
                (neutral.subject.exact(), Registration::Neutral(neutral.clone()))
            }
            _ => return Ok(()),
        };

        match self.registry.entry(subject) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
                Ok(())
            }
            Entry::Occupied(slot) => match (slot.get(), &incoming) {
                (Registration::Flowing, Registration::Flowing)
                | (Registration::Neutral(_), Registration::Neutral(_)) => Ok(()),
                (existing, _) => {
                    let existing = match existing {
                        Registration::Flowing => "flowing",
                        Registration::Neutral(_) => "neutral",
                    };
                    tracing::debug!(subject = %slot.key(), existing, "neutral/summary conflict");
                    Err(ValidationError::NeutralConflict {
                        subject: slot.key().to_string(),
                        existing,
                    })
                }
            },
        }
    }

    pub fn is_neutral(&self, key: &MemberKey) -> bool {
        matches!(
            self.registry.get(&key.exact()).as_deref(),
            Some(Registration::Neutral(_))
        )
    }

    /// Registered flow-free neutrals, sorted
    pub fn neutrals(&self) -> BTreeSet<NeutralRecord> {
        self.registry
            .iter()
            .filter_map(|entry| match entry.value() {
                Registration::Neutral(record) => Some(record.clone()),
                Registration::Flowing => None,
            })
            .collect()
    }
}
