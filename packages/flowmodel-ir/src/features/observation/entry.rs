//! Per-implementation observations
//!
//! An `ObservationEntry` records what one concrete implementation of an
//! interface member was observed to do. Entries are immutable once built.

use crate::features::flow_model::{MemberKey, NeutralRecord, SummaryRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What an implementation does for the member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observation {
    /// Zero or more flow edges; an empty set is fully neutral
    Flows(BTreeSet<SummaryRecord>),
    Neutral(NeutralRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationEntry {
    interface_key: MemberKey,
    implementing_type: String,
    observation: Observation,
}

impl ObservationEntry {
    pub fn flows<I>(
        interface_key: MemberKey,
        implementing_type: impl Into<String>,
        records: I,
    ) -> Self
    where
        I: IntoIterator<Item = SummaryRecord>,
    {
        Self {
            interface_key,
            implementing_type: implementing_type.into(),
            observation: Observation::Flows(records.into_iter().collect()),
        }
    }

    pub fn neutral(
        interface_key: MemberKey,
        implementing_type: impl Into<String>,
        record: NeutralRecord,
    ) -> Self {
        Self {
            interface_key,
            implementing_type: implementing_type.into(),
            observation: Observation::Neutral(record),
        }
    }

    pub fn interface_key(&self) -> &MemberKey {
        &self.interface_key
    }

    pub fn implementing_type(&self) -> &str {
        &self.implementing_type
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Summary records, empty for neutral observations
    pub fn records(&self) -> impl Iterator<Item = &SummaryRecord> {
        let records = match &self.observation {
            Observation::Flows(records) => Some(records),
            Observation::Neutral(_) => None,
        };
        records.into_iter().flatten()
    }

    /// Declared neutral, or observed with no flow at all
    pub fn is_neutral(&self) -> bool {
        match &self.observation {
            Observation::Flows(records) => records.is_empty(),
            Observation::Neutral(_) => true,
        }
    }

    pub fn is_declared_neutral(&self) -> bool {
        matches!(self.observation, Observation::Neutral(_))
    }
}
