//! Flow shape: the `(input, output, kind)` triple compared across implementers

use crate::features::access_path::AccessPath;
use crate::features::flow_model::{FlowKind, MemberKey, Provenance, SummaryRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Owner placeholder used when grouping shapes by field name only
pub const ERASED_OWNER: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Shape {
    pub input: AccessPath,
    pub output: AccessPath,
    pub kind: FlowKind,
}

impl Shape {
    /// Shape of a record, with the receiver spelled `Argument[this]`
    pub fn of(record: &SummaryRecord) -> Self {
        Self {
            input: record.input.with_canonical_receiver(),
            output: record.output.with_canonical_receiver(),
            kind: record.kind,
        }
    }

    /// Same shape with synthetic field owners erased
    pub fn owner_erased(&self) -> Self {
        Self {
            input: self.input.with_erased_field_owners(ERASED_OWNER),
            output: self.output.with_erased_field_owners(ERASED_OWNER),
            kind: self.kind,
        }
    }

    /// Declaring types of every synthetic field in input or output
    pub fn field_owners(&self) -> BTreeSet<&str> {
        self.input
            .synthetic_fields()
            .chain(self.output.synthetic_fields())
            .map(|(owner, _)| owner)
            .collect()
    }

    pub fn to_summary(&self, subject: MemberKey, provenance: Provenance) -> SummaryRecord {
        SummaryRecord::new(
            subject,
            self.input.clone(),
            self.output.clone(),
            self.kind,
            provenance,
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.input, self.output, self.kind)
    }
}
