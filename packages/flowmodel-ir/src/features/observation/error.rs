//! Observation store errors

use crate::features::flow_model::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Same `(input, output)` edge observed twice for one implementer
    #[error("duplicate edge {input} -> {output} for {implementing_type} implementing {interface}")]
    DuplicateEdge {
        interface: String,
        implementing_type: String,
        input: String,
        output: String,
    },

    /// Neutral and flowing observations for the same implementer
    #[error("{implementing_type} implementing {interface} cannot be both neutral and flowing")]
    NeutralConflict {
        interface: String,
        implementing_type: String,
    },

    /// Record describes a different member than the entry's interface member
    #[error("record for member `{record_member}` filed under interface member `{interface}`")]
    SubjectMismatch {
        interface: String,
        record_member: String,
    },

    /// Only flow-free (`summary`) neutrals describe an implementation's flows
    #[error(
        "{implementing_type} implementing {interface}: `{category}` neutral is not an observation"
    )]
    NotFlowNeutral {
        interface: String,
        implementing_type: String,
        category: &'static str,
    },

    /// Record fails ingestion checks once filed under the interface member
    #[error("{implementing_type} implementing {interface}: {source}")]
    Invalid {
        interface: String,
        implementing_type: String,
        #[source]
        source: ValidationError,
    },
}
