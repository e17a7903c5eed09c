//! Semantic checks applied after a line parses
//!
//! - argument indices must be in range for the member's erased signature
//! - `ReturnValue` cannot be a summary input
//! - `value` flows may not wrap a value into a container
//! - `none` is not a summary kind

use crate::config::IngestConfig;
use crate::features::access_path::AccessPath;
use crate::features::flow_model::domain::{EndpointRecord, FlowKind, MemberKey, SummaryRecord};
use crate::features::flow_model::error::ValidationError;

#[derive(Debug, Clone)]
pub struct RecordValidator {
    validate_arity: bool,
    enforce_value_shape: bool,
}

impl RecordValidator {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            validate_arity: config.validate_arity,
            enforce_value_shape: config.enforce_value_shape,
        }
    }

    pub fn validate_summary(&self, record: &SummaryRecord) -> Result<(), ValidationError> {
        self.validate_summary_on(&record.subject, record)
    }

    /// Validate `record` as if it were filed under `subject`.
    ///
    /// Observations are lifted onto the interface member, so their argument
    /// positions must fit the interface's signature as well as their own.
    pub fn validate_summary_on(
        &self,
        subject: &MemberKey,
        record: &SummaryRecord,
    ) -> Result<(), ValidationError> {
        if record.kind == FlowKind::None {
            return Err(ValidationError::NeutralKindInSummary);
        }
        if record.input.is_return_value() {
            return Err(ValidationError::ReturnValueAsInput);
        }

        for key in [&record.subject, subject] {
            self.check_position(key, &record.input)?;
            self.check_position(key, &record.output)?;
        }

        // A scalar may be read out of a container by value, never wrapped into one.
        if self.enforce_value_shape
            && record.kind == FlowKind::Value
            && record.output.container_depth() > record.input.container_depth()
        {
            return Err(ValidationError::IncompatibleValueShape {
                input: record.input.to_string(),
                output: record.output.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_endpoint(&self, record: &EndpointRecord) -> Result<(), ValidationError> {
        self.check_position(&record.subject, &record.path)
    }

    fn check_position(
        &self,
        subject: &MemberKey,
        path: &AccessPath,
    ) -> Result<(), ValidationError> {
        if !self.validate_arity {
            return Ok(());
        }
        match (path.argument_index(), subject.signature.as_ref()) {
            (Some(index), Some(signature)) if index as usize >= signature.arity() => {
                Err(ValidationError::ArgumentOutOfRange {
                    index,
                    arity: signature.arity(),
                    signature: signature.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
