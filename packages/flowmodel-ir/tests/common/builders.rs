//! Test data builders

use flowmodel_ir::pipeline::{ImplementationWork, InterfaceWork};
use flowmodel_ir::MemberKey;

/// `summary=` line for `member` with `df-generated` provenance
pub fn summary_line(member: &str, input: &str, output: &str, kind: &str) -> String {
    format!("summary={member};;{input};{output};{kind};df-generated")
}

/// Builder for one interface's pipeline work
#[derive(Debug)]
pub struct WorkBuilder {
    work: InterfaceWork,
}

impl WorkBuilder {
    pub fn new(interface: MemberKey) -> Self {
        Self {
            work: InterfaceWork::new(interface),
        }
    }

    /// Add an implementation with the given model lines
    pub fn implementation<S: Into<String>>(
        mut self,
        implementing_type: &str,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        self.work = self
            .work
            .with_implementation(ImplementationWork::new(implementing_type, lines));
        self
    }

    pub fn build(self) -> InterfaceWork {
        self.work
    }
}
