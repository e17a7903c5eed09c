//! Model compiler facade
//!
//! Owns one analysis run: the line codec, the neutral exclusivity registry,
//! the observation store and the lifting engine. All methods take `&self`
//! so a compiler can be shared across rayon tasks.

use std::collections::BTreeMap;

use crate::config::ValidatedConfig;
use crate::features::flow_model::{
    AnnotatedRecord, IngestError, LineCodec, MemberKey, ModelRecord, NeutralRecord,
    RecordValidator, SummaryRecord,
};
use crate::features::hierarchy::ClassHierarchy;
use crate::features::lifting::{LiftResult, LiftingEngine};
use crate::features::neutral::NeutralModelResolver;
use crate::features::observation::{ObservationEntry, ObservationStore, StoreError};

pub struct ModelCompiler<H: ClassHierarchy> {
    codec: LineCodec,
    resolver: NeutralModelResolver,
    store: ObservationStore,
    engine: LiftingEngine<H>,
}

impl<H: ClassHierarchy> ModelCompiler<H> {
    /// Compiler with the balanced preset
    pub fn new(hierarchy: H) -> Self {
        Self::with_config(hierarchy, &ValidatedConfig::default())
    }

    pub fn with_config(hierarchy: H, config: &ValidatedConfig) -> Self {
        let ingest = config.ingest();
        Self {
            store: ObservationStore::with_validator(RecordValidator::new(&ingest)),
            codec: LineCodec::new(ingest),
            resolver: NeutralModelResolver::new(),
            engine: LiftingEngine::new(hierarchy, &config.lifting()),
        }
    }

    /// Parse, validate and register one model line.
    ///
    /// A summary for a subject already declared neutral (or the reverse) is
    /// rejected as a validation error.
    pub fn ingest(&self, line: &str) -> Result<ModelRecord, IngestError> {
        let record = self.codec.parse(line)?;
        self.resolver.register(&record)?;
        tracing::debug!(subject = %record.subject(), tag = record.tag(), "ingested model");
        Ok(record)
    }

    /// Parse one line keeping its annotation, without registering it
    pub fn parse_annotated(&self, line: &str) -> Result<AnnotatedRecord, IngestError> {
        self.codec.parse_annotated(line)
    }

    /// Record what one implementation does for an interface member.
    ///
    /// Records are validated against the interface member with this
    /// compiler's ingestion checks; a rejected batch is not stored.
    pub fn register_observation<I>(
        &self,
        interface: MemberKey,
        implementing_type: impl Into<String>,
        records: I,
    ) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = SummaryRecord>,
    {
        self.store
            .record(ObservationEntry::flows(interface, implementing_type, records))
    }

    /// Record that one implementation is declared neutral for an interface member
    pub fn register_neutral(
        &self,
        interface: MemberKey,
        implementing_type: impl Into<String>,
        record: NeutralRecord,
    ) -> Result<(), StoreError> {
        self.store
            .record(ObservationEntry::neutral(interface, implementing_type, record))
    }

    /// Lift one interface member.
    ///
    /// The hierarchy oracle must already know every in-unit implementer.
    pub fn lift(&self, interface: &MemberKey) -> LiftResult {
        self.engine.lift(&self.store, interface)
    }

    /// Lift every observed interface member
    pub fn lift_all(&self) -> BTreeMap<MemberKey, LiftResult> {
        self.engine.lift_all(&self.store)
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    pub fn resolver(&self) -> &NeutralModelResolver {
        &self.resolver
    }

    pub fn codec(&self) -> &LineCodec {
        &self.codec
    }

    pub fn hierarchy(&self) -> &H {
        self.engine.hierarchy()
    }
}
