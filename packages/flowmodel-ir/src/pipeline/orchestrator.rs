//! Pipeline orchestrator
//!
//! Runs ingestion and per-interface collection on rayon, either on the
//! global pool or on a dedicated pool when `num_workers > 0`.

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use super::request::{ImplementationWork, InterfaceWork};
use super::result::{
    IngestReport, IngestedLine, InterfaceReport, PipelineReport, RejectedLine,
};
use crate::api::ModelCompiler;
use crate::config::{ParallelConfig, ValidatedConfig};
use crate::errors::Result;
use crate::features::flow_model::{
    Expectation, MemberKey, ModelRecord, NeutralRecord, SummaryRecord,
};
use crate::features::hierarchy::ClassHierarchy;
use crate::features::lifting::LiftResult;
use crate::features::observation::StoreError;

pub struct ModelPipeline<H: ClassHierarchy> {
    compiler: ModelCompiler<H>,
    parallel: ParallelConfig,
    pool: Option<rayon::ThreadPool>,
}

/// Parsed lines of one implementation
#[derive(Default)]
struct Collected {
    summaries: Vec<SummaryRecord>,
    neutrals: Vec<NeutralRecord>,
    rejected: Vec<RejectedLine>,
    lines: usize,
}

impl<H: ClassHierarchy> ModelPipeline<H> {
    pub fn new(compiler: ModelCompiler<H>, parallel: ParallelConfig) -> Result<Self> {
        let pool = if parallel.num_workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(parallel.num_workers)
                .thread_name(|i| format!("flowmodel-worker-{}", i))
                .build()?;
            Some(pool)
        } else {
            None
        };
        debug!(workers = parallel.effective_workers(), "model pipeline ready");
        Ok(Self {
            compiler,
            parallel,
            pool,
        })
    }

    pub fn from_config(hierarchy: H, config: &ValidatedConfig) -> Result<Self> {
        Self::new(ModelCompiler::with_config(hierarchy, config), config.parallel())
    }

    pub fn compiler(&self) -> &ModelCompiler<H> {
        &self.compiler
    }

    fn install<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    /// Ingest model lines in parallel.
    ///
    /// Blank lines and `#` comments are skipped. Results keep input order.
    pub fn ingest_batch<S>(&self, source: &str, lines: &[S]) -> IngestReport
    where
        S: AsRef<str> + Sync,
    {
        let outcomes: Vec<(usize, std::result::Result<ModelRecord, RejectedLine>)> = self
            .install(|| {
                lines
                    .par_iter()
                    .enumerate()
                    .with_min_len(self.parallel.min_batch_size)
                    .filter(|(_, line)| !is_skipped(line.as_ref()))
                    .map(|(index, line)| {
                        let line = line.as_ref();
                        let outcome = self.compiler.ingest(line).map_err(|e| {
                            RejectedLine::new(source, Some(index + 1), line, e)
                        });
                        (index + 1, outcome)
                    })
                    .collect()
            });

        let mut report = IngestReport::default();
        for (line_number, outcome) in outcomes {
            match outcome {
                Ok(record) => report.accepted.push(IngestedLine {
                    line_number,
                    record,
                }),
                Err(rejected) => report.rejected.push(rejected),
            }
        }
        info!(
            source,
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "ingested model lines"
        );
        report
    }

    /// Collect and lift every interface member.
    ///
    /// Each interface is lifted as soon as its own implementations are
    /// recorded. An implementation with any rejected line is not recorded
    /// and its interface is reported as deferred.
    pub fn run(&self, work: &[InterfaceWork]) -> PipelineReport {
        let mut grouped: BTreeMap<&MemberKey, Vec<&ImplementationWork>> = BTreeMap::new();
        for item in work {
            grouped
                .entry(&item.interface)
                .or_default()
                .extend(item.implementations.iter());
        }
        let grouped: Vec<(&MemberKey, Vec<&ImplementationWork>)> = grouped.into_iter().collect();

        let outcomes: Vec<(InterfaceReport, Vec<RejectedLine>, usize, usize)> = self.install(|| {
            grouped
                .par_iter()
                .map(|(interface, implementations)| {
                    let (failed, rejected, lines) = self.collect(interface, implementations);
                    let result = if failed.is_empty() {
                        self.compiler.lift(interface)
                    } else {
                        warn!(
                            interface = %interface,
                            failed = ?failed,
                            "implementations with rejected lines; lifting deferred"
                        );
                        LiftResult::deferred(failed)
                    };
                    let report = InterfaceReport {
                        interface: (*interface).clone(),
                        result,
                    };
                    (report, rejected, implementations.len(), lines)
                })
                .collect()
        });

        let mut report = PipelineReport::default();
        for (interface, rejected, implementations, lines) in outcomes {
            report.stats.implementations += implementations;
            report.stats.lines += lines;
            report.stats.lifted += interface.result.lifted.len();
            report.stats.spurious += interface.result.spurious.len();
            if interface.result.is_deferred() {
                report.stats.deferred += 1;
            }
            report.rejected.extend(rejected);
            report.interfaces.push(interface);
        }
        report.stats.interfaces = report.interfaces.len();
        report.stats.rejected = report.rejected.len();

        info!(
            interfaces = report.stats.interfaces,
            lifted = report.stats.lifted,
            spurious = report.stats.spurious,
            deferred = report.stats.deferred,
            "pipeline finished"
        );
        report
    }

    /// Parse and record every implementation of one interface.
    ///
    /// Returns the implementers that failed, the rejections and the line count.
    fn collect(
        &self,
        interface: &MemberKey,
        implementations: &[&ImplementationWork],
    ) -> (BTreeSet<String>, Vec<RejectedLine>, usize) {
        let outcomes: Vec<(&str, Collected)> = implementations
            .par_iter()
            .map(|work| (work.implementing_type.as_str(), self.parse_implementation(work)))
            .collect();

        let mut failed = BTreeSet::new();
        let mut rejected = Vec::new();
        let mut lines = 0;

        for (implementer, collected) in outcomes {
            lines += collected.lines;
            if !collected.rejected.is_empty() {
                failed.insert(implementer.to_string());
                rejected.extend(collected.rejected);
                continue;
            }
            if let Err(e) = self.record(interface, implementer, collected) {
                failed.insert(implementer.to_string());
                rejected.push(e);
            }
        }
        (failed, rejected, lines)
    }

    fn parse_implementation(&self, work: &ImplementationWork) -> Collected {
        let mut collected = Collected::default();
        for (index, line) in work.lines.iter().enumerate() {
            if is_skipped(line) {
                continue;
            }
            collected.lines += 1;

            let annotated = match self.compiler.parse_annotated(line) {
                Ok(annotated) => annotated,
                Err(e) => {
                    collected.rejected.push(RejectedLine::new(
                        work.implementing_type.clone(),
                        Some(index + 1),
                        line.clone(),
                        e,
                    ));
                    continue;
                }
            };
            if annotated.expectation != Expectation::Expected {
                debug!(
                    implementer = %work.implementing_type,
                    line = index + 1,
                    "non-observed annotation skipped"
                );
                continue;
            }
            match annotated.record {
                ModelRecord::Summary(record) => collected.summaries.push(record),
                ModelRecord::Neutral(record) => collected.neutrals.push(record),
                ModelRecord::Endpoint(record) => {
                    debug!(subject = %record.subject, "endpoint models are not lifted");
                }
            }
        }
        collected
    }

    fn record(
        &self,
        interface: &MemberKey,
        implementer: &str,
        collected: Collected,
    ) -> std::result::Result<(), RejectedLine> {
        let reject = |e: StoreError| RejectedLine::new(implementer, None, String::new(), e);

        if !collected.summaries.is_empty() || collected.neutrals.is_empty() {
            self.compiler
                .register_observation(interface.clone(), implementer, collected.summaries)
                .map_err(reject)?;
        }
        for neutral in collected.neutrals {
            let line = neutral.to_string();
            self.compiler
                .register_neutral(interface.clone(), implementer, neutral)
                .map_err(|e| RejectedLine::new(implementer, None, line, e))?;
        }
        Ok(())
    }
}

fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}
