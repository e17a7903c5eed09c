//! Lifting Engine - interface-level models from per-implementation observations
//!
//! # Algorithm
//! 1. Ask the hierarchy oracle for the closed set of in-unit implementers
//! 2. Build one view per implementer: its shapes, or neutral
//! 3. No implementer reported → lift nothing. All reported neutral → lift
//!    a neutral; some neutral or unreported → lift nothing
//! 4. Shapes present in every implementer are unanimous
//! 5. Unanimous shapes naming private fields become spurious candidates,
//!    the rest are lifted with the configured `lifted` provenance
//! 6. Shapes that only agree once field owners are erased and that name a
//!    private field are reported as spurious as well
//!
//! Lifting never fails: an empty `LiftResult` is an ordinary outcome.

use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use super::soundness::SoundnessFilter;
use crate::config::LiftingConfig;
use crate::features::flow_model::{MemberKey, NeutralRecord, Provenance};
use crate::features::hierarchy::ClassHierarchy;
use crate::features::lifting::domain::{LiftResult, LiftedModel, Shape, SpuriousCandidate};
use crate::features::neutral::NeutralModelResolver;
use crate::features::observation::ObservationStore;

/// What one implementer was observed to do
#[derive(Debug)]
enum ImplementerView {
    Neutral,
    /// Never reported; vetoes lifting without voting for a neutral
    Unobserved,
    Flows(BTreeSet<Shape>),
}

pub struct LiftingEngine<H: ClassHierarchy> {
    hierarchy: H,
    provenance: Provenance,
    lift_neutrals: bool,
    report_spurious: bool,
    treat_missing_as_neutral: bool,
    resolver: NeutralModelResolver,
}

impl<H: ClassHierarchy> LiftingEngine<H> {
    pub fn new(hierarchy: H, config: &LiftingConfig) -> Self {
        Self {
            hierarchy,
            provenance: Provenance::new(config.provenance_tag.clone()),
            lift_neutrals: config.lift_neutrals,
            report_spurious: config.report_spurious,
            treat_missing_as_neutral: config.treat_missing_as_neutral,
            resolver: NeutralModelResolver::new(),
        }
    }

    pub fn hierarchy(&self) -> &H {
        &self.hierarchy
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Lift one interface member.
    ///
    /// Read-only over `store`; running it twice yields the same result.
    pub fn lift(&self, store: &ObservationStore, interface: &MemberKey) -> LiftResult {
        let Some(implementers) = self.hierarchy.implementers(interface) else {
            warn!(interface = %interface, "interface unknown to the class hierarchy");
            return LiftResult::empty();
        };
        if implementers.is_empty() {
            debug!(interface = %interface, "no in-unit implementers");
            return LiftResult::empty();
        }

        let observed = store.observed_implementers(interface);
        if implementers.is_disjoint(&observed) {
            debug!(interface = %interface, "no in-unit implementer observed");
            return LiftResult::empty();
        }

        let foreign: Vec<String> = observed
            .iter()
            .filter(|ty| !implementers.contains(*ty))
            .cloned()
            .collect();
        if !foreign.is_empty() {
            debug!(
                interface = %interface,
                ignored = ?foreign,
                "observations from outside the compilation unit ignored"
            );
        }

        let views = match self.collect_views(store, interface, &implementers) {
            Ok(views) => views,
            Err(pending) => {
                info!(
                    interface = %interface,
                    pending = pending.len(),
                    "lifting deferred until every implementer is observed"
                );
                return LiftResult::deferred(pending);
            }
        };

        let result = self.lift_views(interface, &implementers, &views);
        info!(
            interface = %interface,
            implementers = implementers.len(),
            lifted = result.lifted.len(),
            spurious = result.spurious.len(),
            "lifted interface member"
        );
        result
    }

    /// Lift every interface member with observations, in parallel
    pub fn lift_all(&self, store: &ObservationStore) -> BTreeMap<MemberKey, LiftResult> {
        let interfaces: Vec<MemberKey> = store.interfaces().into_iter().collect();
        interfaces
            .into_par_iter()
            .map(|interface| {
                let result = self.lift(store, &interface);
                (interface, result)
            })
            .collect()
    }

    /// One view per in-unit implementer, or the implementers still missing
    fn collect_views(
        &self,
        store: &ObservationStore,
        interface: &MemberKey,
        implementers: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, ImplementerView>, BTreeSet<String>> {
        let mut views = BTreeMap::new();
        let mut pending = BTreeSet::new();

        for implementer in implementers {
            let entries = store.observations_for(interface, implementer);
            if entries.is_empty() {
                if self.treat_missing_as_neutral {
                    debug!(
                        interface = %interface,
                        implementer = %implementer,
                        "unobserved implementer vetoes lifting"
                    );
                    views.insert(implementer.clone(), ImplementerView::Unobserved);
                } else {
                    pending.insert(implementer.clone());
                }
                continue;
            }

            let neutral = entries
                .iter()
                .all(|entry| self.resolver.classify_observation(entry).is_some());
            let view = if neutral {
                ImplementerView::Neutral
            } else {
                ImplementerView::Flows(
                    entries
                        .iter()
                        .flat_map(|entry| entry.records())
                        .map(Shape::of)
                        .collect(),
                )
            };
            views.insert(implementer.clone(), view);
        }

        if pending.is_empty() {
            Ok(views)
        } else {
            Err(pending)
        }
    }

    fn lift_views(
        &self,
        interface: &MemberKey,
        implementers: &BTreeSet<String>,
        views: &BTreeMap<String, ImplementerView>,
    ) -> LiftResult {
        let mut result = LiftResult::empty();

        let neutral: BTreeSet<&str> = views
            .iter()
            .filter(|(_, view)| matches!(view, ImplementerView::Neutral))
            .map(|(ty, _)| ty.as_str())
            .collect();
        let unobserved: BTreeSet<&str> = views
            .iter()
            .filter(|(_, view)| matches!(view, ImplementerView::Unobserved))
            .map(|(ty, _)| ty.as_str())
            .collect();

        if neutral.len() == views.len() {
            if self.lift_neutrals {
                let record = NeutralRecord::summary(interface.exact())
                    .with_provenance(self.provenance.clone());
                result.lifted.insert(LiftedModel::Neutral(record));
            }
            return result;
        }
        if !neutral.is_empty() || !unobserved.is_empty() {
            debug!(
                interface = %interface,
                neutral = ?neutral,
                unobserved = ?unobserved,
                "neutral or unobserved implementers veto summary lifting"
            );
            return result;
        }

        let shape_sets: Vec<(&String, &BTreeSet<Shape>)> = views
            .iter()
            .filter_map(|(ty, view)| match view {
                ImplementerView::Flows(shapes) => Some((ty, shapes)),
                ImplementerView::Neutral | ImplementerView::Unobserved => None,
            })
            .collect();

        let filter = SoundnessFilter::for_interface(&self.hierarchy, interface, implementers);

        // Exact unanimity
        let unanimous = intersect(shape_sets.iter().map(|(_, shapes)| BTreeSet::clone(shapes)));
        for shape in &unanimous {
            let private_owners = filter.private_owners(shape);
            if private_owners.is_empty() {
                let record = shape.to_summary(interface.clone(), self.provenance.clone());
                result.lifted.insert(LiftedModel::Summary(record));
            } else {
                self.report(&mut result, interface, shape.clone(), private_owners, implementers);
            }
        }

        // Unanimity only modulo field owners
        let erased_unanimous = intersect(
            shape_sets
                .iter()
                .map(|(_, shapes)| shapes.iter().map(Shape::owner_erased).collect()),
        );
        let covered: BTreeSet<Shape> = unanimous.iter().map(Shape::owner_erased).collect();

        for erased in erased_unanimous.difference(&covered) {
            let variants: Vec<&Shape> = shape_sets
                .iter()
                .flat_map(|(_, shapes)| shapes.iter())
                .filter(|shape| shape.owner_erased() == *erased)
                .collect();

            let private_owners: BTreeSet<String> = variants
                .iter()
                .flat_map(|shape| filter.private_owners(shape))
                .collect();
            if private_owners.is_empty() {
                debug!(interface = %interface, shape = %erased, "field owners disagree");
                continue;
            }
            if let Some(representative) = variants.first() {
                self.report(
                    &mut result,
                    interface,
                    (*representative).clone(),
                    private_owners,
                    implementers,
                );
            }
        }

        result
    }

    fn report(
        &self,
        result: &mut LiftResult,
        interface: &MemberKey,
        shape: Shape,
        private_owners: BTreeSet<String>,
        implementers: &BTreeSet<String>,
    ) {
        warn!(
            interface = %interface,
            shape = %shape,
            owners = ?private_owners,
            "spurious candidate: field is private to an implementation"
        );
        if !self.report_spurious {
            return;
        }
        result.spurious.insert(SpuriousCandidate {
            interface_key: interface.clone(),
            shape,
            provenance: self.provenance.clone(),
            private_owners,
            implementers: implementers.clone(),
        });
    }
}

fn intersect<I>(sets: I) -> BTreeSet<Shape>
where
    I: IntoIterator<Item = BTreeSet<Shape>>,
{
    sets.into_iter()
        .reduce(|acc, next| acc.intersection(&next).cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::access_path::AccessPath;
    use crate::features::flow_model::{FlowKind, Signature, SummaryRecord};
    use crate::features::hierarchy::InMemoryClassHierarchy;
    use crate::features::observation::ObservationEntry;

    fn strategy() -> MemberKey {
        MemberKey::new("p", "MultipleImpls$Strategy", "doSomething")
            .with_subtypes(true)
            .with_signature(Signature::new(["String"]))
    }

    fn hierarchy(implementers: &[&str]) -> InMemoryClassHierarchy {
        let mut h = InMemoryClassHierarchy::new();
        h.declare_type("p.MultipleImpls$Strategy", "lib");
        for ty in implementers {
            h.declare_type(*ty, "lib").declare_implementer(&strategy(), *ty);
        }
        h
    }

    fn engine(implementers: &[&str]) -> LiftingEngine<InMemoryClassHierarchy> {
        LiftingEngine::new(hierarchy(implementers), &LiftingConfig::default())
    }

    fn summary(input: AccessPath, output: AccessPath, kind: FlowKind) -> SummaryRecord {
        SummaryRecord::new(strategy(), input, output, kind, Provenance::df_generated())
    }

    fn observe(store: &ObservationStore, ty: &str, records: Vec<SummaryRecord>) {
        store
            .record(ObservationEntry::flows(strategy(), ty, records))
            .unwrap();
    }

    #[test]
    fn test_unanimous_shape_lifted() {
        let store = ObservationStore::new();
        let flow = summary(AccessPath::argument(0), AccessPath::return_value(), FlowKind::Taint);
        observe(&store, "p.A", vec![flow.clone()]);
        observe(&store, "p.B", vec![flow]);

        let result = engine(&["p.A", "p.B"]).lift(&store, &strategy());
        assert_eq!(result.lifted.len(), 1);
        assert!(result.spurious.is_empty());

        let lifted = result.lifted.iter().next().unwrap().as_summary().unwrap();
        assert_eq!(lifted.subject, strategy());
        assert_eq!(lifted.provenance.tag(), "df-lifted");
    }

    #[test]
    fn test_differing_kind_not_lifted() {
        let store = ObservationStore::new();
        observe(
            &store,
            "p.A",
            vec![summary(AccessPath::argument(0), AccessPath::return_value(), FlowKind::Taint)],
        );
        observe(
            &store,
            "p.B",
            vec![summary(AccessPath::argument(0), AccessPath::return_value(), FlowKind::Value)],
        );
        assert!(engine(&["p.A", "p.B"]).lift(&store, &strategy()).is_empty());
    }

    #[test]
    fn test_receiver_spellings_unify() {
        let store = ObservationStore::new();
        observe(
            &store,
            "p.A",
            vec![summary(AccessPath::argument(0), AccessPath::qualifier(), FlowKind::Taint)],
        );
        observe(
            &store,
            "p.B",
            vec![summary(AccessPath::argument(0), AccessPath::this(), FlowKind::Taint)],
        );
        let result = engine(&["p.A", "p.B"]).lift(&store, &strategy());
        let lifted = result.lifted.iter().next().unwrap().as_summary().unwrap();
        assert_eq!(lifted.output, AccessPath::this());
    }

    #[test]
    fn test_private_field_is_spurious() {
        let store = ObservationStore::new();
        let field = summary(
            AccessPath::argument(0),
            AccessPath::this().synthetic_field("p.A", "foo"),
            FlowKind::Taint,
        );
        observe(&store, "p.A", vec![field.clone()]);
        observe(&store, "p.B", vec![field]);

        let result = engine(&["p.A", "p.B"]).lift(&store, &strategy());
        assert!(result.lifted.is_empty());
        assert_eq!(result.spurious.len(), 1);
        let candidate = result.spurious.iter().next().unwrap();
        assert!(candidate.private_owners.contains("p.A"));
    }

    #[test]
    fn test_per_implementer_owners_are_spurious() {
        let store = ObservationStore::new();
        observe(
            &store,
            "p.A",
            vec![summary(
                AccessPath::argument(0),
                AccessPath::this().synthetic_field("p.A", "foo"),
                FlowKind::Taint,
            )],
        );
        observe(
            &store,
            "p.B",
            vec![summary(
                AccessPath::argument(0),
                AccessPath::this().synthetic_field("p.B", "foo"),
                FlowKind::Taint,
            )],
        );

        let result = engine(&["p.A", "p.B"]).lift(&store, &strategy());
        assert!(result.lifted.is_empty());
        let candidate = result.spurious.iter().next().unwrap();
        assert_eq!(
            candidate.private_owners,
            BTreeSet::from(["p.A".to_string(), "p.B".to_string()])
        );
    }

    #[test]
    fn test_spurious_reporting_disabled() {
        let store = ObservationStore::new();
        let field = summary(
            AccessPath::argument(0),
            AccessPath::this().synthetic_field("p.A", "foo"),
            FlowKind::Taint,
        );
        observe(&store, "p.A", vec![field.clone()]);
        observe(&store, "p.B", vec![field]);

        let config = LiftingConfig {
            report_spurious: false,
            ..LiftingConfig::default()
        };
        let engine = LiftingEngine::new(hierarchy(&["p.A", "p.B"]), &config);
        assert!(engine.lift(&store, &strategy()).is_empty());
    }

    #[test]
    fn test_all_neutral_lifts_neutral() {
        let store = ObservationStore::new();
        observe(&store, "p.A", vec![]);
        store
            .record(ObservationEntry::neutral(
                strategy(),
                "p.B",
                NeutralRecord::summary(strategy().on_type("p.B")),
            ))
            .unwrap();

        let result = engine(&["p.A", "p.B"]).lift(&store, &strategy());
        assert_eq!(result.lifted.len(), 1);
        assert!(result.lifted.iter().all(LiftedModel::is_neutral));
    }

    #[test]
    fn test_partial_neutral_vetoes() {
        let store = ObservationStore::new();
        observe(&store, "p.A", vec![]);
        observe(
            &store,
            "p.B",
            vec![summary(AccessPath::argument(0), AccessPath::return_value(), FlowKind::Taint)],
        );
        assert!(engine(&["p.A", "p.B"]).lift(&store, &strategy()).is_empty());
    }

    #[test]
    fn test_missing_implementer_neutral_by_default() {
        let store = ObservationStore::new();
        observe(
            &store,
            "p.A",
            vec![summary(AccessPath::argument(0), AccessPath::return_value(), FlowKind::Taint)],
        );
        assert!(engine(&["p.A", "p.B"]).lift(&store, &strategy()).is_empty());
    }

    #[test]
    fn test_nothing_observed_lifts_nothing() {
        let store = ObservationStore::new();
        assert!(engine(&["p.A", "p.B"]).lift(&store, &strategy()).is_empty());

        let config = LiftingConfig {
            treat_missing_as_neutral: false,
            ..LiftingConfig::default()
        };
        let deferring = LiftingEngine::new(hierarchy(&["p.A", "p.B"]), &config);
        assert!(deferring.lift(&store, &strategy()).is_empty());
    }

    #[test]
    fn test_unobserved_implementer_does_not_vote_neutral() {
        let store = ObservationStore::new();
        observe(&store, "p.A", vec![]);

        let result = engine(&["p.A", "p.B"]).lift(&store, &strategy());
        assert!(result.lifted.is_empty());
        assert!(!result.is_deferred());
    }

    #[test]
    fn test_missing_implementer_defers() {
        let store = ObservationStore::new();
        observe(&store, "p.A", vec![]);
        let config = LiftingConfig {
            treat_missing_as_neutral: false,
            ..LiftingConfig::default()
        };
        let engine = LiftingEngine::new(hierarchy(&["p.A", "p.B"]), &config);
        let result = engine.lift(&store, &strategy());
        assert!(result.is_deferred());
        assert_eq!(result.pending, BTreeSet::from(["p.B".to_string()]));
    }

    #[test]
    fn test_unknown_interface() {
        let store = ObservationStore::new();
        let unknown = MemberKey::new("q", "Nope", "m");
        assert!(engine(&["p.A"]).lift(&store, &unknown).is_empty());
    }

    #[test]
    fn test_lift_all_matches_lift() {
        let store = ObservationStore::new();
        let flow = summary(AccessPath::argument(0), AccessPath::return_value(), FlowKind::Taint);
        observe(&store, "p.A", vec![flow.clone()]);
        observe(&store, "p.B", vec![flow]);

        let engine = engine(&["p.A", "p.B"]);
        let all = engine.lift_all(&store);
        assert_eq!(all.len(), 1);
        assert_eq!(all[&strategy()], engine.lift(&store, &strategy()));
    }
}
