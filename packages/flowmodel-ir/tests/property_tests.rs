//! Property-based tests
//!
//! Invariants that should hold for all generated inputs:
//! - Roundtrip: parse(to_string(path)) == path
//! - Canonical: canonicalize is idempotent
//! - Unanimity: a lifted summary shape is observed by every implementer
//! - Soundness: a lifted summary never names an implementation-private field
//! - Idempotence: lifting the same store twice gives the same result
//! - Exclusion: implementers from another library never change the result

mod common;

use common::*;
use flowmodel_ir::features::access_path::{canonicalize, parse};
use flowmodel_ir::{
    AccessPath, AccessPathSegment, FlowKind, ModelCompiler, Provenance, SummaryRecord,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

fn anchor() -> impl Strategy<Value = AccessPath> {
    prop_oneof![
        (0u32..8).prop_map(AccessPath::argument),
        Just(AccessPath::qualifier()),
        Just(AccessPath::this()),
        Just(AccessPath::return_value()),
    ]
}

/// Qualified type names, nested types included
const OWNER: &str = "[a-z]{1,3}(\\.[a-z]{1,3}){0,2}\\.[A-Z][a-z]{0,4}(\\$[A-Z][a-z]{0,4})?";

fn content() -> impl Strategy<Value = AccessPathSegment> {
    prop_oneof![
        Just(AccessPathSegment::Element),
        Just(AccessPathSegment::MapKey),
        Just(AccessPathSegment::MapValue),
        (OWNER, "[a-z][a-zA-Z]{0,6}")
            .prop_map(|(owner, name)| AccessPathSegment::synthetic_field(owner, name)),
    ]
}

fn access_path() -> impl Strategy<Value = AccessPath> {
    (anchor(), prop::collection::vec(content(), 0..4)).prop_map(|(mut path, segments)| {
        for segment in segments {
            path = match segment {
                AccessPathSegment::Element => path.element(),
                AccessPathSegment::MapKey => path.map_key(),
                AccessPathSegment::MapValue => path.map_value(),
                AccessPathSegment::SyntheticField { owner, name } => {
                    path.synthetic_field(owner, name)
                }
                _ => path,
            };
        }
        path
    })
}

/// Shapes an implementation of `doSomething(String)` could report
fn shape_pool() -> Vec<(AccessPath, AccessPath, FlowKind)> {
    vec![
        (AccessPath::argument(0), AccessPath::return_value(), FlowKind::Taint),
        (AccessPath::argument(0), AccessPath::return_value(), FlowKind::Value),
        (AccessPath::argument(0), AccessPath::this(), FlowKind::Taint),
        (AccessPath::this(), AccessPath::return_value(), FlowKind::Taint),
        (
            AccessPath::argument(0),
            AccessPath::this().synthetic_field(STRAT1, "foo"),
            FlowKind::Value,
        ),
        (
            AccessPath::argument(0),
            AccessPath::this().synthetic_field(STRAT2, "foo"),
            FlowKind::Value,
        ),
        (
            AccessPath::argument(0),
            AccessPath::this().synthetic_field(STRATEGY, "state"),
            FlowKind::Taint,
        ),
    ]
}

fn observed_subset() -> impl Strategy<Value = BTreeSet<usize>> {
    prop::collection::btree_set(0..shape_pool().len(), 0..5)
}

fn records(indices: &BTreeSet<usize>) -> Vec<SummaryRecord> {
    let pool = shape_pool();
    indices
        .iter()
        .map(|&i| {
            let (input, output, kind) = pool[i].clone();
            SummaryRecord::new(do_something(), input, output, kind, Provenance::df_generated())
        })
        .collect()
}

// ============================================================================
// Access paths
// ============================================================================

proptest! {
    #[test]
    fn prop_access_path_roundtrip(path in access_path()) {
        let text = path.to_string();
        prop_assert_eq!(parse(&text).unwrap(), path);
    }

    #[test]
    fn prop_canonicalize_idempotent(path in access_path()) {
        let once = canonicalize(&path.to_string()).unwrap();
        let twice = canonicalize(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_parse_never_panics(text in "\\PC{0,40}") {
        let _ = parse(&text);
    }
}

// ============================================================================
// Lifting
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_lifting_sound_and_idempotent(
        strat1 in observed_subset(),
        strat2 in observed_subset(),
    ) {
        let compiler = ModelCompiler::new(multiple_impls());
        compiler.register_observation(do_something(), STRAT1, records(&strat1)).unwrap();
        compiler.register_observation(do_something(), STRAT2, records(&strat2)).unwrap();

        let result = compiler.lift(&do_something());
        prop_assert_eq!(&result, &compiler.lift(&do_something()));

        let private: BTreeSet<&str> = [STRAT1, STRAT2].into_iter().collect();
        for model in &result.lifted {
            let Some(summary) = model.as_summary() else {
                // Neutral only when both observed nothing
                prop_assert!(strat1.is_empty() && strat2.is_empty());
                continue;
            };
            for path in [&summary.input, &summary.output] {
                for (owner, _) in path.synthetic_fields() {
                    prop_assert!(!private.contains(owner), "lifted private field on {}", owner);
                }
            }
            let shape = (summary.input.clone(), summary.output.clone(), summary.kind);
            let index = shape_pool().iter().position(|s| *s == shape);
            prop_assert!(index.is_some());
            let index = index.unwrap();
            prop_assert!(strat1.contains(&index) && strat2.contains(&index));
        }
        for candidate in &result.spurious {
            prop_assert!(!candidate.private_owners.is_empty());
        }
    }

    #[test]
    fn prop_other_library_never_participates(
        strat1 in observed_subset(),
        strat2 in observed_subset(),
        foreign in observed_subset(),
    ) {
        let baseline = ModelCompiler::new(multiple_impls());
        let mut hierarchy = multiple_impls();
        hierarchy
            .declare_type("q.Foreign", "q")
            .declare_implementer(&do_something(), "q.Foreign");
        let extended = ModelCompiler::new(hierarchy);

        for compiler in [&baseline, &extended] {
            compiler.register_observation(do_something(), STRAT1, records(&strat1)).unwrap();
            compiler.register_observation(do_something(), STRAT2, records(&strat2)).unwrap();
        }
        extended.register_observation(do_something(), "q.Foreign", records(&foreign)).unwrap();

        prop_assert_eq!(baseline.lift(&do_something()), extended.lift(&do_something()));
    }
}
