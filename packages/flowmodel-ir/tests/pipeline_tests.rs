//! Pipeline integration tests
//!
//! Concurrent collection and lifting through `ModelPipeline`, including the
//! JSON request path used by the CLI.

mod common;

use common::*;
use flowmodel_ir::config::{ModelConfig, Preset, ValidatedConfig};
use flowmodel_ir::pipeline::{InterfaceWork, LiftRequest};
use flowmodel_ir::{InMemoryClassHierarchy, MemberKey, ModelPipeline};
use pretty_assertions::assert_eq;

fn pipeline(
    hierarchy: InMemoryClassHierarchy,
    preset: Preset,
) -> ModelPipeline<InMemoryClassHierarchy> {
    let config = ModelConfig::preset(preset).build().unwrap();
    ModelPipeline::from_config(hierarchy, &config).unwrap()
}

#[test]
fn multiple_impls_end_to_end() {
    let returned = summary_line(DO_SOMETHING, "Argument[0]", "ReturnValue", "taint");
    let work = vec![
        WorkBuilder::new(do_something())
            .implementation(STRAT1, [returned.clone()])
            .implementation(
                STRAT2,
                [
                    returned,
                    summary_line(
                        DO_SOMETHING,
                        "Argument[0]",
                        "Argument[this].SyntheticField[p.MultipleImpls$Strat2.foo]",
                        "value",
                    ),
                ],
            )
            .build(),
        WorkBuilder::new(call())
            .implementation(STRAT3, ["neutral=p;MultipleImpls$Strat3;call;();summary;df-generated"])
            .build(),
    ];

    let report = pipeline(multiple_impls(), Preset::Balanced).run(&work);

    assert_eq!(report.stats.interfaces, 2);
    assert_eq!(report.stats.implementations, 3);
    assert_eq!(report.stats.lines, 4);
    assert_eq!(report.stats.rejected, 0);
    assert_eq!(report.stats.lifted, 1);
    // Only Strat2 writes the field, so the shape is not unanimous at all
    assert_eq!(report.stats.spurious, 0);

    assert!(report.result_for(&call()).unwrap().is_empty());
    let strategy = report.result_for(&do_something()).unwrap();
    assert_eq!(strategy.lifted.len(), 1);
}

#[test]
fn results_sorted_by_interface() {
    let work: Vec<InterfaceWork> = (0..8)
        .rev()
        .map(|i| InterfaceWork::new(MemberKey::new("p", format!("I{i}"), "m").with_subtypes(true)))
        .collect();
    let report = pipeline(InMemoryClassHierarchy::new(), Preset::Balanced).run(&work);

    let keys: Vec<&MemberKey> = report.interfaces.iter().map(|r| &r.interface).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn many_interfaces_on_dedicated_pool() {
    const INTERFACES: usize = 200;
    const IMPLEMENTERS: usize = 4;

    let mut hierarchy = InMemoryClassHierarchy::new();
    let mut work = Vec::new();
    for i in 0..INTERFACES {
        let ty = format!("I{i}");
        let member = format!("p;{ty};true;apply;(String)");
        let key: MemberKey = member.parse().unwrap();
        hierarchy.declare_type(format!("p.{ty}"), "p");

        let mut builder = WorkBuilder::new(key.clone());
        for j in 0..IMPLEMENTERS {
            let implementer = format!("p.I{i}Impl{j}");
            hierarchy
                .declare_type(implementer.clone(), "p")
                .declare_implementer(&key, implementer.clone());
            builder = builder.implementation(
                &implementer,
                [summary_line(&member, "Argument[0]", "ReturnValue", "taint")],
            );
        }
        work.push(builder.build());
    }

    let config = ModelConfig::preset(Preset::Balanced)
        .parallel(|c| c.num_workers(4).min_batch_size(1))
        .build()
        .unwrap();
    let pipeline = ModelPipeline::from_config(hierarchy, &config).unwrap();
    let report = pipeline.run(&work);

    assert_eq!(report.stats.interfaces, INTERFACES);
    assert_eq!(report.stats.implementations, INTERFACES * IMPLEMENTERS);
    assert_eq!(report.stats.lifted, INTERFACES);
    assert_eq!(report.stats.deferred, 0);
    assert_eq!(pipeline.compiler().store().len(), INTERFACES * IMPLEMENTERS);
}

#[test]
fn permissive_preset_defers_unobserved_implementer() {
    let work = vec![WorkBuilder::new(do_something())
        .implementation(
            STRAT1,
            [summary_line(DO_SOMETHING, "Argument[0]", "ReturnValue", "taint")],
        )
        .build()];

    let report = pipeline(multiple_impls(), Preset::Permissive).run(&work);
    let result = report.result_for(&do_something()).unwrap();
    assert!(result.is_deferred());
    assert_eq!(result.pending.iter().collect::<Vec<_>>(), vec![STRAT2]);
    assert_eq!(report.stats.deferred, 1);

    // Balanced lets the unobserved implementer veto lifting instead
    let report = pipeline(multiple_impls(), Preset::Balanced).run(&work);
    let result = report.result_for(&do_something()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn strict_preset_rejects_legacy_line() {
    let legacy = "p;MultipleImpls$Strategy;true;doSomething;(String);;Argument[0];ReturnValue;taint";
    let modern = summary_line(DO_SOMETHING, "Argument[0]", "ReturnValue", "taint");
    let work = vec![WorkBuilder::new(do_something())
        .implementation(STRAT1, [modern])
        .implementation(STRAT2, [legacy.to_string()])
        .build()];

    let report = pipeline(multiple_impls(), Preset::Strict).run(&work);
    assert_eq!(report.stats.rejected, 1);
    assert_eq!(report.rejected[0].source, STRAT2);
    assert_eq!(report.rejected[0].line_number, Some(1));
    assert!(report.result_for(&do_something()).unwrap().is_deferred());

    let report = pipeline(multiple_impls(), Preset::Balanced).run(&work);
    assert_eq!(report.stats.rejected, 0);
    assert_eq!(report.stats.lifted, 1);
}

#[test]
fn ingest_batch_reports_line_numbers() {
    let mut lines: Vec<String> = CORPUS.iter().map(|s| s.to_string()).collect();
    lines.push("p;T;false;m;(String);;Argument[3];ReturnValue;taint;manual".to_string());
    lines.push("# trailing comment".to_string());

    let report = pipeline(InMemoryClassHierarchy::new(), Preset::Balanced)
        .ingest_batch("corpus.model", &lines);
    assert_eq!(report.accepted.len(), CORPUS.len());
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].source, "corpus.model");
    assert_eq!(report.rejected[0].line_number, Some(CORPUS.len() + 1));
}

#[test]
fn lift_request_json() {
    let request = LiftRequest::from_json(
        r#"{
        "units": [
            { "name": "p", "types": [
                { "name": "p.MultipleImpls$Strategy" },
                { "name": "p.MultipleImpls$Strat1" },
                { "name": "p.MultipleImpls$Strat2" }
            ] }
        ],
        "interfaces": [
            { "member": "p;MultipleImpls$Strategy;true;doSomething;(String)",
              "implementers": ["p.MultipleImpls$Strat1", "p.MultipleImpls$Strat2"] }
        ],
        "observations": [
            { "interface": "p;MultipleImpls$Strategy;true;doSomething;(String)",
              "implementer": "p.MultipleImpls$Strat1",
              "lines": ["summary=p;MultipleImpls$Strategy;true;doSomething;(String);;Argument[0];ReturnValue;taint;df-generated"] },
            { "interface": "p;MultipleImpls$Strategy;true;doSomething;(String)",
              "implementer": "p.MultipleImpls$Strat2",
              "lines": ["summary=p;MultipleImpls$Strategy;true;doSomething;(String);;Argument[0];ReturnValue;taint;df-generated"] }
        ]
    }"#,
    )
    .unwrap();

    let hierarchy = request.hierarchy().unwrap();
    let pipeline = ModelPipeline::from_config(hierarchy, &ValidatedConfig::default()).unwrap();
    let report = pipeline.run(&request.work().unwrap());
    assert_eq!(report.stats.lifted, 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json["interfaces"][0]["interface"],
        serde_json::to_value(do_something()).unwrap()
    );
    assert_eq!(json["stats"]["lifted"], 1);
}
