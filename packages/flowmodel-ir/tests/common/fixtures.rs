//! Test fixtures
//!
//! Modeled on the `p.MultipleImpls` test library: a `Strategy` interface
//! with two in-library implementations and a `Callable` implemented in a
//! different library.

use flowmodel_ir::{InMemoryClassHierarchy, MemberKey};

pub const STRATEGY: &str = "p.MultipleImpls$Strategy";
pub const STRAT1: &str = "p.MultipleImpls$Strat1";
pub const STRAT2: &str = "p.MultipleImpls$Strat2";
pub const STRAT3: &str = "p.MultipleImpls$Strat3";
pub const CALLABLE: &str = "java.util.concurrent.Callable";

pub const DO_SOMETHING: &str = "p;MultipleImpls$Strategy;true;doSomething;(String)";
pub const CALL: &str = "java.util.concurrent;Callable;true;call;()";

pub fn do_something() -> MemberKey {
    DO_SOMETHING.parse().expect("fixture member key")
}

pub fn call() -> MemberKey {
    CALL.parse().expect("fixture member key")
}

/// `p.MultipleImpls` with the JDK's `Callable` in its own unit
pub fn multiple_impls() -> InMemoryClassHierarchy {
    let mut h = InMemoryClassHierarchy::new();
    h.declare_type(STRATEGY, "p")
        .declare_type(STRAT1, "p")
        .declare_type(STRAT2, "p")
        .declare_type(STRAT3, "p")
        .declare_type(CALLABLE, "jdk")
        .declare_implementer(&do_something(), STRAT1)
        .declare_implementer(&do_something(), STRAT2)
        .declare_implementer(&call(), STRAT3);
    h
}

/// Real-world lines that must ingest under the balanced preset
pub const CORPUS: &[&str] = &[
    "org.apache.http.client.utils;URIBuilder;true;setPath;(String);;Argument[0];Argument[-1].SyntheticField[org.apache.http.client.utils.URIBuilder.path];taint;ai-generated",
    "androidx.slice.builders;ListBuilder;false;setSeeMoreRow;;;Argument[-1];ReturnValue;value",
    "p;MultipleImpls$Strat3;call;();summary;df-generated",
    "summary=p;MultipleImpls$Strat2;true;getValue;();;Argument[this];ReturnValue;taint;df-generated",
    "contentbased-summary=p;MultipleImpls$Strategy;true;doSomething;(String);;Argument[0];ReturnValue;value;df-generated",
    "sink=Sinks;NewSinks;false;WrapResponseWrite;(System.Object);;Argument[0];html-injection;df-generated",
    "Sinks;NewSinks;Sink;(System.Object);sink",
    "java.util;List;true;add;(Object);;Argument[0];Argument[this].Element;taint;manual",
    "java.util;Map;true;get;(Object);;Argument[this].MapValue;ReturnValue;value;manual",
];
