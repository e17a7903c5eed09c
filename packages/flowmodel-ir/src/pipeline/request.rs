//! Pipeline inputs
//!
//! `InterfaceWork` is what `ModelPipeline::run` consumes. `LiftRequest` is
//! the JSON document accepted by the CLI; it carries the class hierarchy and
//! the per-implementation model lines in one file:
//!
//! ```json
//! {
//!   "units": [
//!     { "name": "lib", "types": [
//!       { "name": "p.MultipleImpls$Strategy" },
//!       { "name": "p.MultipleImpls$Strat1", "supertypes": ["p.MultipleImpls$Strategy"] }
//!     ] }
//!   ],
//!   "interfaces": [
//!     { "member": "p;MultipleImpls$Strategy;true;doSomething;(String)",
//!       "implementers": ["p.MultipleImpls$Strat1"] }
//!   ],
//!   "observations": [
//!     { "interface": "p;MultipleImpls$Strategy;true;doSomething;(String)",
//!       "implementer": "p.MultipleImpls$Strat1",
//!       "lines": ["summary=p;MultipleImpls$Strategy;true;doSomething;(String);;Argument[0];ReturnValue;taint;df-generated"] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{FlowModelError, Result};
use crate::features::flow_model::{parse_member_key, MemberKey};
use crate::features::hierarchy::InMemoryClassHierarchy;

/// Model lines observed on one implementing type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationWork {
    pub implementing_type: String,
    pub lines: Vec<String>,
}

impl ImplementationWork {
    pub fn new<I, S>(implementing_type: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            implementing_type: implementing_type.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything collected for one interface member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceWork {
    pub interface: MemberKey,
    pub implementations: Vec<ImplementationWork>,
}

impl InterfaceWork {
    pub fn new(interface: MemberKey) -> Self {
        Self {
            interface,
            implementations: Vec::new(),
        }
    }

    pub fn with_implementation(mut self, work: ImplementationWork) -> Self {
        self.implementations.push(work);
        self
    }
}

// ============================================================================
// JSON request
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiftRequest {
    #[serde(default)]
    pub units: Vec<UnitDecl>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default)]
    pub observations: Vec<ObservationDecl>,
}

/// A compilation unit (library) and the types it declares
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDecl {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDecl {
    /// `package;type;subtypes;name;signature`
    pub member: String,
    #[serde(default)]
    pub implementers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservationDecl {
    pub interface: String,
    pub implementer: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl LiftRequest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Class hierarchy declared by `units` and `interfaces`
    pub fn hierarchy(&self) -> Result<InMemoryClassHierarchy> {
        let mut hierarchy = InMemoryClassHierarchy::new();
        for unit in &self.units {
            for ty in &unit.types {
                hierarchy.declare_type(ty.name.clone(), unit.name.clone());
                for supertype in &ty.supertypes {
                    hierarchy.declare_supertype(ty.name.clone(), supertype.clone());
                }
            }
        }
        for interface in &self.interfaces {
            let key = member(&interface.member)?;
            for implementer in &interface.implementers {
                hierarchy.declare_implementer(&key, implementer.clone());
            }
        }
        Ok(hierarchy)
    }

    /// One work item per declared or observed interface member, sorted
    pub fn work(&self) -> Result<Vec<InterfaceWork>> {
        let mut work: BTreeMap<MemberKey, InterfaceWork> = BTreeMap::new();
        for interface in &self.interfaces {
            let key = member(&interface.member)?;
            work.entry(key.clone())
                .or_insert_with(|| InterfaceWork::new(key));
        }
        for observation in &self.observations {
            let key = member(&observation.interface)?;
            work.entry(key.clone())
                .or_insert_with(|| InterfaceWork::new(key))
                .implementations
                .push(ImplementationWork::new(
                    observation.implementer.clone(),
                    observation.lines.iter().cloned(),
                ));
        }
        Ok(work.into_values().collect())
    }
}

fn member(text: &str) -> Result<MemberKey> {
    parse_member_key(text)
        .map_err(|e| FlowModelError::request(format!("invalid member `{}`: {}", text, e)))
}
