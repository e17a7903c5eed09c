//! In-memory class hierarchy
//!
//! Types are declared together with the compilation unit (library) they
//! belong to. Implementer queries only answer with types from the
//! interface's own unit.

use crate::features::flow_model::MemberKey;
use crate::features::hierarchy::ports::ClassHierarchy;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct InMemoryClassHierarchy {
    /// qualified type → compilation unit
    units: BTreeMap<String, String>,
    /// qualified type → direct supertypes
    parents: BTreeMap<String, BTreeSet<String>>,
    /// (qualified interface type, member name) → implementing types, any unit
    implementers: BTreeMap<(String, String), BTreeSet<String>>,
}

impl InMemoryClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_type(
        &mut self,
        type_name: impl Into<String>,
        unit: impl Into<String>,
    ) -> &mut Self {
        self.units.insert(type_name.into(), unit.into());
        self
    }

    pub fn declare_supertype(
        &mut self,
        type_name: impl Into<String>,
        supertype: impl Into<String>,
    ) -> &mut Self {
        self.parents
            .entry(type_name.into())
            .or_default()
            .insert(supertype.into());
        self
    }

    /// Record that `type_name` provides an implementation of `interface`.
    ///
    /// Also records `interface`'s type as a supertype of `type_name`.
    pub fn declare_implementer(
        &mut self,
        interface: &MemberKey,
        type_name: impl Into<String>,
    ) -> &mut Self {
        let type_name = type_name.into();
        let interface_type = interface.qualified_type();
        self.declare_supertype(type_name.clone(), interface_type.clone());
        self.implementers
            .entry((interface_type, interface.name.clone()))
            .or_default()
            .insert(type_name);
        self
    }

    pub fn unit_of(&self, type_name: &str) -> Option<&str> {
        self.units.get(type_name).map(String::as_str)
    }

    pub fn type_count(&self) -> usize {
        self.units.len()
    }
}

impl ClassHierarchy for InMemoryClassHierarchy {
    fn implementers(&self, interface: &MemberKey) -> Option<BTreeSet<String>> {
        let interface_type = interface.qualified_type();
        let unit = self.unit_of(&interface_type)?;

        let declared = self
            .implementers
            .get(&(interface_type, interface.name.clone()))
            .cloned()
            .unwrap_or_default();

        let (local, foreign): (BTreeSet<String>, BTreeSet<String>) = declared
            .into_iter()
            .partition(|ty| self.unit_of(ty) == Some(unit));
        if !foreign.is_empty() {
            tracing::debug!(
                member = %interface,
                excluded = foreign.len(),
                "implementers outside the compilation unit excluded"
            );
        }
        Some(local)
    }

    fn supertypes(&self, type_name: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([type_name]);
        while let Some(current) = queue.pop_front() {
            for parent in self.parents.get(current).into_iter().flatten() {
                if parent != type_name && seen.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }
        seen
    }
}
