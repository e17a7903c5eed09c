//! Soundness filter
//!
//! A synthetic field names implementation-private state when its declaring
//! type is one of the in-unit implementers, or a supertype only some of them
//! inherit. Fields of the interface, of a supertype shared by every
//! implementer, or of types outside the implementers' hierarchy (argument
//! and return types) may appear in an interface-level model.

use crate::features::flow_model::MemberKey;
use crate::features::hierarchy::ClassHierarchy;
use crate::features::lifting::domain::Shape;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct SoundnessFilter {
    shared_owners: BTreeSet<String>,
    implementation_owners: BTreeSet<String>,
}

impl SoundnessFilter {
    /// Owners visible through `interface` for the given implementers
    pub fn for_interface<H>(
        hierarchy: &H,
        interface: &MemberKey,
        implementers: &BTreeSet<String>,
    ) -> Self
    where
        H: ClassHierarchy + ?Sized,
    {
        let mut common: Option<BTreeSet<String>> = None;
        let mut inherited = BTreeSet::new();
        for implementer in implementers {
            let supertypes = hierarchy.supertypes(implementer);
            inherited.extend(supertypes.iter().cloned());
            common = Some(match common {
                None => supertypes,
                Some(acc) => acc.intersection(&supertypes).cloned().collect(),
            });
        }

        let mut shared_owners = common.unwrap_or_default();
        shared_owners.insert(interface.qualified_type());

        let implementation_owners = inherited
            .into_iter()
            .chain(implementers.iter().cloned())
            .filter(|owner| !shared_owners.contains(owner))
            .collect();
        Self {
            shared_owners,
            implementation_owners,
        }
    }

    pub fn shared_owners(&self) -> &BTreeSet<String> {
        &self.shared_owners
    }

    /// Field owners of `shape` that belong to some implementations only
    pub fn private_owners(&self, shape: &Shape) -> BTreeSet<String> {
        shape
            .field_owners()
            .into_iter()
            .filter(|owner| self.implementation_owners.contains(*owner))
            .map(str::to_string)
            .collect()
    }

    pub fn is_sound(&self, shape: &Shape) -> bool {
        self.private_owners(shape).is_empty()
    }
}
