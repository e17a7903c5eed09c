/*
 * Class Hierarchy Port
 *
 * The lifting engine never walks bytecode or source itself. It asks this
 * port two questions:
 *
 *   implementers(member)  -> every concrete type of the member's own
 *                            compilation unit that implements it
 *   supertypes(type)      -> transitive ancestors of a type
 *
 * Implementers living in other compilation units (other libraries) are never
 * returned; their behavior must not influence the unit's models.
 */

use crate::features::flow_model::MemberKey;
use std::collections::BTreeSet;

pub trait ClassHierarchy: Send + Sync {
    /// Complete set of in-unit implementing types for an interface member.
    ///
    /// `None` when the interface type itself is unknown.
    fn implementers(&self, interface: &MemberKey) -> Option<BTreeSet<String>>;

    /// Transitive supertypes of `type_name`, excluding the type itself
    fn supertypes(&self, type_name: &str) -> BTreeSet<String>;
}

impl<T: ClassHierarchy + ?Sized> ClassHierarchy for std::sync::Arc<T> {
    fn implementers(&self, interface: &MemberKey) -> Option<BTreeSet<String>> {
        (**self).implementers(interface)
    }

    fn supertypes(&self, type_name: &str) -> BTreeSet<String> {
        (**self).supertypes(type_name)
    }
}
