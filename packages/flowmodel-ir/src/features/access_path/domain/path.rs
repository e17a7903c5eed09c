//! Access paths
//!
//! An access path is an anchor followed by zero or more content segments,
//! e.g. `Argument[-1].SyntheticField[p.A.foo]`. The constructors below keep
//! that shape as an invariant, so every `AccessPath` value is well-formed.

use super::segment::AccessPathSegment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered chain of segments, anchor first
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessPath {
    segments: Vec<AccessPathSegment>,
}

impl AccessPath {
    /// Path anchored at a segment that must be an anchor.
    ///
    /// Returns `None` for content segments; use the parser for text input.
    pub fn anchored(anchor: AccessPathSegment) -> Option<Self> {
        anchor.is_anchor().then(|| Self {
            segments: vec![anchor],
        })
    }

    /// `Argument[n]`
    pub fn argument(index: u32) -> Self {
        Self {
            segments: vec![AccessPathSegment::ArgumentIndex(index)],
        }
    }

    /// `Argument[-1]`
    pub fn qualifier() -> Self {
        Self {
            segments: vec![AccessPathSegment::Qualifier],
        }
    }

    /// `Argument[this]`
    pub fn this() -> Self {
        Self {
            segments: vec![AccessPathSegment::ThisReference],
        }
    }

    /// `ReturnValue`
    pub fn return_value() -> Self {
        Self {
            segments: vec![AccessPathSegment::ReturnValue],
        }
    }

    /// Append `.Element`
    pub fn element(self) -> Self {
        self.push_content(AccessPathSegment::Element)
    }

    /// Append `.MapKey`
    pub fn map_key(self) -> Self {
        self.push_content(AccessPathSegment::MapKey)
    }

    /// Append `.MapValue`
    pub fn map_value(self) -> Self {
        self.push_content(AccessPathSegment::MapValue)
    }

    /// Append `.SyntheticField[owner.name]`
    pub fn synthetic_field(self, owner: impl Into<String>, name: impl Into<String>) -> Self {
        self.push_content(AccessPathSegment::synthetic_field(owner, name))
    }

    fn push_content(mut self, segment: AccessPathSegment) -> Self {
        debug_assert!(!segment.is_anchor());
        self.segments.push(segment);
        self
    }

    /// Assemble from already-validated segments (parser only)
    pub(crate) fn from_segments_unchecked(segments: Vec<AccessPathSegment>) -> Self {
        debug_assert!(segments.first().is_some_and(AccessPathSegment::is_anchor));
        debug_assert!(segments.iter().skip(1).all(|s| !s.is_anchor()));
        Self { segments }
    }

    /// All segments, anchor first
    pub fn segments(&self) -> &[AccessPathSegment] {
        &self.segments
    }

    /// The flow anchor
    pub fn anchor(&self) -> &AccessPathSegment {
        &self.segments[0]
    }

    /// Content refinements after the anchor
    pub fn content(&self) -> &[AccessPathSegment] {
        &self.segments[1..]
    }

    /// Argument index when anchored at `Argument[n]`
    pub fn argument_index(&self) -> Option<u32> {
        match self.anchor() {
            AccessPathSegment::ArgumentIndex(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_receiver(&self) -> bool {
        self.anchor().is_receiver()
    }

    pub fn is_return_value(&self) -> bool {
        matches!(self.anchor(), AccessPathSegment::ReturnValue)
    }

    /// Number of container segments (`Element`, `MapKey`, `MapValue`)
    pub fn container_depth(&self) -> usize {
        self.content().iter().filter(|s| s.is_container()).count()
    }

    /// `(declaring type, field name)` of every synthetic field on the path
    pub fn synthetic_fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.segments
            .iter()
            .filter_map(AccessPathSegment::as_synthetic_field)
    }

    pub fn has_synthetic_field(&self) -> bool {
        self.synthetic_fields().next().is_some()
    }

    /// Same path with a receiver anchor spelled as `Argument[this]`.
    ///
    /// `Argument[-1]` and `Argument[this]` denote the same position.
    pub fn with_canonical_receiver(&self) -> Self {
        let mut segments = self.segments.clone();
        if segments[0] == AccessPathSegment::Qualifier {
            segments[0] = AccessPathSegment::ThisReference;
        }
        Self { segments }
    }

    /// Same path with every synthetic field owner replaced by `placeholder`
    pub fn with_erased_field_owners(&self, placeholder: &str) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|segment| match segment {
                AccessPathSegment::SyntheticField { name, .. } => {
                    AccessPathSegment::synthetic_field(placeholder, name.clone())
                }
                other => other.clone(),
            })
            .collect();
        Self { segments }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<AccessPath> for String {
    fn from(path: AccessPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let path = AccessPath::qualifier().synthetic_field("p.A", "foo");
        assert_eq!(path.to_string(), "Argument[-1].SyntheticField[p.A.foo]");
        assert!(path.is_receiver());
        assert!(path.has_synthetic_field());
        assert_eq!(path.container_depth(), 0);

        let path = AccessPath::return_value().element();
        assert_eq!(path.to_string(), "ReturnValue.Element");
        assert_eq!(path.container_depth(), 1);
    }

    #[test]
    fn test_anchored_rejects_content() {
        assert!(AccessPath::anchored(AccessPathSegment::Element).is_none());
        assert_eq!(
            AccessPath::anchored(AccessPathSegment::ArgumentIndex(2)).unwrap(),
            AccessPath::argument(2)
        );
    }

    #[test]
    fn test_canonical_receiver() {
        let qualifier = AccessPath::qualifier().element();
        let this = AccessPath::this().element();
        assert_ne!(qualifier, this);
        assert_eq!(qualifier.with_canonical_receiver(), this);
        assert_eq!(
            AccessPath::argument(0).with_canonical_receiver(),
            AccessPath::argument(0)
        );
    }

    #[test]
    fn test_erased_field_owners() {
        let a = AccessPath::this().synthetic_field("p.A", "foo");
        let b = AccessPath::this().synthetic_field("p.B", "foo");
        assert_ne!(a, b);
        assert_eq!(a.with_erased_field_owners("*"), b.with_erased_field_owners("*"));
    }

    #[test]
    fn test_synthetic_fields_iter() {
        let path = AccessPath::argument(0)
            .synthetic_field("p.A", "x")
            .element()
            .synthetic_field("p.B", "y");
        let fields: Vec<_> = path.synthetic_fields().collect();
        assert_eq!(fields, vec![("p.A", "x"), ("p.B", "y")]);
    }
}
