//! Member identity independent of the implementing class

use serde::{Deserialize, Serialize};
use std::fmt;

/// Erased parameter type list, e.g. `(String,int)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    params: Vec<String>,
}

impl Signature {
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `(A,B)`; `()` is the empty parameter list.
    ///
    /// Returns `None` when the text is not parenthesized or holds an
    /// empty parameter name.
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.strip_prefix('(')?.strip_suffix(')')?;
        if inner.trim().is_empty() {
            return Some(Self { params: Vec::new() });
        }
        let params: Vec<String> = inner.split(',').map(|p| p.trim().to_string()).collect();
        if params.iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(Self { params })
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.params.join(","))
    }
}

/// Identifies a callable member: (package, type, subtypes, name, signature)
///
/// `signature = None` denotes the whole overload set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey {
    pub package: String,
    pub type_name: String,
    pub subtypes: bool,
    pub name: String,
    pub signature: Option<Signature>,
}

impl MemberKey {
    pub fn new(
        package: impl Into<String>,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
            subtypes: false,
            name: name.into(),
            signature: None,
        }
    }

    pub fn with_subtypes(mut self, subtypes: bool) -> Self {
        self.subtypes = subtypes;
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Dotted type name as used in synthetic field owners: `p.Outer$Inner`
    pub fn qualified_type(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        }
    }

    /// Parameter count, `None` for an overload set
    pub fn arity(&self) -> Option<usize> {
        self.signature.as_ref().map(Signature::arity)
    }

    /// Same package, type, name and signature, ignoring the subtypes flag
    pub fn same_member(&self, other: &MemberKey) -> bool {
        self.package == other.package
            && self.type_name == other.type_name
            && self.name == other.name
            && self.signature == other.signature
    }

    /// Key with the subtypes flag cleared (neutral models carry none)
    pub fn exact(&self) -> Self {
        Self {
            subtypes: false,
            ..self.clone()
        }
    }

    /// Same member declared on another type, given as a dotted qualified name
    pub fn on_type(&self, qualified_type: &str) -> Self {
        let (package, type_name) = qualified_type
            .rsplit_once('.')
            .unwrap_or(("", qualified_type));
        Self {
            package: package.to_string(),
            type_name: type_name.to_string(),
            subtypes: false,
            ..self.clone()
        }
    }

    pub(crate) fn signature_text(&self) -> String {
        self.signature
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{}",
            self.package,
            self.type_name,
            self.subtypes,
            self.name,
            self.signature_text()
        )
    }
}
