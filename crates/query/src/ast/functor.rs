//! Value extraction from candidate objects.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use cachet_core::{CacheEntry, Result, Value};

/// A value-extraction expression evaluated against a candidate object.
///
/// Functors are side-effect-free and deterministic: the same entry always
/// yields the same value. Member access resolves through the entry's
/// attribute map and fails with `MissingMember` when the member does not
/// exist. Composition chains member accesses into a dotted path, matching
/// how nested members are stored ("Address.City").
#[derive(Clone, Debug, PartialEq)]
pub enum Functor {
    /// Accesses a member by name.
    Member(String),
    /// Composition: the outer functor applied to the inner functor's target.
    Composite(Box<Functor>, Box<Functor>),
}

impl Functor {
    /// Creates a member-access functor.
    pub fn member(name: impl Into<String>) -> Self {
        Functor::Member(name.into())
    }

    /// Composes two functors; `outer` is applied to what `inner` reaches.
    pub fn compose(outer: Functor, inner: Functor) -> Self {
        Functor::Composite(Box::new(outer), Box::new(inner))
    }

    /// Returns the attribute path this functor reads.
    pub fn attribute_name(&self) -> String {
        match self {
            Functor::Member(name) => name.clone(),
            Functor::Composite(outer, inner) => {
                format!("{}.{}", inner.attribute_name(), outer.attribute_name())
            }
        }
    }

    /// Extracts the value from a candidate entry.
    pub fn evaluate(&self, entry: &CacheEntry) -> Result<Value> {
        match self {
            Functor::Member(name) => entry.attribute(name).cloned(),
            Functor::Composite(..) => entry.attribute(&self.attribute_name()).cloned(),
        }
    }
}
