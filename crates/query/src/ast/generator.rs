//! Constant and parameter value producers.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use cachet_core::{Error, Result, Value};

/// A parameter binding supplied at execution time.
///
/// `List` bindings are consumed positionally: each resolution of the same
/// parameter name pops the next element, so a query that references the
/// parameter N times must be supplied at least N list elements.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Single(Value),
    List(Vec<Value>),
}

/// Named parameter bindings for one execution.
#[derive(Clone, Debug, Default)]
pub struct AttributeValues {
    bindings: BTreeMap<String, ParamValue>,
}

impl AttributeValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a single value under `name`.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), ParamValue::Single(value));
    }

    /// Binds a positional list under `name`.
    pub fn set_list(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.bindings.insert(name.into(), ParamValue::List(values));
    }

    /// Resolves the next value bound to `name`.
    ///
    /// Single bindings resolve to the same value every time; list bindings
    /// are drained front to back. An unbound name or an exhausted list is
    /// an argument error.
    pub fn resolve(&mut self, name: &str) -> Result<Value> {
        match self.bindings.get_mut(name) {
            Some(ParamValue::Single(value)) => Ok(value.clone()),
            Some(ParamValue::List(values)) => {
                if values.is_empty() {
                    Err(Error::invalid_argument(alloc::format!(
                        "no value left for parameter '{name}'"
                    )))
                } else {
                    Ok(values.remove(0))
                }
            }
            None => Err(Error::invalid_argument(alloc::format!(
                "no value bound for parameter '{name}'"
            ))),
        }
    }
}

/// A value producer that never consults the candidate object.
#[derive(Clone, Debug, PartialEq)]
pub enum Generator {
    /// A literal embedded in the query.
    Literal(Value),
    /// A named parameter resolved from [`AttributeValues`].
    Parameter(String),
    /// The always-true sentinel produced by constant folding.
    True,
    /// The always-false sentinel produced by constant folding.
    False,
}

impl Generator {
    pub fn literal(value: impl Into<Value>) -> Self {
        Generator::Literal(value.into())
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Generator::Parameter(name.into())
    }

    /// Produces the value, resolving parameters against `values`.
    pub fn evaluate(&self, values: &mut AttributeValues) -> Result<Value> {
        match self {
            Generator::Literal(value) => Ok(value.clone()),
            Generator::Parameter(name) => values.resolve(name),
            Generator::True => Ok(Value::Bool(true)),
            Generator::False => Ok(Value::Bool(false)),
        }
    }
}
