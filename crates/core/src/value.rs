//! Runtime attribute values.
//!
//! This module defines the `Value` enum, the closed tagged representation of
//! every value a cached attribute (or query operand) can take. Values carry a
//! total cross-type ordering so that index lookups, sorting, and grouping can
//! compare mixed numeric types directly.

use crate::types::DataType;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// A runtime attribute value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// Fixed-precision decimal
    Decimal(Decimal),
    /// UTF-8 string
    String(String),
    /// Single Unicode scalar value
    Char(char),
    /// DateTime stored as a Unix timestamp in milliseconds
    DateTime(i64),
}

impl Value {
    /// Returns the data type of this value, or None if it's Null.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(DataType::Bool),
            Value::Int32(_) => Some(DataType::Int32),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::String(_) => Some(DataType::String),
            Value::Char(_) => Some(DataType::Char),
            Value::DateTime(_) => Some(DataType::DateTime),
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Converts a numeric value to a decimal.
    ///
    /// Returns None for non-numeric values and for non-finite floats.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int32(v) => Some(Decimal::from(*v)),
            Value::Int64(v) => Some(Decimal::from(*v)),
            Value::Float64(v) => Decimal::from_f64(*v),
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true if the value is numeric (Int32, Int64, Float64, Decimal).
    pub fn is_numeric(&self) -> bool {
        self.data_type().map(|dt| dt.is_numeric()).unwrap_or(false)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int64(b)) => (*a as i64).cmp(b),
            (Value::Int64(a), Value::Int32(b)) => a.cmp(&(*b as i64)),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::Int32(a), Value::Decimal(b)) => Decimal::from(*a).cmp(b),
            (Value::Decimal(a), Value::Int32(b)) => a.cmp(&Decimal::from(*b)),
            (Value::Int64(a), Value::Decimal(b)) => Decimal::from(*a).cmp(b),
            (Value::Decimal(a), Value::Int64(b)) => a.cmp(&Decimal::from(*b)),
            // Floats compare through f64; NaN sorts above every other value.
            (Value::Float64(a), Value::Float64(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            },
            (Value::Int32(a), Value::Float64(b)) => cmp_int_float(*a as f64, *b),
            (Value::Float64(a), Value::Int32(b)) => cmp_int_float(*b as f64, *a).reverse(),
            (Value::Int64(a), Value::Float64(b)) => cmp_int_float(*a as f64, *b),
            (Value::Float64(a), Value::Int64(b)) => cmp_int_float(*b as f64, *a).reverse(),
            (Value::Decimal(a), Value::Float64(b)) => match Decimal::from_f64(*b) {
                Some(b) => a.cmp(&b),
                None => Ordering::Less,
            },
            (Value::Float64(a), Value::Decimal(b)) => match Decimal::from_f64(*a) {
                Some(a) => a.cmp(b),
                None => Ordering::Greater,
            },
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            // Different incomparable types: order by type rank.
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

/// Compares an integer (widened to f64) against a float; NaN sorts above.
fn cmp_int_float(a: f64, b: f64) -> Ordering {
    if b.is_nan() {
        Ordering::Less
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

impl Value {
    /// Returns a type ordering rank for comparing values of different types.
    fn type_order(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int32(_) => 2,
            Value::Int64(_) => 3,
            Value::Float64(_) => 4,
            Value::Decimal(_) => 5,
            Value::Char(_) => 6,
            Value::String(_) => 7,
            Value::DateTime(_) => 8,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}
