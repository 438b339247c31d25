//! Data type definitions for cached attribute values.

use core::fmt;

/// The data type of an attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean
    Bool,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point
    Float64,
    /// Fixed-precision decimal
    Decimal,
    /// UTF-8 string
    String,
    /// Single Unicode scalar value
    Char,
    /// DateTime stored as a Unix timestamp in milliseconds
    DateTime,
}

impl DataType {
    /// Returns true for the numeric types that aggregate functions accept.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int32 | DataType::Int64 | DataType::Float64 | DataType::Decimal
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "Bool",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Float64 => "Float64",
            DataType::Decimal => "Decimal",
            DataType::String => "String",
            DataType::Char => "Char",
            DataType::DateTime => "DateTime",
        };
        f.write_str(name)
    }
}
