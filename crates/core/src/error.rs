//! Error types for query evaluation.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for Cachet operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for predicate evaluation and result materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A referenced attribute has no backing index.
    AttributeIndexNotDefined {
        attribute: String,
    },
    /// A referenced type has no backing index.
    TypeIndexNotDefined {
        type_name: String,
    },
    /// A functor referenced a member the cached object does not have.
    MissingMember {
        type_name: String,
        member: String,
    },
    /// Malformed query input.
    InvalidArgument {
        message: String,
    },
    /// An aggregate function was applied to a value of an unsupported type.
    AggregateTypeMismatch {
        function: String,
        data_type: DataType,
    },
    /// Two result columns share the same name.
    DuplicateColumn {
        name: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AttributeIndexNotDefined { attribute } => {
                write!(f, "Index is not defined for attribute '{}'", attribute)
            }
            Error::TypeIndexNotDefined { type_name } => {
                write!(f, "Index is not defined for type '{}'", type_name)
            }
            Error::MissingMember { type_name, member } => {
                write!(f, "Type '{}' has no member '{}'", type_name, member)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            Error::AggregateTypeMismatch {
                function,
                data_type,
            } => {
                write!(
                    f,
                    "{} cannot be applied to values of type {}",
                    function, data_type
                )
            }
            Error::DuplicateColumn { name } => {
                write!(f, "Duplicate column name: {}", name)
            }
        }
    }
}

impl Error {
    /// Creates an attribute-index-not-defined error.
    pub fn attribute_index_not_defined(attribute: impl Into<String>) -> Self {
        Error::AttributeIndexNotDefined {
            attribute: attribute.into(),
        }
    }

    /// Creates a type-index-not-defined error.
    pub fn type_index_not_defined(type_name: impl Into<String>) -> Self {
        Error::TypeIndexNotDefined {
            type_name: type_name.into(),
        }
    }

    /// Creates a missing-member error.
    pub fn missing_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Error::MissingMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an aggregate type mismatch error.
    pub fn aggregate_type_mismatch(function: impl Into<String>, data_type: DataType) -> Self {
        Error::AggregateTypeMismatch {
            function: function.into(),
            data_type,
        }
    }

    /// Creates a duplicate-column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Error::DuplicateColumn { name: name.into() }
    }
}
