//! Aggregate computation over a matched key set.
//!
//! COUNT reports the cardinality of the set and is always defined. The
//! remaining functions fold over the named attribute of each matched
//! entry, skipping null and absent values; when nothing accumulates they
//! yield null. SUM and AVG require numeric input and normalize through
//! [`Decimal`]; the sum accumulates at full precision and SUM rounds the
//! final result to four places using banker's rounding, while AVG carries
//! the unrounded sum and count. MIN and MAX accept any comparable type except
//! booleans and normalize numeric results to [`Decimal`].

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use cachet_core::{Decimal, Error, KeySet, Result, Value};
use cachet_store::ObjectCache;
use core::fmt;
use rust_decimal::RoundingStrategy;

use crate::ast::predicate::Predicate;

/// Scale the final sum is rounded to.
const SUM_SCALE: u32 = 4;

/// The aggregate function of an [`AggregatePlan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateFunc {
    Sum,
    Average,
    Min,
    Max,
    Count,
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Average => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
            AggregateFunc::Count => "COUNT",
        };
        f.write_str(name)
    }
}

/// An aggregate query: the function, the attribute it folds over, and the
/// child predicate producing the key set.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatePlan {
    pub function: AggregateFunc,
    pub attribute: String,
    pub child: Predicate,
}

impl AggregatePlan {
    pub fn new(function: AggregateFunc, attribute: impl Into<String>, child: Predicate) -> Box<Self> {
        Box::new(AggregatePlan {
            function,
            attribute: attribute.into(),
            child,
        })
    }

    /// Column name of the computed cell, e.g. `SUM(Price)`.
    pub fn column_name(&self) -> String {
        format!("{}({})", self.function, self.attribute)
    }
}

/// Intermediate aggregate state.
///
/// AVG keeps its numerator and denominator separate so partial results can
/// be combined before the final division.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateValue {
    Scalar(Value),
    Average { sum: Decimal, count: u64 },
}

impl AggregateValue {
    /// Collapses the state into the reported value.
    pub fn into_value(self) -> Value {
        match self {
            AggregateValue::Scalar(value) => value,
            AggregateValue::Average { sum, count } => {
                if count == 0 {
                    Value::Null
                } else {
                    Value::Decimal(sum / Decimal::from(count))
                }
            }
        }
    }
}

fn round_sum(sum: Decimal) -> Decimal {
    sum.round_dp_with_strategy(SUM_SCALE, RoundingStrategy::MidpointNearestEven)
}

fn numeric_operand(function: AggregateFunc, value: &Value) -> Result<Option<Decimal>> {
    match value {
        Value::Null => Ok(None),
        _ => match value.to_decimal() {
            Some(decimal) => Ok(Some(decimal)),
            None => {
                let data_type = value.data_type().unwrap_or(cachet_core::DataType::String);
                Err(Error::aggregate_type_mismatch(
                    format!("{function}"),
                    data_type,
                ))
            }
        },
    }
}

/// Computes `function` over `attribute` of the entries named by `keys`.
pub fn compute(
    function: AggregateFunc,
    attribute: &str,
    keys: &KeySet,
    cache: &ObjectCache,
) -> Result<AggregateValue> {
    match function {
        AggregateFunc::Count => Ok(AggregateValue::Scalar(Value::Int64(keys.len() as i64))),
        AggregateFunc::Sum | AggregateFunc::Average => {
            let mut sum = Decimal::ZERO;
            let mut count: u64 = 0;
            for key in keys.iter() {
                let value = match cache.attribute_value(key, attribute) {
                    Some(value) => value,
                    None => continue,
                };
                if let Some(decimal) = numeric_operand(function, value)? {
                    sum += decimal;
                    count += 1;
                }
            }
            if count == 0 {
                return Ok(AggregateValue::Scalar(Value::Null));
            }
            match function {
                AggregateFunc::Sum => Ok(AggregateValue::Scalar(Value::Decimal(round_sum(sum)))),
                _ => Ok(AggregateValue::Average { sum, count }),
            }
        }
        AggregateFunc::Min | AggregateFunc::Max => {
            let mut extreme: Option<Value> = None;
            for key in keys.iter() {
                let value = match cache.attribute_value(key, attribute) {
                    Some(value) if !value.is_null() => value,
                    _ => continue,
                };
                if matches!(value, Value::Bool(_)) {
                    return Err(Error::aggregate_type_mismatch(
                        format!("{function}"),
                        cachet_core::DataType::Bool,
                    ));
                }
                // Numeric candidates compare and report as decimals so
                // mixed integer and float inputs agree on one type.
                let candidate = match value.to_decimal() {
                    Some(decimal) => Value::Decimal(decimal),
                    None => value.clone(),
                };
                extreme = Some(match extreme {
                    None => candidate,
                    Some(current) => {
                        let keep_candidate = match function {
                            AggregateFunc::Min => candidate < current,
                            _ => candidate > current,
                        };
                        if keep_candidate {
                            candidate
                        } else {
                            current
                        }
                    }
                });
            }
            Ok(AggregateValue::Scalar(extreme.unwrap_or(Value::Null)))
        }
    }
}
