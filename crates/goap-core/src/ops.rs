use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;

use crate::value::Numeric;
use crate::{GoapError, Result, Value};

/// How a condition compares a state value with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Comparison {
    EqualTo,
    NotEqualTo,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
}

impl Comparison {
    pub const ALL: [Comparison; 6] = [
        Comparison::EqualTo,
        Comparison::NotEqualTo,
        Comparison::LessThan,
        Comparison::GreaterThan,
        Comparison::LessThanOrEqualTo,
        Comparison::GreaterThanOrEqualTo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::EqualTo => "EqualTo",
            Comparison::NotEqualTo => "NotEqualTo",
            Comparison::LessThan => "LessThan",
            Comparison::GreaterThan => "GreaterThan",
            Comparison::LessThanOrEqualTo => "LessThanOrEqualTo",
            Comparison::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::EqualTo => "==",
            Comparison::NotEqualTo => "!=",
            Comparison::LessThan => "<",
            Comparison::GreaterThan => ">",
            Comparison::LessThanOrEqualTo => "<=",
            Comparison::GreaterThanOrEqualTo => ">=",
        }
    }

    /// Compare `value` against `target`.
    pub fn is_met(self, value: &Value, target: &Value) -> Result<bool> {
        Ok(match self {
            Comparison::EqualTo => value.try_eq(target)?,
            Comparison::NotEqualTo => !value.try_eq(target)?,
            Comparison::LessThan => value.try_cmp(target)? == Ordering::Less,
            Comparison::GreaterThan => value.try_cmp(target)? == Ordering::Greater,
            Comparison::LessThanOrEqualTo => value.try_cmp(target)? != Ordering::Greater,
            Comparison::GreaterThanOrEqualTo => value.try_cmp(target)? != Ordering::Less,
        })
    }

    /// True if the comparison holds for `value`, or `value` is strictly closer to satisfying it
    /// than `previous` was.
    ///
    /// Equality comparisons measure absolute numeric distance to `target` (exactly, for integers
    /// and decimals); ordering comparisons only look at the direction of change from `previous`.
    pub fn is_met_or_closer(self, target: &Value, value: &Value, previous: &Value) -> Result<bool> {
        if self.is_met(value, target)? {
            return Ok(true);
        }
        Ok(match self {
            Comparison::EqualTo => value.cmp_distance(previous, target)? == Ordering::Less,
            Comparison::NotEqualTo => value.cmp_distance(previous, target)? == Ordering::Greater,
            Comparison::LessThan | Comparison::LessThanOrEqualTo => {
                value.try_cmp(previous)? == Ordering::Less
            }
            Comparison::GreaterThan | Comparison::GreaterThanOrEqualTo => {
                value.try_cmp(previous)? == Ordering::Greater
            }
        })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = GoapError;

    /// Accepts the variant name (`GreaterThan`), its snake_case form (`greater_than`) or the
    /// operator symbol (`>`).
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        Comparison::ALL
            .into_iter()
            .find(|c| {
                tag == c.symbol()
                    || tag == c.as_str()
                    || tag.eq_ignore_ascii_case(&snake_case(c.as_str()))
            })
            .ok_or_else(|| GoapError::UnsupportedComparison(tag.to_string()))
    }
}

/// How an effect (or a state-operation value) combines a state value with an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    SetTo,
    IncreaseBy,
    DecreaseBy,
    MultiplyBy,
    DivideBy,
    ModuloBy,
    ExponentiateBy,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::SetTo,
        Operation::IncreaseBy,
        Operation::DecreaseBy,
        Operation::MultiplyBy,
        Operation::DivideBy,
        Operation::ModuloBy,
        Operation::ExponentiateBy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::SetTo => "SetTo",
            Operation::IncreaseBy => "IncreaseBy",
            Operation::DecreaseBy => "DecreaseBy",
            Operation::MultiplyBy => "MultiplyBy",
            Operation::DivideBy => "DivideBy",
            Operation::ModuloBy => "ModuloBy",
            Operation::ExponentiateBy => "ExponentiateBy",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::SetTo => "=",
            Operation::IncreaseBy => "+=",
            Operation::DecreaseBy => "-=",
            Operation::MultiplyBy => "*=",
            Operation::DivideBy => "/=",
            Operation::ModuloBy => "%=",
            Operation::ExponentiateBy => "^=",
        }
    }

    /// Combine `current` with `operand`.
    ///
    /// `ExponentiateBy` works in `f64` and always yields a float; bool or absent operands are a
    /// [`GoapError::TypeMismatch`].
    pub fn apply(self, current: &Value, operand: &Value) -> Result<Value> {
        let op = self.as_str();
        match self {
            Operation::SetTo => Ok(operand.clone()),
            Operation::ExponentiateBy => {
                let mismatch = || GoapError::TypeMismatch {
                    op,
                    lhs: current.type_name(),
                    rhs: operand.type_name(),
                };
                let base = current.as_f64().ok_or_else(mismatch)?;
                let exp = operand.as_f64().ok_or_else(mismatch)?;
                Ok(Value::Float(base.powf(exp)))
            }
            Operation::IncreaseBy => {
                if let (Value::Str(a), Value::Str(b)) = (current, operand) {
                    return Ok(Value::Str(format!("{a}{b}")));
                }
                arithmetic(
                    Numeric::promote(current, operand, op)?,
                    op,
                    i64::checked_add,
                    |a, b| a + b,
                    Decimal::checked_add,
                )
            }
            Operation::DecreaseBy => arithmetic(
                Numeric::promote(current, operand, op)?,
                op,
                i64::checked_sub,
                |a, b| a - b,
                Decimal::checked_sub,
            ),
            Operation::MultiplyBy => arithmetic(
                Numeric::promote(current, operand, op)?,
                op,
                i64::checked_mul,
                |a, b| a * b,
                Decimal::checked_mul,
            ),
            Operation::DivideBy => {
                let pair = Numeric::promote(current, operand, op)?;
                reject_zero_divisor(pair)?;
                arithmetic(pair, op, i64::checked_div, |a, b| a / b, Decimal::checked_div)
            }
            Operation::ModuloBy => {
                let pair = Numeric::promote(current, operand, op)?;
                reject_zero_divisor(pair)?;
                arithmetic(pair, op, i64::checked_rem, |a, b| a % b, Decimal::checked_rem)
            }
        }
    }
}

fn reject_zero_divisor(pair: Numeric) -> Result<()> {
    match pair {
        Numeric::Int(_, 0) => Err(GoapError::DivisionByZero),
        Numeric::Decimal(_, d) if d.is_zero() => Err(GoapError::DivisionByZero),
        // Floats follow IEEE-754 (inf / NaN).
        _ => Ok(()),
    }
}

fn arithmetic(
    pair: Numeric,
    op: &'static str,
    int: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
    decimal: fn(Decimal, Decimal) -> Option<Decimal>,
) -> Result<Value> {
    match pair {
        Numeric::Int(a, b) => int(a, b)
            .map(Value::Int)
            .ok_or(GoapError::Overflow { op }),
        Numeric::Float(a, b) => Ok(Value::Float(float(a, b))),
        Numeric::Decimal(a, b) => decimal(a, b)
            .map(Value::Decimal)
            .ok_or(GoapError::Overflow { op }),
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = GoapError;

    /// Accepts the variant name (`IncreaseBy`), its snake_case form (`increase_by`) or the
    /// compound-assignment symbol (`+=`).
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim();
        Operation::ALL
            .into_iter()
            .find(|o| {
                tag == o.symbol()
                    || tag == o.as_str()
                    || tag.eq_ignore_ascii_case(&snake_case(o.as_str()))
            })
            .ok_or_else(|| GoapError::UnsupportedOperation(tag.to_string()))
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Comparison, Operation};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Comparison {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> Deserialize<'de> for Comparison {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let tag = String::deserialize(deserializer)?;
            tag.parse().map_err(D::Error::custom)
        }
    }

    impl Serialize for Operation {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> Deserialize<'de> for Operation {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let tag = String::deserialize(deserializer)?;
            tag.parse().map_err(D::Error::custom)
        }
    }
}
