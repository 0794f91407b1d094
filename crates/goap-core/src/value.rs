use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GoapError, Result};

/// A dynamically-typed scalar stored under a state key.
///
/// Equality and hashing are structural: `Int(1)` and `Float(1.0)` are different snapshot values.
/// Semantic comparison (with numeric promotion) goes through [`crate::Comparison`].
///
/// With the `serde` feature, values (de)serialize untagged: `null`, booleans, integers, floats,
/// numeric strings (decimals) and plain strings.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Str(_) => "string",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; decimals are converted lossily.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Natural ordering between two values of compatible runtime types.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering> {
        let unordered = || GoapError::Unordered {
            lhs: self.type_name(),
            rhs: other.type_name(),
        };
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            _ => match Numeric::promote(self, other, "comparison")? {
                Numeric::Int(a, b) => Ok(a.cmp(&b)),
                Numeric::Float(a, b) => a.partial_cmp(&b).ok_or_else(unordered),
                Numeric::Decimal(a, b) => Ok(a.cmp(&b)),
            },
        }
    }

    /// Semantic equality: `Absent` only equals `Absent`, numerics compare after promotion.
    pub fn try_eq(&self, other: &Value) -> Result<bool> {
        if self.is_absent() || other.is_absent() {
            return Ok(self.is_absent() && other.is_absent());
        }
        Ok(self.try_cmp(other)? == Ordering::Equal)
    }

    /// Orders `self` and `other` by their absolute distance to `target`.
    ///
    /// Integers and decimals are measured exactly; only pairs involving a float go through `f64`.
    pub fn cmp_distance(&self, other: &Value, target: &Value) -> Result<Ordering> {
        let lhs = Distance::between(self, target)?;
        let rhs = Distance::between(other, target)?;
        lhs.try_cmp(rhs).ok_or(GoapError::Unordered {
            lhs: self.type_name(),
            rhs: other.type_name(),
        })
    }
}

/// `|value - target|` in the widest exact domain the operands allow.
#[derive(Debug, Clone, Copy)]
enum Distance {
    Int(i128),
    Decimal(Decimal),
    Float(f64),
}

impl Distance {
    fn between(value: &Value, target: &Value) -> Result<Self> {
        for side in [value, target] {
            if !side.is_numeric() {
                return Err(GoapError::NotNumeric(side.type_name()));
            }
        }
        let lossy = || {
            let a = value.as_f64().unwrap_or(f64::NAN);
            let b = target.as_f64().unwrap_or(f64::NAN);
            Distance::Float((a - b).abs())
        };
        Ok(match Numeric::promote(value, target, "distance") {
            Ok(Numeric::Int(a, b)) => Distance::Int((i128::from(a) - i128::from(b)).abs()),
            Ok(Numeric::Decimal(a, b)) => a
                .checked_sub(b)
                .map(|diff| Distance::Decimal(diff.abs()))
                .unwrap_or_else(lossy),
            Ok(Numeric::Float(a, b)) => Distance::Float((a - b).abs()),
            // Float against decimal has no exact common domain.
            Err(_) => lossy(),
        })
    }

    fn as_f64(self) -> f64 {
        match self {
            Distance::Int(d) => d as f64,
            Distance::Decimal(d) => d.to_f64().unwrap_or(f64::INFINITY),
            Distance::Float(d) => d,
        }
    }

    fn try_cmp(self, other: Self) -> Option<Ordering> {
        let exact = |int: i128, decimal: Decimal| {
            Decimal::from_i128(int).map(|int| int.cmp(&decimal))
        };
        let ordering = match (self, other) {
            (Distance::Int(a), Distance::Int(b)) => Some(a.cmp(&b)),
            (Distance::Decimal(a), Distance::Decimal(b)) => Some(a.cmp(&b)),
            (Distance::Int(a), Distance::Decimal(b)) => exact(a, b),
            (Distance::Decimal(a), Distance::Int(b)) => exact(b, a).map(Ordering::reverse),
            _ => None,
        };
        ordering.or_else(|| self.as_f64().partial_cmp(&other.as_f64()))
    }
}

/// A numeric operand pair after type promotion.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Numeric {
    Int(i64, i64),
    Float(f64, f64),
    Decimal(Decimal, Decimal),
}

impl Numeric {
    pub(crate) fn promote(lhs: &Value, rhs: &Value, op: &'static str) -> Result<Self> {
        let mismatch = || GoapError::TypeMismatch {
            op,
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        };
        Ok(match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Numeric::Int(*a, *b),
            (Value::Int(a), Value::Float(b)) => Numeric::Float(*a as f64, *b),
            (Value::Float(a), Value::Int(b)) => Numeric::Float(*a, *b as f64),
            (Value::Float(a), Value::Float(b)) => Numeric::Float(*a, *b),
            (Value::Int(a), Value::Decimal(b)) => Numeric::Decimal(Decimal::from(*a), *b),
            (Value::Decimal(a), Value::Int(b)) => Numeric::Decimal(*a, Decimal::from(*b)),
            (Value::Decimal(a), Value::Decimal(b)) => Numeric::Decimal(*a, *b),
            _ => return Err(mismatch()),
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_bits(*a) == float_bits(*b),
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Absent => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => float_bits(*f).hash(state),
            // `normalize` strips trailing zeros so 1.0 and 1.00 hash alike, matching `==`.
            Value::Decimal(d) => d.normalize().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

// -0.0 and 0.0 are the same state; all NaNs collapse to one pattern.
fn float_bits(f: f64) -> u64 {
    if f == 0.0 {
        0
    } else if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("absent"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident via $conv:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant($conv(value))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool via core::convert::identity,
    i8 => Int via i64::from,
    i16 => Int via i64::from,
    i32 => Int via i64::from,
    i64 => Int via core::convert::identity,
    u8 => Int via i64::from,
    u16 => Int via i64::from,
    u32 => Int via i64::from,
    f32 => Float via f64::from,
    f64 => Float via core::convert::identity,
    Decimal => Decimal via core::convert::identity,
    String => Str via core::convert::identity,
    &str => Str via str::to_owned,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Absent)
    }
}
