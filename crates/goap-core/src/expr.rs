use core::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{Operation, Result, StateKey, Value, WorldState};

/// Computes a value from a snapshot; used for sensors and other externally-sourced values.
pub type Accessor<K> = Arc<dyn Fn(&WorldState<K>) -> Value + Send + Sync>;

/// An expression evaluated against a state snapshot.
#[derive(Clone)]
pub enum ValueExpr<K: StateKey> {
    /// A fixed value.
    Constant(Value),
    /// The current value of a state key.
    State(K),
    /// The current value of a state key combined with an operand.
    StateOp {
        key: K,
        operation: Operation,
        operand: Box<ValueExpr<K>>,
    },
    /// A value computed by the owning application.
    Dynamic(Accessor<K>),
}

impl<K: StateKey> ValueExpr<K> {
    pub fn constant(value: impl Into<Value>) -> Self {
        ValueExpr::Constant(value.into())
    }

    pub fn state(key: K) -> Self {
        ValueExpr::State(key)
    }

    pub fn state_op(key: K, operation: Operation, operand: impl Into<ValueExpr<K>>) -> Self {
        ValueExpr::StateOp {
            key,
            operation,
            operand: Box::new(operand.into()),
        }
    }

    pub fn dynamic(accessor: impl Fn(&WorldState<K>) -> Value + Send + Sync + 'static) -> Self {
        ValueExpr::Dynamic(Arc::new(accessor))
    }

    pub fn evaluate(&self, state: &WorldState<K>) -> Result<Value> {
        match self {
            ValueExpr::Constant(value) => Ok(value.clone()),
            ValueExpr::State(key) => Ok(state.get(key).clone()),
            ValueExpr::StateOp {
                key,
                operation,
                operand,
            } => operation.apply(state.get(key), &operand.evaluate(state)?),
            ValueExpr::Dynamic(accessor) => Ok(accessor(state)),
        }
    }
}

impl<K: StateKey> fmt::Debug for ValueExpr<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            ValueExpr::State(key) => f.debug_tuple("State").field(key).finish(),
            ValueExpr::StateOp {
                key,
                operation,
                operand,
            } => f
                .debug_struct("StateOp")
                .field("key", key)
                .field("operation", operation)
                .field("operand", operand)
                .finish(),
            ValueExpr::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<K: StateKey> From<Value> for ValueExpr<K> {
    fn from(value: Value) -> Self {
        ValueExpr::Constant(value)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<K: StateKey> From<$ty> for ValueExpr<K> {
                fn from(value: $ty) -> Self {
                    ValueExpr::Constant(Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, f32, f64, Decimal, String, &str);
