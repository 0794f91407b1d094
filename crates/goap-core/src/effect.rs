use crate::{Operation, Result, StateKey, Value, ValueExpr, WorldState};

/// A predicted change to one state key.
#[derive(Debug, Clone)]
pub struct Effect<K: StateKey> {
    pub key: K,
    pub operation: Operation,
    pub value: ValueExpr<K>,
}

impl<K: StateKey> Effect<K> {
    pub fn new(key: K, operation: Operation, value: impl Into<ValueExpr<K>>) -> Self {
        Self {
            key,
            operation,
            value: value.into(),
        }
    }

    pub fn set(key: K, value: impl Into<ValueExpr<K>>) -> Self {
        Self::new(key, Operation::SetTo, value)
    }

    pub fn increase(key: K, value: impl Into<ValueExpr<K>>) -> Self {
        Self::new(key, Operation::IncreaseBy, value)
    }

    pub fn decrease(key: K, value: impl Into<ValueExpr<K>>) -> Self {
        Self::new(key, Operation::DecreaseBy, value)
    }

    /// New value of `self.key`; the snapshot itself is not touched.
    pub fn predict(&self, state: &WorldState<K>) -> Result<Value> {
        let operand = self.value.evaluate(state)?;
        self.operation.apply(state.get(&self.key), &operand)
    }

    pub fn apply(&self, state: &mut WorldState<K>) -> Result<()> {
        let value = self.predict(state)?;
        state.set(self.key.clone(), value);
        Ok(())
    }
}
