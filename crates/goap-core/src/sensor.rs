use crate::{Result, StateKey, Value, ValueExpr, WorldState};

/// Refreshes one state key before every planning or validity query.
#[derive(Debug, Clone)]
pub struct Sensor<K: StateKey> {
    pub key: K,
    pub value: ValueExpr<K>,
}

impl<K: StateKey> Sensor<K> {
    pub fn new(key: K, value: impl Into<ValueExpr<K>>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Sensor backed by an application callback.
    pub fn from_fn(
        key: K,
        read: impl Fn(&WorldState<K>) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, ValueExpr::dynamic(read))
    }

    pub fn sense(&self, state: &WorldState<K>) -> Result<Value> {
        self.value.evaluate(state)
    }
}
