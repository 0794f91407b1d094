#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;

/// Outcome of an action/goal validity override.
///
/// `Deferred` falls back to the default rule: requirements for actions, "not yet reached" for
/// goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Validity {
    Valid,
    Invalid,
    #[default]
    Deferred,
}

impl Validity {
    pub fn resolve(self, fallback: impl FnOnce() -> Result<bool>) -> Result<bool> {
        match self {
            Validity::Valid => Ok(true),
            Validity::Invalid => Ok(false),
            Validity::Deferred => fallback(),
        }
    }
}

impl From<bool> for Validity {
    fn from(value: bool) -> Self {
        if value {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

impl From<Option<bool>> for Validity {
    fn from(value: Option<bool>) -> Self {
        value.map(Validity::from).unwrap_or_default()
    }
}
