//! World state, dynamic values and the declarative GOAP data model.
//!
//! Everything here is pure evaluation over state snapshots; the search itself lives in
//! `goap-planner`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod agent;
pub mod condition;
pub mod effect;
pub mod error;
pub mod expr;
pub mod goal;
pub mod ops;
pub mod sensor;
pub mod state;
pub mod validity;
pub mod value;

pub use action::{Action, AgentFn};
pub use agent::Agent;
pub use condition::{Condition, DistanceFn};
pub use effect::Effect;
pub use error::{GoapError, Result};
pub use expr::{Accessor, ValueExpr};
pub use goal::Goal;
pub use ops::{Comparison, Operation};
pub use sensor::Sensor;
pub use state::{LiveState, StateKey, WorldState};
pub use validity::Validity;
pub use value::Value;

pub use rust_decimal::Decimal;
