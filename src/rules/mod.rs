//! Rule storage: the typed rule cell, creation config, registry, snapshots.
//!
//! ## Key Types
//!
//! - `Rule<T, C>`: A named value with a default and change observers
//! - `RuleConfig<T, C>`: Default value and optional change callback
//! - `GameRules<C>`: Name-unique registry of rules of any kind
//! - `DynRule<C>`: Kind-erased view of a registered rule
//! - `RuleSnapshot`: Serializable name to string-value map

pub mod config;
pub mod registry;
pub mod rule;
pub mod snapshot;

pub use config::RuleConfig;
pub use registry::GameRules;
pub use rule::{DynRule, Observer, ObserverResult, Rule};
pub use snapshot::RuleSnapshot;
