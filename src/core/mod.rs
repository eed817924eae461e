//! Value-level types: rule names, typed keys, kinds, and value traits.
//!
//! Nothing in here touches a registry. The `rules` module builds on these
//! types to store and mutate rules.

pub mod key;
pub mod kind;
pub mod value;

pub use key::{validate_rule_name, RuleKey};
pub use kind::{AnyValue, RuleKind};
pub use value::{RuleEnum, RuleValue};
