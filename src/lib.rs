//! # game-rules
//!
//! A typed registry of named game rules with change notification.
//!
//! ## Design Principles
//!
//! 1. **Typed Keys**: Registering a rule returns a `RuleKey<T>`; reads and
//!    writes through the key are checked at compile time.
//!
//! 2. **Immediate Notification**: Every `set` assigns, then calls each
//!    observer in insertion order before returning. No dirty check, no
//!    batching, no deferred writes.
//!
//! 3. **Opaque Context**: Observers receive the caller's context (a running
//!    session, a world) without the registry interpreting it.
//!
//! ## Rule Kinds
//!
//! Boolean, int (`i32`), float (`f32`), double (`f64`), string, and enum
//! (any type implementing `RuleEnum`). Float, double, string and enum are
//! marked beta via `RuleKind::is_beta`; that is an API-stability marker
//! only.
//!
//! ## Modules
//!
//! - `core`: Rule names, typed keys, kinds, value traits
//! - `rules`: Rule cell, creation config, registry, snapshots
//! - `access`: Host trait, typed get/set sugar, property accessors
//! - `builtin`: The standard game rules and their defaults
//! - `error`: Error taxonomy
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use game_rules::{GameRules, RuleAccess, RuleConfig};
//!
//! let mut rules: GameRules = GameRules::new();
//! let daylight = rules
//!     .register("doDaylightCycle", RuleConfig::new().with_default(true))
//!     .unwrap();
//!
//! let changes = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&changes);
//! rules
//!     .observe(&daylight, move |_, rule| {
//!         assert!(!rule.get());
//!         seen.set(seen.get() + 1);
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! rules.set_boolean(&daylight, false).unwrap();
//! assert_eq!(changes.get(), 1);
//! assert!(!rules.get_boolean(&daylight).unwrap());
//! ```

pub mod access;
pub mod builtin;
pub mod core;
pub mod error;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{validate_rule_name, AnyValue, RuleEnum, RuleKey, RuleKind, RuleValue};

pub use crate::rules::{
    DynRule, GameRules, Observer, ObserverResult, Rule, RuleConfig, RuleSnapshot,
};

pub use crate::access::{BoundProperty, RuleAccess, RuleHost, RuleProperty};

pub use crate::builtin::BuiltinRules;

pub use crate::error::{BoxError, Result, RuleError};
