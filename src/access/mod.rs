//! Accessor layer: typed get/set against anything that owns a registry.
//!
//! There is no caching or deferred write here. Every `set` goes straight to
//! the registry and notifies observers before returning.

pub mod host;
pub mod property;

pub use host::{RuleAccess, RuleHost};
pub use property::{BoundProperty, RuleProperty};
