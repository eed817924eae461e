//! The typed rule cell and its change observers.
//!
//! A `Rule<T, C>` holds the current value, the default, and an ordered list
//! of observers. `C` is the caller-supplied context handed through to
//! observers untouched (a running session, a world, or `()`).
//!
//! ## Notification
//!
//! `set` assigns first, then calls every observer in insertion order with
//! the post-mutation rule. There is no dirty check: setting the current
//! value again still notifies. The first failing observer stops the pass
//! and its error is returned to the caller of `set`.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::{AnyValue, RuleKind, RuleValue};
use crate::error::{BoxError, Result, RuleError};

/// What an observer returns. An `Err` propagates out of `set`.
pub type ObserverResult = std::result::Result<(), BoxError>;

/// A change observer for a rule holding `T` with context `C`.
pub type Observer<T, C> = Box<dyn Fn(Option<&C>, &Rule<T, C>) -> ObserverResult>;

/// A named, typed, mutable rule value.
pub struct Rule<T, C = ()> {
    name: Arc<str>,
    value: T,
    default: T,
    observers: SmallVec<[Observer<T, C>; 2]>,
}

impl<T: RuleValue, C: 'static> Rule<T, C> {
    pub(crate) fn new(name: Arc<str>, default: T) -> Self {
        Self {
            name,
            value: default.clone(),
            default,
            observers: SmallVec::new(),
        }
    }

    /// The rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of value this rule holds.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        T::KIND
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Borrow the current value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The value the rule was created with.
    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Check whether the current value equals the default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    /// Replace the value and notify every observer.
    pub fn set(&mut self, value: T, context: Option<&C>) -> Result<()> {
        self.value = value;
        self.notify(context)
    }

    /// Restore the default value and notify every observer.
    pub fn reset(&mut self, context: Option<&C>) -> Result<()> {
        self.set(self.default.clone(), context)
    }

    /// Append an observer. Observers are never removed.
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: Fn(Option<&C>, &Rule<T, C>) -> ObserverResult + 'static,
    {
        self.observers.push(Box::new(observer));
        log::debug!(
            "Added change observer #{} to rule '{}'",
            self.observers.len(),
            self.name
        );
    }

    pub(crate) fn push_observer(&mut self, observer: Observer<T, C>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Load the value from its string form without notifying observers.
    ///
    /// This is the path used when restoring saved values.
    pub fn set_from_string(&mut self, s: &str) {
        self.value = T::parse_lenient(s);
    }

    /// Canonical string form of the current value.
    #[must_use]
    pub fn value_string(&self) -> String {
        self.value.to_rule_string()
    }

    /// Integer reported to a command caller querying this rule.
    #[must_use]
    pub fn command_result(&self) -> i32 {
        self.value.command_result()
    }

    fn notify(&self, context: Option<&C>) -> Result<()> {
        log::trace!(
            "Notifying {} observer(s) of rule '{}'",
            self.observers.len(),
            self.name
        );
        for observer in &self.observers {
            observer(context, self).map_err(|source| RuleError::Observer {
                name: self.name.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Rule<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &&*self.name)
            .field("value", &self.value)
            .field("default", &self.default)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Object-safe view of a rule of any value type.
///
/// The registry stores rules behind this trait and recovers the concrete
/// `Rule<T, C>` through `as_any`.
pub trait DynRule<C: 'static> {
    /// The rule name.
    fn name(&self) -> &str;

    /// The kind of value held.
    fn kind(&self) -> RuleKind;

    /// Type name for diagnostics (the enum's path for enum rules).
    fn type_name(&self) -> &'static str;

    /// Current value in dynamic form.
    fn any_value(&self) -> AnyValue;

    /// Default value in dynamic form.
    fn any_default(&self) -> AnyValue;

    /// Canonical string form of the current value.
    fn value_string(&self) -> String;

    /// Integer reported to a command caller.
    fn command_result(&self) -> i32;

    /// Number of registered observers.
    fn observer_count(&self) -> usize;

    /// Load the value from a string without notifying.
    fn set_from_string(&mut self, s: &str);

    /// Set from a dynamic value, failing with `TypeMismatch` if it does not fit.
    fn set_any(&mut self, value: AnyValue, context: Option<&C>) -> Result<()>;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn std::any::Any;

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

impl<T: RuleValue, C: 'static> DynRule<C> for Rule<T, C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RuleKind {
        T::KIND
    }

    fn type_name(&self) -> &'static str {
        T::type_name()
    }

    fn any_value(&self) -> AnyValue {
        self.value.clone().into_any()
    }

    fn any_default(&self) -> AnyValue {
        self.default.clone().into_any()
    }

    fn value_string(&self) -> String {
        self.value.to_rule_string()
    }

    fn command_result(&self) -> i32 {
        self.value.command_result()
    }

    fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn set_from_string(&mut self, s: &str) {
        self.value = T::parse_lenient(s);
    }

    fn set_any(&mut self, value: AnyValue, context: Option<&C>) -> Result<()> {
        let found = match &value {
            AnyValue::Enum(variant) if T::KIND == RuleKind::Enum => {
                format!("enum value '{}'", variant)
            }
            other => other.kind().to_string(),
        };
        match T::from_any(value) {
            Some(v) => self.set(v, context),
            None => Err(RuleError::mismatch(&*self.name, T::type_name(), found)),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
