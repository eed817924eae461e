//! Rule creation config.
//!
//! One config type replaces the per-kind overloads for "with or without a
//! default" and "with or without a change callback".

use super::rule::{Observer, ObserverResult, Rule};
use crate::core::RuleValue;

/// Settings for a rule at registration time.
///
/// ```
/// use game_rules::rules::{GameRules, RuleConfig};
///
/// let mut rules: GameRules = GameRules::new();
/// let key = rules
///     .register("doDaylightCycle", RuleConfig::new().with_default(true))
///     .unwrap();
/// assert!(rules.get(&key).unwrap());
///
/// // Without a default, the zero value of the kind is used
/// let radius = rules.register::<i32>("spawnRadius", RuleConfig::new()).unwrap();
/// assert_eq!(rules.get(&radius).unwrap(), 0);
/// ```
pub struct RuleConfig<T, C = ()> {
    /// Initial and reset value.
    pub default: T,

    /// Callback installed as the rule's first observer.
    pub on_change: Option<Observer<T, C>>,
}

impl<T: RuleValue, C: 'static> RuleConfig<T, C> {
    /// Config with the zero value of `T` and no callback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default: T::zero(),
            on_change: None,
        }
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: T) -> Self {
        self.default = default;
        self
    }

    /// Set the change callback.
    #[must_use]
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Option<&C>, &Rule<T, C>) -> ObserverResult + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }
}

impl<T: RuleValue, C: 'static> Default for RuleConfig<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for RuleConfig<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleConfig")
            .field("default", &self.default)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
