//! Rule hosts and the typed accessor extension.
//!
//! A host is anything that owns a `GameRules`: the registry itself, or a
//! session/world object that carries one. Hosts that own a context hand it
//! to observers; a bare registry hands them `None`.

use crate::core::{RuleEnum, RuleKey, RuleValue};
use crate::error::Result;
use crate::rules::{GameRules, ObserverResult, Rule};

use super::property::BoundProperty;

/// An owner of a rule registry.
///
/// `game_rules_and_context` splits the borrow so the registry can be
/// mutated while the context is passed to observers.
///
/// ```
/// use game_rules::access::{RuleAccess, RuleHost};
/// use game_rules::rules::{GameRules, RuleConfig};
///
/// struct Session {
///     id: u32,
/// }
///
/// struct Server {
///     rules: GameRules<Session>,
///     session: Session,
/// }
///
/// impl RuleHost for Server {
///     type Context = Session;
///
///     fn game_rules(&self) -> &GameRules<Session> {
///         &self.rules
///     }
///
///     fn game_rules_and_context(&mut self) -> (&mut GameRules<Session>, Option<&Session>) {
///         (&mut self.rules, Some(&self.session))
///     }
/// }
///
/// let mut server = Server { rules: GameRules::new(), session: Session { id: 7 } };
/// let key = server
///     .rules
///     .register("doFireTick", RuleConfig::new().with_default(true))
///     .unwrap();
///
/// server.set_boolean(&key, false).unwrap();
/// assert!(!server.get_boolean(&key).unwrap());
/// ```
pub trait RuleHost {
    /// Context type passed to observers.
    type Context: 'static;

    /// Borrow the registry.
    fn game_rules(&self) -> &GameRules<Self::Context>;

    /// Mutably borrow the registry together with the observer context.
    fn game_rules_and_context(
        &mut self,
    ) -> (&mut GameRules<Self::Context>, Option<&Self::Context>);
}

impl<C: 'static> RuleHost for GameRules<C> {
    type Context = C;

    fn game_rules(&self) -> &GameRules<C> {
        self
    }

    fn game_rules_and_context(&mut self) -> (&mut GameRules<C>, Option<&C>) {
        (self, None)
    }
}

/// Typed get/set sugar for every rule host.
///
/// Every `set_*` call assigns immediately and notifies observers with the
/// host's context before returning.
pub trait RuleAccess: RuleHost {
    /// Current value of a rule.
    fn rule_value<T: RuleValue>(&self, key: &RuleKey<T>) -> Result<T> {
        self.game_rules().get(key)
    }

    /// Set a rule and notify its observers with this host's context.
    fn set_rule_value<T: RuleValue>(&mut self, key: &RuleKey<T>, value: T) -> Result<()> {
        let (rules, context) = self.game_rules_and_context();
        rules.set(key, value, context)
    }

    /// Restore a rule's default and notify its observers.
    fn reset_rule<T: RuleValue>(&mut self, key: &RuleKey<T>) -> Result<()> {
        let (rules, context) = self.game_rules_and_context();
        rules.reset(key, context)
    }

    /// Append a change observer to a rule.
    fn observe_rule<T, F>(&mut self, key: &RuleKey<T>, observer: F) -> Result<()>
    where
        T: RuleValue,
        F: Fn(Option<&Self::Context>, &Rule<T, Self::Context>) -> ObserverResult + 'static,
    {
        let (rules, _) = self.game_rules_and_context();
        rules.observe(key, observer)
    }

    /// Bind a key to this host for repeated access.
    fn property<T: RuleValue>(&mut self, key: &RuleKey<T>) -> BoundProperty<'_, Self, T> {
        BoundProperty::new(self, key.clone())
    }

    fn get_boolean(&self, key: &RuleKey<bool>) -> Result<bool> {
        self.rule_value(key)
    }

    fn set_boolean(&mut self, key: &RuleKey<bool>, value: bool) -> Result<()> {
        self.set_rule_value(key, value)
    }

    fn get_int(&self, key: &RuleKey<i32>) -> Result<i32> {
        self.rule_value(key)
    }

    fn set_int(&mut self, key: &RuleKey<i32>, value: i32) -> Result<()> {
        self.set_rule_value(key, value)
    }

    fn get_float(&self, key: &RuleKey<f32>) -> Result<f32> {
        self.rule_value(key)
    }

    fn set_float(&mut self, key: &RuleKey<f32>, value: f32) -> Result<()> {
        self.set_rule_value(key, value)
    }

    fn get_double(&self, key: &RuleKey<f64>) -> Result<f64> {
        self.rule_value(key)
    }

    fn set_double(&mut self, key: &RuleKey<f64>, value: f64) -> Result<()> {
        self.set_rule_value(key, value)
    }

    fn get_string(&self, key: &RuleKey<String>) -> Result<String> {
        self.rule_value(key)
    }

    fn set_string(&mut self, key: &RuleKey<String>, value: impl Into<String>) -> Result<()> {
        self.set_rule_value(key, value.into())
    }

    fn get_enum<E: RuleEnum>(&self, key: &RuleKey<E>) -> Result<E> {
        self.rule_value(key)
    }

    fn set_enum<E: RuleEnum>(&mut self, key: &RuleKey<E>, value: E) -> Result<()> {
        self.set_rule_value(key, value)
    }
}

impl<H: RuleHost + ?Sized> RuleAccess for H {}
