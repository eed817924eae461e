//! The rule registry.
//!
//! `GameRules` maps unique names to rules of any kind. Rules are created
//! once through `register` and live as long as the registry; there is no
//! way to remove one.
//!
//! ## Access paths
//!
//! - Typed keys (`RuleKey<T>`): what `register` returns. Lookup tries the
//!   key's slot, then falls back to the name, so keys from one registry
//!   work on another. The value type is known statically.
//! - Names: resolved through the name index on every call. Typed name
//!   access checks the rule's kind and fails with `TypeMismatch` on a wrong
//!   guess; `set_value` takes an `AnyValue` for fully dynamic callers.
//!
//! ## Threading
//!
//! The registry is not thread-safe and does not try to be. Observers are
//! plain `Fn` closures without a `Send` bound, so a registry stays on the
//! thread that built it; confine all mutation to that thread.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::config::RuleConfig;
use super::rule::{DynRule, ObserverResult, Rule};
use crate::core::{validate_rule_name, AnyValue, RuleKey, RuleValue};
use crate::error::{Result, RuleError};

/// Registry of named, typed rules.
///
/// `C` is the context type passed through to observers.
///
/// ## Example
///
/// ```
/// use game_rules::rules::{GameRules, RuleConfig};
///
/// let mut rules: GameRules = GameRules::new();
/// let key = rules
///     .register("keepInventory", RuleConfig::new().with_default(false))
///     .unwrap();
///
/// rules.set(&key, true, None).unwrap();
/// assert!(rules.get(&key).unwrap());
/// assert!(rules.register::<bool>("keepInventory", RuleConfig::new()).is_err());
/// ```
pub struct GameRules<C: 'static = ()> {
    /// Rules in registration order. A key's slot indexes this.
    rules: Vec<Box<dyn DynRule<C>>>,

    /// Name to slot.
    index: FxHashMap<Arc<str>, usize>,
}

impl<C: 'static> GameRules<C> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create and register a rule.
    ///
    /// Fails without touching the registry if the name is invalid, already
    /// taken, or the default is not acceptable for the kind.
    pub fn register<T: RuleValue>(
        &mut self,
        name: &str,
        config: RuleConfig<T, C>,
    ) -> Result<RuleKey<T>> {
        validate_rule_name(name)?;
        if self.index.contains_key(name) {
            return Err(RuleError::DuplicateName {
                name: name.to_string(),
            });
        }
        if !config.default.is_valid_default() {
            return Err(RuleError::InvalidDefault {
                name: name.to_string(),
                kind: T::KIND,
            });
        }

        let name: Arc<str> = Arc::from(name);
        let slot = self.rules.len();
        let mut rule = Rule::new(Arc::clone(&name), config.default);
        if let Some(callback) = config.on_change {
            rule.push_observer(callback);
        }

        log::debug!("Registering {} rule '{}'", T::KIND, name);
        self.rules.push(Box::new(rule));
        self.index.insert(Arc::clone(&name), slot);
        Ok(RuleKey::new(name, slot))
    }

    // =========================================================================
    // Typed key access
    // =========================================================================

    /// Borrow the rule behind a key.
    ///
    /// Fails with `UnknownRule` if no rule has the key's name, or with
    /// `TypeMismatch` if that rule holds a different kind.
    pub fn rule<T: RuleValue>(&self, key: &RuleKey<T>) -> Result<&Rule<T, C>> {
        let slot = self.resolve(key)?;
        Self::downcast(&*self.rules[slot])
    }

    /// Mutably borrow the rule behind a key.
    pub fn rule_mut<T: RuleValue>(&mut self, key: &RuleKey<T>) -> Result<&mut Rule<T, C>> {
        let slot = self.resolve(key)?;
        Self::downcast_mut(&mut *self.rules[slot])
    }

    /// Current value of a rule.
    pub fn get<T: RuleValue>(&self, key: &RuleKey<T>) -> Result<T> {
        self.rule(key).map(Rule::get)
    }

    /// Set a rule's value and notify its observers.
    pub fn set<T: RuleValue>(&mut self, key: &RuleKey<T>, value: T, context: Option<&C>) -> Result<()> {
        self.rule_mut(key)?.set(value, context)
    }

    /// Restore a rule's default and notify its observers.
    pub fn reset<T: RuleValue>(&mut self, key: &RuleKey<T>, context: Option<&C>) -> Result<()> {
        self.rule_mut(key)?.reset(context)
    }

    /// Append a change observer to a rule.
    pub fn observe<T, F>(&mut self, key: &RuleKey<T>, observer: F) -> Result<()>
    where
        T: RuleValue,
        F: Fn(Option<&C>, &Rule<T, C>) -> ObserverResult + 'static,
    {
        self.rule_mut(key)?.add_observer(observer);
        Ok(())
    }

    // =========================================================================
    // Name access
    // =========================================================================

    /// Check if a rule with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Find a rule by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&dyn DynRule<C>> {
        let slot = *self.index.get(name)?;
        self.rules.get(slot).map(|r| &**r)
    }

    /// Get a rule by name, failing with `UnknownRule` if absent.
    pub fn lookup(&self, name: &str) -> Result<&dyn DynRule<C>> {
        self.find(name).ok_or_else(|| RuleError::unknown(name))
    }

    /// Recover the typed key for a named rule.
    ///
    /// Fails with `TypeMismatch` if the rule does not hold a `T`.
    pub fn key<T: RuleValue>(&self, name: &str) -> Result<RuleKey<T>> {
        let (name, &slot) = self
            .index
            .get_key_value(name)
            .ok_or_else(|| RuleError::unknown(name))?;
        Self::downcast::<T>(&*self.rules[slot])?;
        Ok(RuleKey::new(Arc::clone(name), slot))
    }

    /// Current value of a named rule.
    pub fn get_by_name<T: RuleValue>(&self, name: &str) -> Result<T> {
        let key = self.key::<T>(name)?;
        self.get(&key)
    }

    /// Set a named rule's value and notify its observers.
    pub fn set_by_name<T: RuleValue>(&mut self, name: &str, value: T, context: Option<&C>) -> Result<()> {
        let key = self.key::<T>(name)?;
        self.set(&key, value, context)
    }

    /// Append a change observer to a named rule.
    pub fn observe_by_name<T, F>(&mut self, name: &str, observer: F) -> Result<()>
    where
        T: RuleValue,
        F: Fn(Option<&C>, &Rule<T, C>) -> ObserverResult + 'static,
    {
        let key = self.key::<T>(name)?;
        self.observe(&key, observer)
    }

    /// Current value of a named rule in dynamic form.
    pub fn value(&self, name: &str) -> Result<AnyValue> {
        self.lookup(name).map(|r| r.any_value())
    }

    /// Set a named rule from a dynamic value.
    ///
    /// Fails with `TypeMismatch`, leaving the value untouched, if the value
    /// has the wrong kind or names a variant outside the rule's enum.
    pub fn set_value(&mut self, name: &str, value: AnyValue, context: Option<&C>) -> Result<()> {
        self.lookup_mut(name)?.set_any(value, context)
    }

    /// Load a named rule from its string form without notifying observers.
    pub fn set_from_string(&mut self, name: &str, s: &str) -> Result<()> {
        self.lookup_mut(name)?.set_from_string(s);
        Ok(())
    }

    /// String form of a named rule's value.
    pub fn value_string(&self, name: &str) -> Result<String> {
        self.lookup(name).map(|r| r.value_string())
    }

    /// Integer reported to a command caller querying a named rule.
    pub fn command_result(&self, name: &str) -> Result<i32> {
        self.lookup(name).map(|r| r.command_result())
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// All rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn DynRule<C>> {
        self.rules.iter().map(|r| &**r)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Slot of the rule a key names. The key's own slot is tried first and
    /// the name index is the fallback for keys issued by another registry.
    fn resolve<T>(&self, key: &RuleKey<T>) -> Result<usize> {
        match self.rules.get(key.slot()) {
            Some(rule) if rule.name() == key.name() => Ok(key.slot()),
            _ => self
                .index
                .get(key.name())
                .copied()
                .ok_or_else(|| RuleError::unknown(key.name())),
        }
    }

    fn lookup_mut(&mut self, name: &str) -> Result<&mut dyn DynRule<C>> {
        let slot = *self
            .index
            .get(name)
            .ok_or_else(|| RuleError::unknown(name))?;
        Ok(&mut *self.rules[slot])
    }

    fn downcast<T: RuleValue>(rule: &dyn DynRule<C>) -> Result<&Rule<T, C>> {
        rule.as_any()
            .downcast_ref::<Rule<T, C>>()
            .ok_or_else(|| RuleError::mismatch(rule.name(), T::type_name(), rule.type_name()))
    }

    fn downcast_mut<T: RuleValue>(rule: &mut dyn DynRule<C>) -> Result<&mut Rule<T, C>> {
        let name = rule.name().to_string();
        let found = rule.type_name();
        rule.as_any_mut()
            .downcast_mut::<Rule<T, C>>()
            .ok_or_else(|| RuleError::mismatch(name, T::type_name(), found))
    }
}

impl<C: 'static> Default for GameRules<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> std::fmt::Debug for GameRules<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.rules.iter().map(|r| (r.name(), r.value_string())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::RuleKind;

    #[test]
    fn test_register_and_get() {
        let mut rules: GameRules = GameRules::new();
        let key = rules
            .register("randomTickSpeed", RuleConfig::new().with_default(3))
            .unwrap();

        assert_eq!(key.name(), "randomTickSpeed");
        assert_eq!(rules.get(&key).unwrap(), 3);
        assert_eq!(rules.len(), 1);
        assert!(rules.contains("randomTickSpeed"));
        assert!(!rules.contains("randomtickspeed"));
    }

    #[test]
    fn test_duplicate_name_rejected_without_mutation() {
        let mut rules: GameRules = GameRules::new();
        let key = rules
            .register("keepInventory", RuleConfig::new().with_default(true))
            .unwrap();

        let err = rules
            .register("keepInventory", RuleConfig::new().with_default(false))
            .unwrap_err();
        assert!(matches!(err, RuleError::DuplicateName { ref name } if name == "keepInventory"));

        // Different kind, same name: still a duplicate
        assert!(rules.register::<i32>("keepInventory", RuleConfig::new()).is_err());

        assert_eq!(rules.len(), 1);
        assert!(rules.get(&key).unwrap());
    }

    #[test]
    fn test_invalid_name_and_default() {
        let mut rules: GameRules = GameRules::new();

        assert!(matches!(
            rules.register::<bool>("", RuleConfig::new()),
            Err(RuleError::InvalidName { .. })
        ));
        assert!(matches!(
            rules.register("gravity", RuleConfig::new().with_default(f64::NAN)),
            Err(RuleError::InvalidDefault { kind: RuleKind::Double, .. })
        ));
        assert!(matches!(
            rules.register("drag", RuleConfig::new().with_default(f32::INFINITY)),
            Err(RuleError::InvalidDefault { kind: RuleKind::Float, .. })
        ));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let mut rules: GameRules = GameRules::new();

        assert!(matches!(rules.lookup("missing"), Err(RuleError::UnknownRule { .. })));
        assert!(matches!(
            rules.get_by_name::<bool>("missing"),
            Err(RuleError::UnknownRule { .. })
        ));
        assert!(matches!(
            rules.set_by_name("missing", true, None),
            Err(RuleError::UnknownRule { .. })
        ));
        assert!(matches!(
            rules.set_value("missing", AnyValue::Int(1), None),
            Err(RuleError::UnknownRule { .. })
        ));
        assert!(rules.find("missing").is_none());
        assert!(rules.is_empty());
    }

    #[test]
    fn test_key_from_foreign_registry() {
        let mut a: GameRules = GameRules::new();
        let mut b: GameRules = GameRules::new();
        let key_a = a.register::<bool>("onlyInA", RuleConfig::new()).unwrap();
        b.register::<bool>("other", RuleConfig::new()).unwrap();

        assert!(matches!(b.get(&key_a), Err(RuleError::UnknownRule { .. })));
        assert!(matches!(b.set(&key_a, true, None), Err(RuleError::UnknownRule { .. })));
    }

    #[test]
    fn test_key_resolves_by_name_at_other_slot() {
        let mut a: GameRules = GameRules::new();
        let mut b: GameRules = GameRules::new();
        let key = a
            .register("keepInventory", RuleConfig::new().with_default(false))
            .unwrap();
        b.register::<i32>("mymod:early", RuleConfig::new()).unwrap();
        let key_b = b
            .register("keepInventory", RuleConfig::new().with_default(true))
            .unwrap();

        assert!(b.get(&key).unwrap());
        b.set(&key, false, None).unwrap();
        assert!(!b.get(&key_b).unwrap());
        assert!(!a.get(&key).unwrap());
        assert_eq!(key, key_b);
    }

    #[test]
    fn test_key_at_other_slot_checks_kind() {
        let mut a: GameRules = GameRules::new();
        let mut b: GameRules = GameRules::new();
        let key = a.register::<bool>("pvp", RuleConfig::new()).unwrap();
        b.register::<i32>("filler", RuleConfig::new()).unwrap();
        b.register::<i32>("pvp", RuleConfig::new()).unwrap();

        assert!(matches!(b.get(&key), Err(RuleError::TypeMismatch { .. })));
        assert!(matches!(b.set(&key, true, None), Err(RuleError::TypeMismatch { .. })));
        assert_eq!(b.get_by_name::<i32>("pvp").unwrap(), 0);
    }

    #[test]
    fn test_typed_name_access_checks_kind() {
        let mut rules: GameRules = GameRules::new();
        rules
            .register("spawnRadius", RuleConfig::new().with_default(10))
            .unwrap();

        assert_eq!(rules.get_by_name::<i32>("spawnRadius").unwrap(), 10);
        assert!(matches!(
            rules.get_by_name::<bool>("spawnRadius"),
            Err(RuleError::TypeMismatch { .. })
        ));
        assert!(matches!(
            rules.key::<f64>("spawnRadius"),
            Err(RuleError::TypeMismatch { .. })
        ));

        rules.set_by_name("spawnRadius", 4, None).unwrap();
        assert_eq!(rules.value("spawnRadius").unwrap(), AnyValue::Int(4));
    }

    #[test]
    fn test_set_value_dynamic() {
        let mut rules: GameRules = GameRules::new();
        let key = rules
            .register("motd", RuleConfig::new().with_default("hi".to_string()))
            .unwrap();

        rules.set_value("motd", AnyValue::from("welcome"), None).unwrap();
        assert_eq!(rules.get(&key).unwrap(), "welcome");

        assert!(matches!(
            rules.set_value("motd", AnyValue::Boolean(true), None),
            Err(RuleError::TypeMismatch { .. })
        ));
        assert_eq!(rules.get(&key).unwrap(), "welcome");
    }

    #[test]
    fn test_on_change_runs_before_later_observers() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut rules: GameRules = GameRules::new();

        let o = Rc::clone(&order);
        let key = rules
            .register(
                "doWeatherCycle",
                RuleConfig::new().with_default(true).on_change(move |_, _| {
                    o.borrow_mut().push("created");
                    Ok(())
                }),
            )
            .unwrap();

        let o = Rc::clone(&order);
        rules
            .observe(&key, move |_, _| {
                o.borrow_mut().push("added");
                Ok(())
            })
            .unwrap();

        rules.set(&key, false, None).unwrap();
        assert_eq!(*order.borrow(), vec!["created", "added"]);
        assert_eq!(rules.rule(&key).unwrap().observer_count(), 2);
    }

    #[test]
    fn test_string_forms_by_name() {
        let mut rules: GameRules = GameRules::new();
        let key = rules
            .register("maxEntityCramming", RuleConfig::new().with_default(24))
            .unwrap();

        rules.set_from_string("maxEntityCramming", "8").unwrap();
        assert_eq!(rules.get(&key).unwrap(), 8);
        assert_eq!(rules.value_string("maxEntityCramming").unwrap(), "8");
        assert_eq!(rules.command_result("maxEntityCramming").unwrap(), 8);

        rules.set_from_string("maxEntityCramming", "lots").unwrap();
        assert_eq!(rules.get(&key).unwrap(), 0);
    }

    #[test]
    fn test_iteration_in_registration_order() {
        let mut rules: GameRules = GameRules::new();
        rules.register::<bool>("zeta", RuleConfig::new()).unwrap();
        rules.register::<i32>("alpha", RuleConfig::new()).unwrap();
        rules.register::<String>("mid", RuleConfig::new()).unwrap();

        let names: Vec<_> = rules.names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);

        let kinds: Vec<_> = rules.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, [RuleKind::Boolean, RuleKind::Int, RuleKind::String]);
    }

    #[test]
    fn test_reset() {
        let mut rules: GameRules = GameRules::new();
        let key = rules
            .register("spawnRadius", RuleConfig::new().with_default(10))
            .unwrap();

        rules.set(&key, 0, None).unwrap();
        rules.reset(&key, None).unwrap();
        assert_eq!(rules.get(&key).unwrap(), 10);
    }
}
