//! Rule names and typed rule keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Result, RuleError};

/// Check that `name` can be used as a rule name.
///
/// Names must be non-empty and free of whitespace so they survive command
/// lines and snapshot keys unchanged.
pub fn validate_rule_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RuleError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(RuleError::InvalidName {
            name: name.to_string(),
            reason: "name contains whitespace",
        });
    }
    Ok(())
}

/// Typed handle to a registered rule.
///
/// Returned by `GameRules::register` and used for all typed access.
/// Cloning is cheap. A key identifies its rule by name, so it works on any
/// registry holding a rule of that name and kind, whatever the registration
/// order. The slot it remembers is only a lookup hint for the issuing
/// registry.
pub struct RuleKey<T> {
    name: Arc<str>,
    slot: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RuleKey<T> {
    pub(crate) fn new(name: Arc<str>, slot: usize) -> Self {
        Self {
            name,
            slot,
            _marker: PhantomData,
        }
    }

    /// The rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) const fn slot(&self) -> usize {
        self.slot
    }
}

impl<T> Clone for RuleKey<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.name), self.slot)
    }
}

impl<T> PartialEq for RuleKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for RuleKey<T> {}

impl<T> Hash for RuleKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> fmt::Debug for RuleKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleKey")
            .field("name", &&*self.name)
            .field("slot", &self.slot)
            .finish()
    }
}

impl<T> fmt::Display for RuleKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rule_name() {
        assert!(validate_rule_name("doDaylightCycle").is_ok());
        assert!(validate_rule_name("mod:custom_rule").is_ok());

        assert!(matches!(
            validate_rule_name(""),
            Err(RuleError::InvalidName { reason: "name is empty", .. })
        ));
        assert!(matches!(
            validate_rule_name("do daylight"),
            Err(RuleError::InvalidName { .. })
        ));
        assert!(validate_rule_name("tab\there").is_err());
    }

    #[test]
    fn test_key_identity() {
        let a: RuleKey<bool> = RuleKey::new(Arc::from("keepInventory"), 2);
        let b = a.clone();
        let c: RuleKey<bool> = RuleKey::new(Arc::from("keepInventory"), 3);
        let d: RuleKey<bool> = RuleKey::new(Arc::from("mobGriefing"), 2);

        // Same rule regardless of slot hint
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, d);
        assert_eq!(a.name(), "keepInventory");
        assert_eq!(a.slot(), 2);
        assert_eq!(format!("{}", a), "keepInventory");
    }
}
