//! Property-style accessors.
//!
//! - `RuleProperty<T>`: a key wrapped as a property of any host; the host
//!   is supplied on each call (`MOB_GRIEFING.get(&server)`).
//! - `BoundProperty<'h, H, T>`: a key bound to one borrowed host, so
//!   repeated access needs neither.

use crate::core::{RuleKey, RuleValue};
use crate::error::Result;

use super::host::{RuleAccess, RuleHost};

/// A rule key used as a read/write property of a host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleProperty<T> {
    key: RuleKey<T>,
}

impl<T: RuleValue> RuleProperty<T> {
    /// Wrap a key.
    #[must_use]
    pub fn new(key: RuleKey<T>) -> Self {
        Self { key }
    }

    /// The wrapped key.
    #[must_use]
    pub fn key(&self) -> &RuleKey<T> {
        &self.key
    }

    /// Read the value from a host.
    pub fn get<H: RuleHost + ?Sized>(&self, host: &H) -> Result<T> {
        host.rule_value(&self.key)
    }

    /// Write the value on a host, notifying observers.
    pub fn set<H: RuleHost + ?Sized>(&self, host: &mut H, value: T) -> Result<()> {
        host.set_rule_value(&self.key, value)
    }

    /// Bind to a host.
    pub fn bind<'h, H: RuleHost + ?Sized>(&self, host: &'h mut H) -> BoundProperty<'h, H, T> {
        BoundProperty::new(host, self.key.clone())
    }
}

impl<T: RuleValue> From<RuleKey<T>> for RuleProperty<T> {
    fn from(key: RuleKey<T>) -> Self {
        Self::new(key)
    }
}

/// A rule key bound to a borrowed host.
pub struct BoundProperty<'h, H: ?Sized, T> {
    host: &'h mut H,
    key: RuleKey<T>,
}

impl<'h, H: RuleHost + ?Sized, T: RuleValue> BoundProperty<'h, H, T> {
    pub(crate) fn new(host: &'h mut H, key: RuleKey<T>) -> Self {
        Self { host, key }
    }

    /// The bound key.
    #[must_use]
    pub fn key(&self) -> &RuleKey<T> {
        &self.key
    }

    /// Read the current value.
    pub fn get(&self) -> Result<T> {
        self.host.rule_value(&self.key)
    }

    /// Write a value, notifying observers.
    pub fn set(&mut self, value: T) -> Result<()> {
        self.host.set_rule_value(&self.key, value)
    }

    /// Read, transform, and write back.
    pub fn update<F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(T) -> T,
    {
        let value = f(self.get()?);
        self.set(value.clone())?;
        Ok(value)
    }

    /// Restore the default, notifying observers.
    pub fn reset(&mut self) -> Result<()> {
        self.host.reset_rule(&self.key)
    }
}
