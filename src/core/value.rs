//! Value types a rule can hold.
//!
//! `RuleValue` is implemented for `bool`, `i32`, `f32`, `f64`, `String`,
//! and every type implementing `RuleEnum`. Each implementation defines:
//! - the zero value used when a rule is created without a default
//! - how to load from a string (lenient: bad input falls back, never fails)
//! - the canonical string form
//! - the integer reported to a command caller

use std::fmt::Debug;

use super::kind::{AnyValue, RuleKind};

/// A value that can be stored in a rule.
pub trait RuleValue: Clone + PartialEq + Debug + 'static {
    /// The rule kind for this value type.
    const KIND: RuleKind;

    /// Value used when a rule is created without an explicit default.
    fn zero() -> Self;

    /// Load a value from its string form.
    ///
    /// Unparsable input logs a warning and yields a fallback value.
    fn parse_lenient(s: &str) -> Self;

    /// Canonical string form, accepted back by `parse_lenient`.
    fn to_rule_string(&self) -> String;

    /// Integer reported to a command caller after a query.
    fn command_result(&self) -> i32;

    /// Convert into the dynamic representation.
    fn into_any(self) -> AnyValue;

    /// Convert from the dynamic representation.
    ///
    /// Returns `None` when the tag differs or, for enums, when the
    /// variant name is not a member of this enum.
    fn from_any(value: AnyValue) -> Option<Self>;

    /// Whether this value may be used as a rule default.
    fn is_valid_default(&self) -> bool {
        true
    }

    /// Human-readable type name for diagnostics.
    fn type_name() -> &'static str {
        Self::KIND.as_str()
    }
}

/// An enum usable as a rule value.
///
/// Rust has no runtime enum reflection, so the enum supplies its own value
/// set. The ordinal of a variant is its index in `variants()`.
///
/// ```
/// use game_rules::core::RuleEnum;
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// enum Difficulty { Peaceful, Easy, Normal, Hard }
///
/// impl RuleEnum for Difficulty {
///     fn variants() -> &'static [Self] {
///         &[Self::Peaceful, Self::Easy, Self::Normal, Self::Hard]
///     }
///
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Self::Peaceful => "PEACEFUL",
///             Self::Easy => "EASY",
///             Self::Normal => "NORMAL",
///             Self::Hard => "HARD",
///         }
///     }
/// }
///
/// assert_eq!(Difficulty::from_variant_name("HARD"), Some(Difficulty::Hard));
/// assert_eq!(Difficulty::Normal.ordinal(), 2);
/// ```
pub trait RuleEnum: Copy + PartialEq + Debug + 'static {
    /// Every variant, in declaration order. Must not be empty.
    fn variants() -> &'static [Self];

    /// Name used for the string form of this variant.
    fn variant_name(&self) -> &'static str;

    /// Strict lookup by variant name.
    fn from_variant_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.variant_name() == name)
    }

    /// Position of this variant in `variants()`.
    ///
    /// Every value of the type must appear in `variants()`; a missing one
    /// reports 0 (and trips a debug assertion).
    fn ordinal(&self) -> usize {
        let position = Self::variants().iter().position(|v| v == self);
        debug_assert!(position.is_some(), "{:?} is missing from variants()", self);
        position.unwrap_or(0)
    }

    /// The first declared variant.
    ///
    /// # Panics
    ///
    /// Panics if `variants()` is empty.
    fn first_variant() -> Self {
        Self::variants()[0]
    }
}

/// 31-multiplier hash over UTF-16 code units, as host command results use.
fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)))
}

/// Host float text: plain decimals for magnitudes in `[1e-3, 1e7)` and
/// zero, `d.dddE±n` outside that range (`1.0E20`, `1.5E-7`).
fn host_float_string(magnitude: f64, plain: String, scientific: impl FnOnce() -> String) -> String {
    if magnitude == 0.0 || !magnitude.is_finite() || (1e-3..1e7).contains(&magnitude) {
        return plain;
    }
    let s = scientific();
    match s.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => format!("{}E{}", mantissa, exp),
        Some((mantissa, exp)) => format!("{}.0E{}", mantissa, exp),
        None => s,
    }
}

fn sign_of(v: f64) -> i32 {
    if v.is_nan() {
        return 1;
    }
    match v.total_cmp(&0.0) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

impl RuleValue for bool {
    const KIND: RuleKind = RuleKind::Boolean;

    fn zero() -> Self {
        false
    }

    fn parse_lenient(s: &str) -> Self {
        s.eq_ignore_ascii_case("true")
    }

    fn to_rule_string(&self) -> String {
        self.to_string()
    }

    fn command_result(&self) -> i32 {
        i32::from(*self)
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Boolean(self)
    }

    fn from_any(value: AnyValue) -> Option<Self> {
        value.as_bool()
    }
}

impl RuleValue for i32 {
    const KIND: RuleKind = RuleKind::Int;

    fn zero() -> Self {
        0
    }

    fn parse_lenient(s: &str) -> Self {
        if s.is_empty() {
            return 0;
        }
        s.parse().unwrap_or_else(|_| {
            log::warn!("Failed to parse integer {}", s);
            0
        })
    }

    fn to_rule_string(&self) -> String {
        self.to_string()
    }

    fn command_result(&self) -> i32 {
        *self
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Int(self)
    }

    fn from_any(value: AnyValue) -> Option<Self> {
        value.as_int()
    }
}

impl RuleValue for f32 {
    const KIND: RuleKind = RuleKind::Float;

    fn zero() -> Self {
        0.0
    }

    fn parse_lenient(s: &str) -> Self {
        if s.is_empty() {
            return 0.0;
        }
        match s.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => v,
            Ok(_) => {
                log::warn!("Parsed float was not a number {}", s);
                0.0
            }
            Err(_) => {
                log::warn!("Failed to parse float {}", s);
                0.0
            }
        }
    }

    fn to_rule_string(&self) -> String {
        host_float_string(f64::from(self.abs()), format!("{:?}", self), || {
            format!("{:e}", self)
        })
    }

    fn command_result(&self) -> i32 {
        sign_of(f64::from(*self))
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Float(self)
    }

    fn from_any(value: AnyValue) -> Option<Self> {
        value.as_float()
    }

    fn is_valid_default(&self) -> bool {
        self.is_finite()
    }
}

impl RuleValue for f64 {
    const KIND: RuleKind = RuleKind::Double;

    fn zero() -> Self {
        0.0
    }

    fn parse_lenient(s: &str) -> Self {
        if s.is_empty() {
            return 0.0;
        }
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            Ok(_) => {
                log::warn!("Parsed double was not a number {}", s);
                0.0
            }
            Err(_) => {
                log::warn!("Failed to parse double {}", s);
                0.0
            }
        }
    }

    fn to_rule_string(&self) -> String {
        host_float_string(self.abs(), format!("{:?}", self), || format!("{:e}", self))
    }

    fn command_result(&self) -> i32 {
        sign_of(*self)
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Double(self)
    }

    fn from_any(value: AnyValue) -> Option<Self> {
        value.as_double()
    }

    fn is_valid_default(&self) -> bool {
        self.is_finite()
    }
}

impl RuleValue for String {
    const KIND: RuleKind = RuleKind::String;

    fn zero() -> Self {
        String::new()
    }

    fn parse_lenient(s: &str) -> Self {
        s.to_string()
    }

    fn to_rule_string(&self) -> String {
        self.clone()
    }

    fn command_result(&self) -> i32 {
        string_hash(self)
    }

    fn into_any(self) -> AnyValue {
        AnyValue::String(self)
    }

    fn from_any(value: AnyValue) -> Option<Self> {
        match value {
            AnyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<E: RuleEnum> RuleValue for E {
    const KIND: RuleKind = RuleKind::Enum;

    fn zero() -> Self {
        E::first_variant()
    }

    fn parse_lenient(s: &str) -> Self {
        if s.is_empty() {
            return E::first_variant();
        }
        E::from_variant_name(s).unwrap_or_else(|| {
            log::warn!("Failed to parse enum {} {}", std::any::type_name::<E>(), s);
            E::first_variant()
        })
    }

    fn to_rule_string(&self) -> String {
        self.variant_name().to_string()
    }

    fn command_result(&self) -> i32 {
        i32::try_from(self.ordinal()).unwrap_or(i32::MAX)
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Enum(self.variant_name().to_string())
    }

    fn from_any(value: AnyValue) -> Option<Self> {
        match value {
            AnyValue::Enum(name) => E::from_variant_name(&name),
            _ => None,
        }
    }

    fn type_name() -> &'static str {
        std::any::type_name::<E>()
    }
}
