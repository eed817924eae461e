//! Rule kinds and the dynamic value representation.
//!
//! `RuleKind` is the tag a rule carries for its whole lifetime.
//! `AnyValue` is the tagged value used wherever the static type of a rule
//! is not known at the call site (name-based setters, descriptors).

use serde::{Deserialize, Serialize};

/// The kind of value a rule holds. Never changes after registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    Boolean,
    Int,
    Float,
    Double,
    String,
    Enum,
}

impl RuleKind {
    /// All rule kinds, in declaration order.
    pub const ALL: [RuleKind; 6] = [
        RuleKind::Boolean,
        RuleKind::Int,
        RuleKind::Float,
        RuleKind::Double,
        RuleKind::String,
        RuleKind::Enum,
    ];

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleKind::Boolean => "boolean",
            RuleKind::Int => "int",
            RuleKind::Float => "float",
            RuleKind::Double => "double",
            RuleKind::String => "string",
            RuleKind::Enum => "enum",
        }
    }

    /// Kinds that host engines have not standardized yet.
    ///
    /// This is an API-stability marker only; beta rules behave exactly
    /// like the others.
    #[must_use]
    pub const fn is_beta(self) -> bool {
        !matches!(self, RuleKind::Boolean | RuleKind::Int)
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule value whose kind is only known at runtime.
///
/// Enum values are carried by variant name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnyValue {
    Boolean(bool),
    Int(i32),
    Float(f32),
    Double(f64),
    String(String),
    Enum(String),
}

impl AnyValue {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            AnyValue::Boolean(_) => RuleKind::Boolean,
            AnyValue::Int(_) => RuleKind::Int,
            AnyValue::Float(_) => RuleKind::Float,
            AnyValue::Double(_) => RuleKind::Double,
            AnyValue::String(_) => RuleKind::String,
            AnyValue::Enum(_) => RuleKind::Enum,
        }
    }

    /// Get as bool if this is a Boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            AnyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f32 if this is a Float value.
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            AnyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f64 if this is a Double value.
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            AnyValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the text of a String value, or the variant name of an Enum value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(s) | AnyValue::Enum(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AnyValue {
    fn from(v: bool) -> Self {
        AnyValue::Boolean(v)
    }
}

impl From<i32> for AnyValue {
    fn from(v: i32) -> Self {
        AnyValue::Int(v)
    }
}

impl From<f32> for AnyValue {
    fn from(v: f32) -> Self {
        AnyValue::Float(v)
    }
}

impl From<f64> for AnyValue {
    fn from(v: f64) -> Self {
        AnyValue::Double(v)
    }
}

impl From<String> for AnyValue {
    fn from(v: String) -> Self {
        AnyValue::String(v)
    }
}

impl From<&str> for AnyValue {
    fn from(v: &str) -> Self {
        AnyValue::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beta_kinds() {
        assert!(!RuleKind::Boolean.is_beta());
        assert!(!RuleKind::Int.is_beta());
        assert!(RuleKind::Float.is_beta());
        assert!(RuleKind::Double.is_beta());
        assert!(RuleKind::String.is_beta());
        assert!(RuleKind::Enum.is_beta());
    }

    #[test]
    fn test_kind_display() {
        let names: Vec<_> = RuleKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["boolean", "int", "float", "double", "string", "enum"]);
    }

    #[test]
    fn test_any_value_accessors() {
        assert_eq!(AnyValue::from(true).as_bool(), Some(true));
        assert_eq!(AnyValue::from(7).as_int(), Some(7));
        assert_eq!(AnyValue::from(7).as_bool(), None);
        assert_eq!(AnyValue::from(0.5f32).as_float(), Some(0.5));
        assert_eq!(AnyValue::from(0.25f64).as_double(), Some(0.25));
        assert_eq!(AnyValue::from("hi").as_str(), Some("hi"));
        assert_eq!(AnyValue::Enum("Peaceful".into()).as_str(), Some("Peaceful"));
        assert_eq!(AnyValue::Enum("Peaceful".into()).kind(), RuleKind::Enum);
    }
}
