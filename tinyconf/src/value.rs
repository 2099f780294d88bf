//! Resolved configuration values and their conversion into Rust types

use std::num::TryFromIntError;

use serde::Serialize;

use crate::error::Error;

/// A resolved, typed configuration value.
///
/// Fields produce a `Value` from their raw string; defaults are stored as
/// `Value`s as well.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    /// Human readable name of the variant, used in type errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "a string",
            Value::Int(_) => "an integer",
            Value::Float(_) => "a float",
            Value::Bool(_) => "a boolean",
            Value::List(_) => "a list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_int_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(i).map_err(|_| Value::Int(i)),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

/// Integer types that always fit in an `i64`.
macro_rules! impl_int_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

/// Integer types that may not fit in an `i64`.
macro_rules! impl_int_try_from {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for Value {
                type Error = TryFromIntError;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    i64::try_from(value).map(Value::Int)
                }
            }
        )*
    };
}

/// Conversion from a resolved [`Value`] into a Rust type.
///
/// On mismatch the value is handed back so the caller can report what was
/// found.
pub trait FromValue: Sized {
    /// Name of the target type, used in error messages
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Result<Self, Value>;

    /// Convert an optional resolved value for the field `key`.
    ///
    /// An absent value is an error unless the target is an `Option`.
    fn from_resolved(key: &str, value: Option<Value>) -> Result<Self, Error> {
        let value = value.ok_or_else(|| Error::Type {
            key: key.to_string(),
            expected: Self::EXPECTED,
            found: "nothing",
        })?;
        Self::from_value(value).map_err(|found| Error::Type {
            key: key.to_string(),
            expected: Self::EXPECTED,
            found: found.kind_name(),
        })
    }
}

impl_int_from!(i8, i16, i32, i64, u8, u16, u32);
impl_int_try_from!(isize, u64, usize);
impl_int_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for Value {
    const EXPECTED: &'static str = "a value";

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: Value) -> Result<Self, Value> {
        value.as_float().ok_or(value)
    }
}

impl FromValue for f32 {
    const EXPECTED: &'static str = "f32";

    fn from_value(value: Value) -> Result<Self, Value> {
        value
            .as_float()
            .map(|f| f as f32)
            .filter(|f| f.is_finite())
            .ok_or(value)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "a list";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(T::from_value(item)?);
                }
                Ok(out)
            }
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Some)
    }

    fn from_resolved(key: &str, value: Option<Value>) -> Result<Self, Error> {
        match value {
            Some(value) => T::from_resolved(key, Some(value)).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_narrowing() {
        assert_eq!(u8::from_value(Value::Int(200)), Ok(200));
        assert_eq!(u8::from_value(Value::Int(300)), Err(Value::Int(300)));
        assert_eq!(u16::from_value(Value::Int(-1)), Err(Value::Int(-1)));
    }

    #[test]
    fn test_wide_ints_do_not_wrap() {
        assert_eq!(Value::try_from(u64::MAX), Err(i64::try_from(u64::MAX).unwrap_err()));
        assert!(Value::try_from(usize::MAX).is_err());
        assert_eq!(Value::try_from(42u64), Ok(Value::Int(42)));
        assert_eq!(Value::try_from(-3isize), Ok(Value::Int(-3)));
    }

    #[test]
    fn test_f32_out_of_range() {
        assert_eq!(f32::from_value(Value::Float(1e40)), Err(Value::Float(1e40)));
        assert_eq!(f32::from_value(Value::Float(2.5)), Ok(2.5));
    }

    #[test]
    fn test_float_accepts_int() {
        assert_eq!(f64::from_value(Value::Int(14)), Ok(14.0));
    }

    #[test]
    fn test_list_of_ints() {
        let value = Value::from(vec![1i64, 2, 3]);
        assert_eq!(Vec::<i64>::from_value(value), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_list_with_wrong_items() {
        let value = Value::from(vec!["a", "b"]);
        assert!(Vec::<i64>::from_value(value).is_err());
    }

    #[test]
    fn test_option_absent() {
        let result: Option<String> = FromValue::from_resolved("name", None).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_required_absent_is_type_error() {
        let result = String::from_resolved("name", None);
        match result {
            Err(Error::Type { key, found, .. }) => {
                assert_eq!(key, "name");
                assert_eq!(found, "nothing");
            }
            other => panic!("expected Type error, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatch_reports_found_kind() {
        let result = bool::from_resolved("debug", Some(Value::Str("yes".into())));
        assert!(matches!(result, Err(Error::Type { found: "a string", .. })));
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::from(vec![Value::Int(1), Value::Str("a".into()), Value::Bool(true)]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,"a",true]"#);
    }
}
