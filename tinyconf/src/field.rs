//! Field descriptors: raw value, validation state and typed output

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::FieldError;
use crate::value::Value;

/// Default ceiling on the length of a raw value, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Default delimiter of list fields.
pub const DEFAULT_DELIMITER: &str = ",";

/// Tokens a boolean field treats as true unless configured otherwise.
pub const DEFAULT_COMPARATORS: [&str; 5] = ["1", "y", "yes", "t", "true"];

type FilterFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;
type MapFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Options of a list field.
///
/// The raw value is split on `delimiter`, blank items are optionally dropped,
/// then `filter` selects items and `map` converts each selected item.
#[derive(Clone)]
pub struct ListOptions {
    delimiter: String,
    remove_blank: bool,
    filter: Option<FilterFn>,
    map: Option<MapFn>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            remove_blank: false,
            filter: None,
            map: None,
        }
    }
}

impl fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOptions")
            .field("delimiter", &self.delimiter)
            .field("remove_blank", &self.remove_blank)
            .field("filter", &self.filter.is_some())
            .field("map", &self.map.is_some())
            .finish()
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Drop empty items before the filter runs.
    pub fn remove_blank(mut self, remove_blank: bool) -> Self {
        self.remove_blank = remove_blank;
        self
    }

    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.set_filter(filter);
        self
    }

    /// Convert each accepted item, e.g. `.map(str::parse::<i64>)`.
    pub fn map<F, V, E>(mut self, map: F) -> Self
    where
        F: Fn(&str) -> Result<V, E> + Send + Sync + 'static,
        V: Into<Value>,
        E: fmt::Display,
    {
        self.set_map(map);
        self
    }

    /// Replace the filter in place. The next read of the field's value
    /// uses the new predicate.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
    }

    /// Replace the map function in place.
    pub fn set_map<F, V, E>(&mut self, map: F)
    where
        F: Fn(&str) -> Result<V, E> + Send + Sync + 'static,
        V: Into<Value>,
        E: fmt::Display,
    {
        let wrapped: MapFn = Arc::new(move |item: &str| -> Result<Value, String> {
            map(item).map(Into::into).map_err(|e| e.to_string())
        });
        self.map = Some(wrapped);
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn clear_map(&mut self) {
        self.map = None;
    }

    pub fn get_delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) {
        self.delimiter = delimiter.into();
    }

    fn selected<'a>(&'a self, raw: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        raw.split(self.delimiter.as_str())
            .filter(move |item| !(self.remove_blank && item.is_empty()))
            .filter(move |item| self.filter.as_ref().map_or(true, |f| f(*item)))
    }

    fn convert(&self, raw: &str) -> Result<Vec<Value>, FieldError> {
        self.selected(raw)
            .map(|item| match &self.map {
                Some(map) => map(item).map_err(|message| FieldError::InvalidListItem {
                    item: item.to_string(),
                    message,
                }),
                None => Ok(Value::Str(item.to_string())),
            })
            .collect()
    }
}

/// Options of a boolean field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanOptions {
    comparators: BTreeSet<String>,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self::new(DEFAULT_COMPARATORS)
    }
}

impl BooleanOptions {
    /// Raw values equal (case-sensitively) to one of `comparators` are true,
    /// anything else is false.
    pub fn new<I, S>(comparators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            comparators: comparators.into_iter().map(Into::into).collect(),
        }
    }

    pub fn comparators(&self) -> &BTreeSet<String> {
        &self.comparators
    }

    fn is_truthy(&self, raw: &str) -> bool {
        self.comparators.contains(raw)
    }
}

/// The type a field coerces its raw string into.
#[derive(Debug, Clone, Default)]
pub enum FieldKind {
    /// Identity: the raw string is the value.
    #[default]
    Plain,
    Integer,
    Float,
    Boolean(BooleanOptions),
    List(ListOptions),
}

impl FieldKind {
    /// Shape check of a present raw value.
    ///
    /// Integer and float values must consist of allowed characters only and
    /// must then parse; the character check alone lets through inputs such
    /// as `--1` or `1.2.3`.
    fn check(&self, raw: &str) -> Result<(), FieldError> {
        match self {
            FieldKind::Integer => {
                let allowed = raw.chars().all(|c| c == '-' || c.is_ascii_digit());
                if !allowed || raw.parse::<i64>().is_err() {
                    return Err(FieldError::InvalidInteger {
                        raw: raw.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::Float => {
                let allowed = raw
                    .chars()
                    .all(|c| c == '-' || c == '.' || c.is_ascii_digit());
                if !allowed || raw.parse::<f64>().is_err() {
                    return Err(FieldError::InvalidFloat {
                        raw: raw.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::List(options) if options.map.is_some() => options.convert(raw).map(|_| ()),
            FieldKind::Plain | FieldKind::Boolean(_) | FieldKind::List(_) => Ok(()),
        }
    }

    fn coerce(&self, raw: &str) -> Option<Value> {
        match self {
            FieldKind::Plain => Some(Value::Str(raw.to_string())),
            FieldKind::Integer => raw.parse().ok().map(Value::Int),
            FieldKind::Float => raw.parse().ok().map(Value::Float),
            FieldKind::Boolean(options) => Some(Value::Bool(options.is_truthy(raw))),
            FieldKind::List(options) => options.convert(raw).ok().map(Value::List),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Plain => "plain",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean(_) => "boolean",
            FieldKind::List(_) => "list",
        }
    }
}

/// A declared configuration slot.
///
/// A field holds the raw string assigned during deserialization together with
/// its validation state, and derives its typed [`value`](Field::value) on
/// every read.
///
/// ```rust
/// use tinyconf::{Field, Value};
///
/// let mut port = Field::integer().default(8080);
/// assert_eq!(port.value(), Some(Value::Int(8080)));
///
/// port.assign(Some("9090")).unwrap();
/// port.validate().unwrap();
/// assert_eq!(port.value(), Some(Value::Int(9090)));
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: Option<String>,
    raw: Option<String>,
    valid: bool,
    strict: bool,
    default: Option<Value>,
    section: Option<String>,
    max_length: usize,
    kind: FieldKind,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            name: None,
            raw: None,
            valid: true,
            strict: false,
            default: None,
            section: None,
            max_length: DEFAULT_MAX_LENGTH,
            kind,
        }
    }

    /// A field whose value is the raw string itself.
    pub fn plain() -> Self {
        Self::new(FieldKind::Plain)
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    pub fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    /// A boolean field using [`DEFAULT_COMPARATORS`].
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean(BooleanOptions::default()))
    }

    /// A list field split on [`DEFAULT_DELIMITER`].
    pub fn list() -> Self {
        Self::new(FieldKind::List(ListOptions::default()))
    }

    /// Source key to look the field up with. Without it, the attribute name
    /// the field is declared under is used.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn get_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn get_max_length(&self) -> usize {
        self.max_length
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut FieldKind {
        &mut self.kind
    }

    /// List options of a list field, for reconfiguring filter or map after
    /// the field has been populated.
    pub fn list_options_mut(&mut self) -> Option<&mut ListOptions> {
        match &mut self.kind {
            FieldKind::List(options) => Some(options),
            _ => None,
        }
    }

    pub(crate) fn set_section(&mut self, section: impl Into<String>) {
        self.section = Some(section.into());
    }

    /// Set the raw value. Does not validate.
    ///
    /// A value longer than `max_length` characters is rejected immediately;
    /// the field is then left absent and invalid.
    pub fn assign(&mut self, raw: Option<&str>) -> Result<(), FieldError> {
        if let Some(raw) = raw {
            let length = raw.chars().count();
            if length > self.max_length {
                self.raw = None;
                self.valid = false;
                return Err(FieldError::FieldLengthExceeded {
                    length,
                    max: self.max_length,
                });
            }
        }
        self.raw = raw.map(str::to_string);
        self.valid = true;
        Ok(())
    }

    /// Check the raw value against the field's rules.
    pub fn validate(&mut self) -> Result<(), FieldError> {
        let Some(raw) = self.raw.as_deref() else {
            if self.strict {
                self.valid = false;
                return Err(FieldError::MissingFieldData);
            }
            self.valid = true;
            return Ok(());
        };

        match self.kind.check(raw) {
            Ok(()) => {
                self.valid = true;
                Ok(())
            }
            Err(e) => {
                self.valid = false;
                Err(e)
            }
        }
    }

    /// The typed value, derived from the current raw value, validity and
    /// default on every call.
    pub fn value(&self) -> Option<Value> {
        match self.raw.as_deref() {
            Some(raw) if self.valid => self
                .kind
                .coerce(raw)
                .or_else(|| self.default.clone()),
            _ => self.default.clone(),
        }
    }
}
