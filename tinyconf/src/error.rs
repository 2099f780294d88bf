//! Error types for schema declaration and deserialization

use std::path::PathBuf;

/// Errors raised by a single field while a raw value is assigned or validated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// A strict field had no value in the source.
    #[error("field is strict but no value was supplied")]
    MissingFieldData,

    /// The raw value of an integer field is not a base-10 integer.
    #[error("'{raw}' is not a valid integer")]
    InvalidInteger {
        /// Rejected raw value
        raw: String,
    },

    /// The raw value of a float field is not a floating point number.
    #[error("'{raw}' is not a valid float")]
    InvalidFloat {
        /// Rejected raw value
        raw: String,
    },

    /// The map function of a list field rejected one of the elements.
    #[error("list item '{item}' was rejected: {message}")]
    InvalidListItem {
        /// Element that failed to map
        item: String,
        /// Message produced by the map function
        message: String,
    },

    /// The raw value is longer than the field's `max_length`.
    #[error("value is {length} characters long, the limit is {max}")]
    FieldLengthExceeded {
        /// Length of the rejected value, in characters
        length: usize,
        /// Configured ceiling
        max: usize,
    },
}

/// Malformed schema declarations, detected when the schema is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("section '{0}' is declared more than once")]
    DuplicateSection(String),

    #[error("section '{section}' lists '{field}', which is not a declared field")]
    UnknownSectionMember { section: String, field: String },

    #[error("field '{field}' is listed in both section '{first}' and section '{second}'")]
    FieldInMultipleSections {
        field: String,
        first: String,
        second: String,
    },

    #[error("list field '{0}' has an empty delimiter")]
    EmptyDelimiter(String),

    #[error("field '{0}' has a max_length of zero")]
    ZeroMaxLength(String),

    #[error("default of field '{field}' cannot be stored: {message}")]
    InvalidDefault { field: String, message: String },
}

impl SchemaError {
    /// Create an invalid default error (used by macro-generated code)
    #[doc(hidden)]
    pub fn invalid_default(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::InvalidDefault {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

/// Errors that can occur while loading a configuration.
///
/// Every resolution error aborts the whole pass: no partially populated
/// configuration is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field failed assignment or validation.
    #[error("field '{key}': {source}")]
    Field {
        /// Key the field was looked up with
        key: String,
        /// Underlying field failure
        source: FieldError,
    },

    /// The schema declaration is malformed.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    /// An INI deserializer was built without a file, reader or string.
    #[error("no configuration source was given (expected a file, a reader or a string)")]
    NoConfig,

    /// An INI deserializer was given more than one source.
    #[error("more than one configuration source was given")]
    MultipleSources,

    /// The explicitly requested INI section does not exist.
    #[error("section '{name}' not found in configuration")]
    NoSection {
        /// Requested section name
        name: String,
    },

    /// Failed to read a configuration file.
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        /// Path that failed to be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to read a configuration stream.
    #[error("failed to read configuration stream: {0}")]
    Io(#[source] std::io::Error),

    /// The INI text could not be parsed.
    #[error("failed to parse INI configuration: {0}")]
    Parse(#[from] ::ini::ParseError),

    /// A resolved value does not fit the requested Rust type.
    #[error("field '{key}' resolved to {found}, expected {expected}")]
    Type {
        /// Attribute name of the field
        key: String,
        /// Type that was requested
        expected: &'static str,
        /// Kind of value that was found
        found: &'static str,
    },

    /// A custom deserializer function rejected the raw value.
    #[error("failed to deserialize field '{key}' as {type_name}: {message}")]
    Deserialize {
        /// Attribute name of the field
        key: String,
        /// Fully qualified type name the value was deserialized into
        type_name: String,
        /// Error message from the deserializer function
        message: String,
    },
}

impl Error {
    /// Wrap a field failure with the key it was resolved under
    pub fn field(key: impl Into<String>, source: FieldError) -> Self {
        Self::Field {
            key: key.into(),
            source,
        }
    }

    /// Create a deserialize error (used by macro-generated code)
    #[doc(hidden)]
    pub fn deserialize_error<T>(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Deserialize {
            key: key.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Returns the underlying field error, if this is one.
    pub fn as_field_error(&self) -> Option<&FieldError> {
        match self {
            Self::Field { source, .. } => Some(source),
            _ => None,
        }
    }
}
