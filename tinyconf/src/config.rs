//! Typed configuration structs

use std::path::Path;

use crate::de::Deserializer;
use crate::env::EnvDeserializer;
use crate::error::Error;
use crate::ini::IniDeserializer;
use crate::schema::{Resolved, Schema};

/// A struct with a declared schema and a typed view of its resolved values.
///
/// Usually implemented with `#[derive(Config)]`. Each call builds a fresh
/// schema, so every load runs exactly one resolution pass over new field
/// descriptors.
pub trait Config: Sized {
    /// Declaration view of the struct.
    fn schema() -> Result<Schema, Error>;

    /// Build the struct from a resolved pass over [`schema`](Config::schema).
    fn from_resolved(resolved: Resolved) -> Result<Self, Error>;

    /// Load the configuration from any deserializer.
    fn deserialize_from<D: Deserializer + ?Sized>(source: &D) -> Result<Self, Error> {
        let resolved = source.deserialize(Self::schema()?)?;
        Self::from_resolved(resolved)
    }

    /// Load the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// - Strict fields are missing
    /// - Values fail validation for their field kind
    fn from_env() -> Result<Self, Error> {
        Self::deserialize_from(&EnvDeserializer::from_env())
    }

    /// Load the configuration from INI text in section-aware mode.
    fn from_ini_str(text: &str) -> Result<Self, Error> {
        Self::deserialize_from(&text.parse::<IniDeserializer>()?)
    }

    /// Load the configuration from an INI file in section-aware mode.
    ///
    /// # Errors
    ///
    /// Besides resolution errors, fails with [`Error::Read`] when the file
    /// cannot be read and [`Error::Parse`] when it is not valid INI.
    fn from_ini_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::deserialize_from(&IniDeserializer::from_file(path)?)
    }
}
