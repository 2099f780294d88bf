//! Resolution engine shared by every deserializer

use crate::error::Error;
use crate::field::Field;
use crate::schema::{Resolved, Schema};

/// A source of raw string values that can be bound onto a [`Schema`].
///
/// Implementors only answer lookups; [`deserialize`](Deserializer::deserialize)
/// runs the resolution pass.
pub trait Deserializer {
    /// Raw value for `key`. `field` is passed so section-aware sources can
    /// read the field's section tag.
    fn raw_value(&self, field: &Field, key: &str) -> Option<&str>;

    /// Whether sections in the schema should tag their fields before lookup.
    fn section_aware(&self) -> bool {
        false
    }

    /// Resolve every field of `schema` against this source.
    ///
    /// The first field that fails assignment or validation aborts the pass.
    fn deserialize(&self, schema: Schema) -> Result<Resolved, Error> {
        resolve(self, schema)
    }
}

/// Run one resolution pass: tag, look up, validate, commit.
pub fn resolve<D: Deserializer + ?Sized>(source: &D, mut schema: Schema) -> Result<Resolved, Error> {
    let section_aware = source.section_aware();
    if section_aware {
        schema.tag_sections();
    }
    tracing::debug!(fields = schema.len(), section_aware, "deserializing schema");

    let mut resolved = Resolved::default();
    for (attr, mut field) in schema.into_fields() {
        let key = field.get_name().unwrap_or(&attr).to_string();
        let raw = source.raw_value(&field, &key);
        tracing::debug!(
            field = %attr,
            key = %key,
            section = ?field.get_section(),
            present = raw.is_some(),
            "resolving field"
        );

        field
            .assign(raw)
            .and_then(|()| field.validate())
            .map_err(|e| Error::field(key.as_str(), e))?;

        resolved.push(attr, field.value());
    }

    Ok(resolved)
}
