//! Schema declaration and resolved-values views

use std::collections::{HashMap, HashSet};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, SchemaError};
use crate::field::{Field, FieldKind};
use crate::section::Section;
use crate::value::{FromValue, Value};

/// Declaration view of a configuration: ordered, named fields and sections.
///
/// Attribute names are unique and double as default lookup keys. A schema is
/// consumed by the deserializer that resolves it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Field)>,
    sections: Vec<(String, Section)>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Fields with their attribute names, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(attr, field)| (attr.as_str(), field))
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(attr, section)| (attr.as_str(), section))
    }

    pub fn field(&self, attr: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(name, _)| name == attr)
            .map(|(_, field)| field)
    }

    pub fn field_mut(&mut self, attr: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == attr)
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stamp every field listed in a section with that section's name.
    pub(crate) fn tag_sections(&mut self) {
        let tags: Vec<(String, String)> = self
            .sections
            .iter()
            .flat_map(|(attr, section)| {
                let name = section.resolved_name(attr).to_string();
                section
                    .contents()
                    .iter()
                    .map(move |member| (member.clone(), name.clone()))
            })
            .collect();

        for (member, name) in tags {
            if let Some(field) = self.field_mut(&member) {
                field.set_section(name);
            }
        }
    }

    pub(crate) fn into_fields(self) -> Vec<(String, Field)> {
        self.fields
    }
}

/// Collects fields and sections, then checks the declaration in
/// [`build`](SchemaBuilder::build).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<(String, Field)>,
    sections: Vec<(String, Section)>,
}

impl SchemaBuilder {
    /// Declare `field` under the attribute name `attr`.
    pub fn field(mut self, attr: impl Into<String>, field: Field) -> Self {
        self.fields.push((attr.into(), field));
        self
    }

    pub fn section(mut self, attr: impl Into<String>, section: Section) -> Self {
        self.sections.push((attr.into(), section));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen = HashSet::new();
        for (attr, field) in &self.fields {
            if !seen.insert(attr.as_str()) {
                return Err(SchemaError::DuplicateField(attr.clone()));
            }
            if field.get_max_length() == 0 {
                return Err(SchemaError::ZeroMaxLength(attr.clone()));
            }
            if let FieldKind::List(options) = field.kind() {
                if options.get_delimiter().is_empty() {
                    return Err(SchemaError::EmptyDelimiter(attr.clone()));
                }
            }
        }

        let mut section_attrs = HashSet::new();
        let mut membership: HashMap<&str, &str> = HashMap::new();
        for (attr, section) in &self.sections {
            if !section_attrs.insert(attr.as_str()) {
                return Err(SchemaError::DuplicateSection(attr.clone()));
            }
            for member in section.contents() {
                if !seen.contains(member.as_str()) {
                    return Err(SchemaError::UnknownSectionMember {
                        section: attr.clone(),
                        field: member.clone(),
                    });
                }
                if let Some(first) = membership.insert(member.as_str(), attr.as_str()) {
                    if first != attr {
                        return Err(SchemaError::FieldInMultipleSections {
                            field: member.clone(),
                            first: first.to_string(),
                            second: attr.clone(),
                        });
                    }
                }
            }
        }

        Ok(Schema {
            fields: self.fields,
            sections: self.sections,
        })
    }
}

/// Resolved-values view: each declared attribute mapped to its computed value.
///
/// `None` means the field was absent from the source and had no default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    values: Vec<(String, Option<Value>)>,
}

impl Resolved {
    pub(crate) fn push(&mut self, attr: String, value: Option<Value>) {
        self.values.push((attr, value));
    }

    /// Returns the value of `attr`, or `None` when the attribute is unknown
    /// or resolved to nothing.
    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == attr)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn contains_key(&self, attr: &str) -> bool {
        self.values.iter().any(|(name, _)| name == attr)
    }

    /// Convert the value of `attr` into `T`.
    pub fn value<T: FromValue>(&self, attr: &str) -> Result<T, Error> {
        T::from_resolved(attr, self.get(attr).cloned())
    }

    /// Move the value of `attr` out and convert it into `T`.
    ///
    /// Used by the derive macro; a second take of the same attribute sees
    /// nothing.
    pub fn take<T: FromValue>(&mut self, attr: &str) -> Result<T, Error> {
        let value = self
            .values
            .iter_mut()
            .find(|(name, _)| name == attr)
            .and_then(|(_, value)| value.take());
        T::from_resolved(attr, value)
    }

    /// Attribute names and values, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values
            .iter()
            .map(|(attr, value)| (attr.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Resolved {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (attr, value) in &self.values {
            map.serialize_entry(attr, value)?;
        }
        map.end()
    }
}
