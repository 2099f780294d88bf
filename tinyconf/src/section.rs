//! Sections route fields to a named INI section

/// A named grouping of fields.
///
/// A section does not own its fields: it lists the attribute names of fields
/// declared on the same schema and, during section-aware deserialization,
/// tags each of them with its name.
///
/// ```rust
/// use tinyconf::{Field, Schema, Section};
///
/// let schema = Schema::builder()
///     .field("username_mysql", Field::plain().name("username"))
///     .field("passwd", Field::plain())
///     .section("MYSQL", Section::new(["username_mysql", "passwd"]))
///     .build()
///     .unwrap();
/// assert_eq!(schema.sections().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: Option<String>,
    contents: Vec<String>,
}

impl Section {
    pub fn new<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            contents: contents.into_iter().map(Into::into).collect(),
        }
    }

    /// Section name in the source. Without it, the attribute name the section
    /// is declared under is used.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Attribute names of the member fields, in declaration order
    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    /// Name used for tagging when the section is declared under `attr`
    pub fn resolved_name<'a>(&'a self, attr: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_falls_back_to_attribute() {
        let section = Section::new(["a"]);
        assert_eq!(section.resolved_name("PASSMARK"), "PASSMARK");

        let section = Section::new(["a"]).name("mysql");
        assert_eq!(section.resolved_name("MYSQL"), "mysql");
    }

    #[test]
    fn test_contents_keep_order() {
        let section = Section::new(["token", "username"]);
        assert_eq!(section.contents(), ["token", "username"]);
    }
}
