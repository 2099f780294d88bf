//! INI-backed deserializer

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ::ini::{Ini, ParseOption};

use crate::de::Deserializer;
use crate::error::Error;
use crate::field::Field;

/// Name of the section whose keys every other section falls back to.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Deserializer reading raw values from INI text.
///
/// Two modes are supported:
///
/// - **Explicit section**: one section, named with
///   [`IniDeserializerBuilder::section`], supplies every field.
/// - **Section-aware**: each field reads from the section it is tagged with
///   through a [`Section`](crate::Section). Fields outside any section, and
///   sections missing from the text, resolve as absent.
///
/// Keys found in the `DEFAULT` section (or before the first header) are
/// visible from every other section. Keys are case-insensitive unless
/// [`case_sensitive`](IniDeserializerBuilder::case_sensitive) is set.
/// Indented lines continue the previous value, joined with `\n`.
///
/// ```rust
/// use tinyconf::{Deserializer, Field, IniDeserializer, Schema};
///
/// let de = IniDeserializer::builder()
///     .string("[server]\nport = 8080\n")
///     .section("server")
///     .build()
///     .unwrap();
/// let schema = Schema::builder()
///     .field("port", Field::integer())
///     .build()
///     .unwrap();
/// let resolved = de.deserialize(schema).unwrap();
/// assert_eq!(resolved.value::<u16>("port").unwrap(), 8080);
/// ```
#[derive(Debug, Clone)]
pub struct IniDeserializer {
    sections: HashMap<String, HashMap<String, String>>,
    order: Vec<String>,
    defaults: HashMap<String, String>,
    default_section: String,
    section: Option<String>,
    case_sensitive: bool,
}

impl IniDeserializer {
    pub fn builder() -> IniDeserializerBuilder {
        IniDeserializerBuilder::default()
    }

    /// Section-aware deserializer reading the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::builder().file(path).build()
    }

    /// Section-aware deserializer reading `reader` to the end.
    ///
    /// The reader is not closed; it is dropped by the builder once read.
    pub fn from_reader(reader: impl Read + 'static) -> Result<Self, Error> {
        Self::builder().reader(reader).build()
    }

    /// Names of the sections found in the text, in source order, excluding
    /// the default section.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Whether `name` is available, either as a parsed section or as the
    /// default section.
    pub fn has_section(&self, name: &str) -> bool {
        name == self.default_section || self.sections.contains_key(name)
    }

    /// The explicitly selected section, if any
    pub fn selected_section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Look up `key` in `section`, falling back to the default section when
    /// `section` exists but lacks the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = self.fold(key);
        if section == self.default_section {
            return self.defaults.get(key.as_ref()).map(String::as_str);
        }
        let entries = self.sections.get(section)?;
        entries
            .get(key.as_ref())
            .or_else(|| self.defaults.get(key.as_ref()))
            .map(String::as_str)
    }

    fn fold<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(key.to_lowercase())
        }
    }

    fn parse(text: &str, options: &IniDeserializerBuilder) -> Result<Self, Error> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, opt)?;

        let mut de = Self {
            sections: HashMap::new(),
            order: Vec::new(),
            defaults: HashMap::new(),
            default_section: options.default_section.clone(),
            section: options.section.clone(),
            case_sensitive: options.case_sensitive,
        };

        for (name, properties) in ini.iter() {
            let entries = match name {
                None => &mut de.defaults,
                Some(name) if name == de.default_section => &mut de.defaults,
                Some(name) => {
                    if !de.sections.contains_key(name) {
                        de.order.push(name.to_string());
                    }
                    de.sections.entry(name.to_string()).or_default()
                }
            };
            for (key, value) in properties.iter() {
                let key = if de.case_sensitive {
                    key.to_string()
                } else {
                    key.to_lowercase()
                };
                entries.insert(key, value.to_string());
            }
        }

        tracing::debug!(
            sections = de.order.len(),
            defaults = de.defaults.len(),
            section = ?de.section,
            "loaded INI configuration"
        );

        if let Some(section) = &de.section {
            if !de.has_section(section) {
                return Err(Error::NoSection {
                    name: section.clone(),
                });
            }
        }

        Ok(de)
    }
}

impl FromStr for IniDeserializer {
    type Err = Error;

    /// Section-aware deserializer over literal INI text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::builder().string(s).build()
    }
}

impl Deserializer for IniDeserializer {
    fn raw_value(&self, field: &Field, key: &str) -> Option<&str> {
        match &self.section {
            Some(section) => self.get(section, key),
            None => field.get_section().and_then(|section| self.get(section, key)),
        }
    }

    fn section_aware(&self) -> bool {
        self.section.is_none()
    }
}

enum IniSource {
    File(PathBuf),
    Reader(Box<dyn Read>),
    Text(String),
}

impl fmt::Debug for IniSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniSource::File(path) => f.debug_tuple("File").field(path).finish(),
            IniSource::Reader(_) => f.debug_tuple("Reader").finish(),
            IniSource::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
        }
    }
}

impl IniSource {
    fn read(self) -> Result<String, Error> {
        match self {
            IniSource::File(path) => {
                fs::read_to_string(&path).map_err(|source| Error::Read { path, source })
            }
            IniSource::Reader(mut reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text).map_err(Error::Io)?;
                Ok(text)
            }
            IniSource::Text(text) => Ok(text),
        }
    }
}

/// Builder for [`IniDeserializer`].
///
/// Exactly one of [`file`](Self::file), [`reader`](Self::reader) or
/// [`string`](Self::string) must be given.
#[derive(Debug)]
pub struct IniDeserializerBuilder {
    sources: Vec<IniSource>,
    section: Option<String>,
    default_section: String,
    case_sensitive: bool,
}

impl Default for IniDeserializerBuilder {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            section: None,
            default_section: DEFAULT_SECTION.to_string(),
            case_sensitive: false,
        }
    }
}

impl IniDeserializerBuilder {
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(IniSource::File(path.as_ref().to_path_buf()));
        self
    }

    pub fn reader(mut self, reader: impl Read + 'static) -> Self {
        self.sources.push(IniSource::Reader(Box::new(reader)));
        self
    }

    pub fn string(mut self, text: impl Into<String>) -> Self {
        self.sources.push(IniSource::Text(text.into()));
        self
    }

    /// Read every field from this section instead of from the field's own
    /// section tag.
    pub fn section(mut self, name: impl Into<String>) -> Self {
        self.section = Some(name.into());
        self
    }

    /// Name of the fallback section. Defaults to [`DEFAULT_SECTION`].
    pub fn default_section(mut self, name: impl Into<String>) -> Self {
        self.default_section = name.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn build(mut self) -> Result<IniDeserializer, Error> {
        let source = match self.sources.len() {
            0 => return Err(Error::NoConfig),
            1 => self.sources.remove(0),
            _ => return Err(Error::MultipleSources),
        };
        let text = source.read()?;
        IniDeserializer::parse(&text, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::schema::Schema;
    use crate::section::Section;
    use crate::value::Value;
    use std::io::Cursor;

    const MULTI: &str = "\
[DEFAULT]
token = 1234
username = hello

[MYSQL]
username = jude
passwd = 12345
;host = j.net

[PASSMARK]
client = fred
";

    fn multi_schema() -> Schema {
        Schema::builder()
            .field("token", Field::integer())
            .field("username", Field::plain())
            .field("username_mysql", Field::plain().name("username"))
            .field("passwd", Field::plain())
            .field("host", Field::plain())
            .field("client", Field::plain())
            .field("orphan", Field::plain().name("token"))
            .section("DEFAULT", Section::new(["token", "username"]))
            .section("MYSQL", Section::new(["username_mysql", "passwd", "host"]))
            .section("PASSMARK", Section::new(["client"]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_section_aware() {
        let de: IniDeserializer = MULTI.parse().unwrap();
        assert!(de.section_aware());
        let resolved = de.deserialize(multi_schema()).unwrap();

        assert_eq!(resolved.get("token"), Some(&Value::Int(1234)));
        assert_eq!(resolved.get("username"), Some(&Value::from("hello")));
        assert_eq!(resolved.get("username_mysql"), Some(&Value::from("jude")));
        assert_eq!(resolved.get("passwd"), Some(&Value::from("12345")));
        assert_eq!(resolved.get("host"), None);
        assert_eq!(resolved.get("client"), Some(&Value::from("fred")));
        // not in any section
        assert_eq!(resolved.get("orphan"), None);
    }

    #[test]
    fn test_section_aware_strict_orphan() {
        let schema = Schema::builder()
            .field("token", Field::plain().strict(true))
            .build()
            .unwrap();
        let de: IniDeserializer = MULTI.parse().unwrap();
        let err = de.deserialize(schema).unwrap_err();
        assert_eq!(err.as_field_error(), Some(&FieldError::MissingFieldData));
    }

    #[test]
    fn test_default_section_fallback() {
        let de: IniDeserializer = MULTI.parse().unwrap();
        assert_eq!(de.get("PASSMARK", "token"), Some("1234"));
        assert_eq!(de.get("MYSQL", "username"), Some("jude"));
        assert_eq!(de.get("MISSING", "token"), None);
        assert_eq!(de.get("DEFAULT", "passwd"), None);
    }

    #[test]
    fn test_explicit_section() {
        let de = IniDeserializer::builder()
            .string(MULTI)
            .section("MYSQL")
            .build()
            .unwrap();
        assert!(!de.section_aware());
        let resolved = de.deserialize(multi_schema()).unwrap();

        assert_eq!(resolved.get("username"), Some(&Value::from("jude")));
        assert_eq!(resolved.get("token"), Some(&Value::Int(1234)));
        assert_eq!(resolved.get("client"), None);
    }

    #[test]
    fn test_missing_explicit_section() {
        let err = IniDeserializer::builder()
            .string(MULTI)
            .section("REDIS")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::NoSection { name } if name == "REDIS"));
    }

    #[test]
    fn test_default_section_always_exists() {
        let de = IniDeserializer::builder()
            .string("")
            .section(DEFAULT_SECTION)
            .build()
            .unwrap();
        assert!(de.has_section("DEFAULT"));
    }

    #[test]
    fn test_keys_before_header_are_defaults() {
        let de: IniDeserializer = "shared = 1\n[a]\nown = 2\n".parse().unwrap();
        assert_eq!(de.get("a", "shared"), Some("1"));
        assert_eq!(de.get("a", "own"), Some("2"));
        assert_eq!(de.sections().collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn test_case_folding() {
        let text = "[S]\nToken = abc\n";
        let de: IniDeserializer = text.parse().unwrap();
        assert_eq!(de.get("S", "TOKEN"), Some("abc"));

        let de = IniDeserializer::builder()
            .string(text)
            .case_sensitive(true)
            .build()
            .unwrap();
        assert_eq!(de.get("S", "token"), None);
        assert_eq!(de.get("S", "Token"), Some("abc"));
    }

    #[test]
    fn test_custom_default_section() {
        let de = IniDeserializer::builder()
            .string("[common]\nregion = eu\n[app]\nname = x\n")
            .default_section("common")
            .build()
            .unwrap();
        assert_eq!(de.get("app", "region"), Some("eu"));
        assert_eq!(de.sections().collect::<Vec<_>>(), ["app"]);
    }

    #[test]
    fn test_semicolon_inside_value() {
        let de: IniDeserializer = "[S]\nlist = 1,2;3,4;ab\n".parse().unwrap();
        assert_eq!(de.get("S", "list"), Some("1,2;3,4;ab"));
    }

    #[test]
    fn test_indented_continuation_lines() {
        let de: IniDeserializer = "[S]\nhosts =\n    a\n    b\nname = first\n  second\nnext = c\n"
            .parse()
            .unwrap();
        assert_eq!(de.get("S", "hosts"), Some("a\nb"));
        assert_eq!(de.get("S", "name"), Some("first\nsecond"));
        assert_eq!(de.get("S", "next"), Some("c"));
    }

    #[test]
    fn test_no_config() {
        let err = IniDeserializer::builder().build().unwrap_err();
        assert!(matches!(err, Error::NoConfig));
    }

    #[test]
    fn test_multiple_sources() {
        let err = IniDeserializer::builder()
            .string("")
            .reader(Cursor::new(Vec::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MultipleSources));
    }

    #[test]
    fn test_reader() {
        let de = IniDeserializer::from_reader(Cursor::new(MULTI.as_bytes().to_vec())).unwrap();
        assert_eq!(de.get("PASSMARK", "client"), Some("fred"));
    }

    #[test]
    fn test_missing_file() {
        let err = IniDeserializer::from_file("/nonexistent/tinyconf.ini").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{MULTI}").unwrap();

        let de = IniDeserializer::from_file(file.path()).unwrap();
        assert_eq!(de.get("MYSQL", "passwd"), Some("12345"));
    }

    #[test]
    fn test_parse_error() {
        let result = "[unterminated\nkey = value\n".parse::<IniDeserializer>();
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
