//! Declarative configuration schemas loaded from INI files or environment variables
//!
//! `tinyconf` lets you describe a configuration as a set of named, typed fields,
//! optionally grouped into sections, and populates it from INI text or from the
//! process environment. Every field goes through the same resolution order:
//! raw value → strict check → type coercion → default fallback.
//!
//! # Features
//!
//! - **Declarative**: Automatic schema and typed struct with `#[derive(Config)]`
//! - **Field kinds**: plain strings, integers, floats, booleans and lists
//! - **Sections**: Route fields to INI sections, with `DEFAULT` fallback
//! - **Fail fast**: The first missing strict field or invalid value aborts the load
//! - **Runtime schemas**: Build a [`Schema`] by hand when the shape is dynamic
//!
//! # Field Kinds
//!
//! | Kind | Value | Rejected with |
//! |---|---|---|
//! | plain | the raw string | - |
//! | integer | base-10 `i64` | [`FieldError::InvalidInteger`] |
//! | float | `f64` | [`FieldError::InvalidFloat`] |
//! | boolean | raw is one of `1`, `y`, `yes`, `t`, `true` | - |
//! | list | raw split on `,`, then filtered and mapped | [`FieldError::InvalidListItem`] |
//!
//! # Example
//!
//! ```rust
//! use tinyconf::Config;
//!
//! #[derive(Debug, Config)]
//! struct Settings {
//!     #[conf(strict)]
//!     pub token: String,
//!
//!     #[conf(name = "client")]
//!     pub client_id: u64,
//!
//!     #[conf(name = "apiv", default = "8")]
//!     pub api_version: String,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = Settings::deserialize_from(
//!     &tinyconf::IniDeserializer::builder()
//!         .string("[DEFAULT]\ntoken = abcdefghijklmno\nclient = 123456789\n")
//!         .section("DEFAULT")
//!         .build()?,
//! )?;
//! assert_eq!(settings.token, "abcdefghijklmno");
//! assert_eq!(settings.client_id, 123456789);
//! assert_eq!(settings.api_version, "8");
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[conf(section = "NAME")]`
//!
//! Read the field from an INI section. When the INI deserializer is built
//! without an explicit section, each field reads from its own section and
//! fields without one resolve as absent.
//!
//! ```rust
//! # use tinyconf::Config;
//! #[derive(Config)]
//! struct Database {
//!     #[conf(section = "MYSQL")]
//!     pub username: String,
//!
//!     #[conf(section = "MYSQL")]
//!     pub host: Option<String>,
//! }
//! # fn main() -> anyhow::Result<()> {
//! let db = Database::from_ini_str("[MYSQL]\nusername = jude\n")?;
//! assert_eq!(db.username, "jude");
//! assert_eq!(db.host, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## List options
//!
//! `delimiter`, `remove_blank`, `filter` and `map` shape list fields.
//!
//! ```rust
//! # use tinyconf::Config;
//! fn is_one(item: &str) -> bool {
//!     item == "1"
//! }
//!
//! #[derive(Config)]
//! #[conf(section = "CONTENTS")]
//! struct Contents {
//!     #[conf(filter = "is_one", map = "str::parse::<i64>")]
//!     pub filterlist: Vec<i64>,
//!
//!     #[conf(name = "differentlist", delimiter = ";")]
//!     pub list_b: Vec<String>,
//! }
//! # fn main() -> anyhow::Result<()> {
//! let contents = Contents::from_ini_str(
//!     "[CONTENTS]\nfilterlist = 1,0,1,0,1\ndifferentlist = 1,2;3,4;ab\n",
//! )?;
//! assert_eq!(contents.filterlist, vec![1, 1, 1]);
//! assert_eq!(contents.list_b, vec!["1,2", "3,4", "ab"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime schemas
//!
//! Without the derive macro, declare a [`Schema`] and read the [`Resolved`]
//! values directly.
//!
//! ```rust
//! use tinyconf::{Deserializer, EnvDeserializer, Field, Schema};
//!
//! # fn main() -> Result<(), tinyconf::Error> {
//! let schema = Schema::builder()
//!     .field("debug", Field::boolean().name("DEBUG").default(false))
//!     .field("workers", Field::integer().name("WORKERS").default(4))
//!     .build()?;
//!
//! let env = EnvDeserializer::from_vars([("DEBUG", "yes")]);
//! let resolved = env.deserialize(schema)?;
//! assert!(resolved.value::<bool>("debug")?);
//! assert_eq!(resolved.value::<u32>("workers")?, 4);
//! # Ok(())
//! # }
//! ```

mod config;
pub mod de;
mod env;
mod error;
mod field;
mod ini;
mod schema;
mod section;
mod value;

pub use config::Config;
pub use de::Deserializer;
pub use env::EnvDeserializer;
pub use error::{Error, FieldError, SchemaError};
pub use field::{
    BooleanOptions, Field, FieldKind, ListOptions, DEFAULT_COMPARATORS, DEFAULT_DELIMITER,
    DEFAULT_MAX_LENGTH,
};
pub use ini::{IniDeserializer, IniDeserializerBuilder, DEFAULT_SECTION};
pub use schema::{Resolved, Schema, SchemaBuilder};
pub use section::Section;
pub use tinyconf_derive::Config;
pub use value::{FromValue, Value};
