//! Example demonstrating runtime schemas and list reconfiguration

use tinyconf::{Deserializer, Field, FieldKind, IniDeserializer, ListOptions, Schema};

const CONFIG: &str = "
[CONTENTS]
integer = 1
float = 5.0
list = 1,2,3,4
differentlist = 1,2;3,4;ab
filterlist = 1,0,1,0,1
";

fn main() -> anyhow::Result<()> {
    let schema = Schema::builder()
        .field("integer", Field::integer())
        .field("float_", Field::float().name("float"))
        .field("list_a", Field::list().name("list"))
        .field(
            "list_b",
            Field::new(FieldKind::List(ListOptions::new().delimiter(";"))).name("differentlist"),
        )
        .field(
            "filterlist",
            Field::new(FieldKind::List(
                ListOptions::new()
                    .filter(|item| item == "1")
                    .map(str::parse::<i64>),
            )),
        )
        .build()?;

    let de = IniDeserializer::builder()
        .string(CONFIG)
        .section("CONTENTS")
        .build()?;
    let resolved = de.deserialize(schema)?;

    println!("Resolved values:");
    for (attr, value) in resolved.iter() {
        println!("  {}: {:?}", attr, value);
    }
    println!("As JSON: {}", serde_json::to_string_pretty(&resolved)?);

    // Filters and maps run on every read, so a field can be reshaped later
    let mut field = Field::list();
    field.assign(Some("a,b,e,g"))?;
    field.validate()?;
    println!("List: {:?}", field.value());

    if let Some(options) = field.list_options_mut() {
        options.set_filter(|item| item == "a" || item == "b");
    }
    println!("Filtered list: {:?}", field.value());

    Ok(())
}
