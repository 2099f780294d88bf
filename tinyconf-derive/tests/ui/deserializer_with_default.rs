use tinyconf::Config;

#[derive(Config)]
struct Settings {
    #[conf(deserializer = "parse_list", default)]
    pub items: Vec<String>,
}

fn main() {}
