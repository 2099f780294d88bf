use tinyconf::Config;

#[derive(Config)]
struct Settings {
    #[conf(deserializer = "parse_secs", kind = "integer")]
    pub timeout: u64,
}

fn main() {}
