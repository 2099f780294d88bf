use tinyconf::Config;

#[derive(Config)]
struct Settings {
    #[conf(default)]
    pub fallback: Option<String>,
}

fn main() {}
