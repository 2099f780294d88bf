use tinyconf::Config;

#[derive(Config)]
struct Settings {
    #[conf(default = "fallback".to_string())]
    pub fallback: Option<String>,
}

fn main() {}
