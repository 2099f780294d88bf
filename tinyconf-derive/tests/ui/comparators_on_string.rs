use tinyconf::Config;

#[derive(Config)]
struct Settings {
    #[conf(comparators = ["on", "enabled"])]
    pub mode: String,
}

fn main() {}
