use tinyconf::Config;

#[derive(Config)]
struct Settings {
    #[conf(delimiter = ";")]
    pub name: String,
}

fn main() {}
