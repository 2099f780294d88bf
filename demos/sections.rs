//! Example demonstrating section-aware INI loading

use tinyconf::Config;

#[derive(Debug, Config)]
struct SectionedConfig {
    // Keys in [DEFAULT] are visible from every section
    #[conf(section = "DEFAULT")]
    pub token: i64,

    #[conf(section = "DEFAULT")]
    pub username: String,

    // Same key, different section
    #[conf(name = "username", section = "MYSQL")]
    pub username_mysql: String,

    #[conf(section = "MYSQL")]
    pub passwd: String,

    // Commented out below, resolves to None
    #[conf(section = "MYSQL")]
    pub host: Option<String>,

    #[conf(section = "PASSMARK")]
    pub client: String,
}

const CONFIG: &str = "
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

fn main() -> anyhow::Result<()> {
    let config = SectionedConfig::from_ini_str(CONFIG)?;

    println!("Sectioned configuration:");
    println!("  Token: {}", config.token);
    println!("  Username: {}", config.username);
    println!("  MySQL Username: {}", config.username_mysql);
    println!("  MySQL Password: {}", config.passwd);
    println!("  MySQL Host: {:?}", config.host);
    println!("  Passmark Client: {}", config.client);

    Ok(())
}
