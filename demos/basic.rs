//! Basic usage example

use tinyconf::{Config, IniDeserializer};

#[derive(Debug, Config)]
#[conf(section = "server")]
struct ServerConfig {
    // Required field: a missing host aborts the load
    pub host: String,

    // With default value
    #[conf(default = 8080)]
    pub port: u16,

    // Float field
    #[conf(default = 2.5)]
    pub timeout_secs: f64,

    // Boolean field: "1", "y", "yes", "t" and "true" are true
    #[conf(default)]
    pub debug: bool,

    // Comma separated list
    #[conf(default)]
    pub allowed_origins: Vec<String>,
}

const CONFIG: &str = "
[server]
host = 0.0.0.0
port = 3000
debug = yes
allowed_origins = https://example.com,https://example.org
";

fn main() -> anyhow::Result<()> {
    let de = IniDeserializer::builder()
        .string(CONFIG)
        .section("server")
        .build()?;

    let config = ServerConfig::deserialize_from(&de)?;

    println!("Configuration loaded:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  Timeout: {}s", config.timeout_secs);
    println!("  Debug: {}", config.debug);
    println!("  Allowed Origins: {:?}", config.allowed_origins);

    Ok(())
}
