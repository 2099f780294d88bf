//! Example demonstrating environment variables with a prefix

use tinyconf::{Config, EnvDeserializer};

#[derive(Debug, Config)]
struct ClientConfig {
    // Loaded from MYAPP_TOKEN
    #[conf(name = "TOKEN", strict)]
    pub token: String,

    #[conf(name = "CLIENT")]
    pub client_id: u64,

    #[conf(name = "APIV", default = "8")]
    pub api_version: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_TOKEN", "abcdefghijklmno");
    std::env::set_var("MYAPP_CLIENT", "123456789");

    let config = ClientConfig::deserialize_from(&EnvDeserializer::from_env().prefix("MYAPP_"))?;

    println!("Configuration with prefix 'MYAPP_':");
    println!("  Token: {}", config.token);
    println!("  Client ID: {}", config.client_id);
    println!("  API Version: {}", config.api_version);

    Ok(())
}
