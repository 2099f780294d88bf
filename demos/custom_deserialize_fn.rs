//! Example demonstrating custom deserializer functions

use std::time::Duration;
use tinyconf::Config;

// Custom deserializer for durations given in seconds
fn seconds(s: &str) -> Result<Duration, String> {
    s.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| format!("Failed to parse: {}", e))
}

#[derive(Debug, Config)]
#[conf(section = "app")]
struct AppConfig {
    pub app_name: String,

    // Read as a string, converted by `seconds`
    #[conf(deserializer = "seconds")]
    pub timeout: Duration,

    // Uses serde_json::from_str (JSON format)
    #[conf(deserializer = "serde_json::from_str")]
    pub json_tags: Option<Vec<String>>,
}

const CONFIG: &str = r#"
[app]
app_name = my-app
timeout = 30
json_tags = ["prod","api","v2"]
"#;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_ini_str(CONFIG)?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Timeout: {:?}", config.timeout);
    println!("  JSON Tags: {:?}", config.json_tags);

    Ok(())
}
