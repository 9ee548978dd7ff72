use std::env;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub seed_demo_data: bool,
}

impl EnvConfig {
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_DB_URL: &'static str = "sqlite::memory:";

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; malformed values fall back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("PORT '{}' is not a valid port, using {}", raw, Self::DEFAULT_PORT);
                Self::DEFAULT_PORT
            }),
            None => Self::DEFAULT_PORT,
        };

        let db_url = get("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DB_URL.to_string());

        let seed_demo_data = match get("SEED_DEMO_DATA") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                warn!("SEED_DEMO_DATA '{}' is not a boolean, seeding stays enabled", raw);
                true
            }),
            None => true,
        };

        EnvConfig { port, db_url, seed_demo_data }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
