use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Path of the SQLite file, or `:memory:` for a throwaway store.
    pub database_storage: String,
    pub app_env: String,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database_storage", "./database.sqlite")?
            .set_default("app_env", "production")?
            .set_default("run_migrations", true)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        s.try_deserialize()
    }

    /// Error responses carry their cause only in development.
    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_storage: "./database.sqlite".to_string(),
            app_env: "production".to_string(),
            run_migrations: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_flag_is_case_insensitive() {
        let config = AppConfig {
            app_env: "Development".to_string(),
            ..AppConfig::default()
        };
        assert!(config.is_development());
        assert!(!AppConfig::default().is_development());
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..AppConfig::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
