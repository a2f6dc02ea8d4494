use config::{self, ConfigError, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: u64,
}

impl DatabaseConfig {
    pub fn without_db(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db()
            .database(&self.name)
            .log_statements(tracing::log::LevelFilter::Trace)
    }
}

#[derive(Debug, Deserialize)]
pub struct Jwt {
    pub secret: SecretString,
    /// Token lifetime in hours.
    pub expiry: i64,
}

#[derive(Debug, Deserialize)]
pub struct SecretSetting {
    pub jwt: Jwt,
}

#[derive(Debug, Deserialize)]
pub struct UserSettings {
    /// Emails allowed to register with the admin flag.
    pub admin_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentSettings {
    pub paypal_client_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TelemetrySettings {
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseConfig,
    pub secret: SecretSetting,
    pub user: UserSettings,
    pub payment: PaymentSettings,
    pub telemetry: TelemetrySettings,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");
    let builder = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("configuration.yaml"),
        ))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("user.admin_list")
                .try_parsing(true),
        )
        .build()?;
    builder.try_deserialize::<Settings>()
}
