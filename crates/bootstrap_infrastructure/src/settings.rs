use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use bootstrap_interface::accounts::model::{ConnectionDescriptor, UserGrantSpec};

#[derive(Debug, Clone, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: String,
    pub logger: Logger,
    pub connection: ConnectionDescriptor,
    pub grant: UserGrantSpec,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        };

        Self::from_builder(
            Config::builder().add_source(File::with_name(&format!("config/{config}"))),
        )
    }

    // Environment variables (e.g. BOOTSTRAP__CONNECTION__ADMIN_PASSWORD) win over the file.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .add_source(Environment::with_prefix("BOOTSTRAP").separator("__"))
            .build()?
            // Deserialize (and thus freeze) the entire configuration.
            .try_deserialize()
    }
}
