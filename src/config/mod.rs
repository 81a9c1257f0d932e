use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::ServiceKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Unknown service: {name}")]
    UnknownService { name: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub services: ServicesConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Comma separated list of services to host
    #[serde(default = "default_services")]
    pub services: String,
    #[serde(default = "default_product_port")]
    pub product_port: u16,
    #[serde(default = "default_user_port")]
    pub user_port: u16,
    #[serde(default = "default_payment_port")]
    pub payment_port: u16,
    #[serde(default = "default_order_port")]
    pub order_port: u16,
    #[serde(default)]
    pub enforce_unique_email: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        info!("Loading configuration from environment");

        let config = Config {
            server: ServerConfig::from_env()?,
            services: ServicesConfig::from_env()?,
            observability: ObservabilityConfig::from_env()?,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.server.max_request_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "Maximum request size cannot be 0".to_string(),
            });
        }

        let enabled = self.services.enabled_services()?;
        if enabled.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one service must be enabled".to_string(),
            });
        }

        let mut ports = HashSet::new();
        for kind in enabled {
            let port = self.services.port_for(kind);
            if port == 0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{} port cannot be 0", kind.display_name()),
                });
            }
            if !ports.insert(port) {
                return Err(ConfigError::ValidationError {
                    message: format!("Port {} is assigned to more than one service", port),
                });
            }
        }

        Ok(())
    }
}

fn load_section<T: serde::de::DeserializeOwned>(section: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix("SHOP"))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_section("server")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl ServicesConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_section("services")
    }

    /// Services named in `services`, in listed order without duplicates
    pub fn enabled_services(&self) -> Result<Vec<ServiceKind>, ConfigError> {
        let mut enabled = Vec::new();
        for name in self.services.split(',').map(str::trim) {
            if name.is_empty() {
                continue;
            }
            let kind = name
                .parse::<ServiceKind>()
                .map_err(|_| ConfigError::UnknownService {
                    name: name.to_string(),
                })?;
            if !enabled.contains(&kind) {
                enabled.push(kind);
            }
        }
        Ok(enabled)
    }

    pub fn port_for(&self, kind: ServiceKind) -> u16 {
        match kind {
            ServiceKind::Product => self.product_port,
            ServiceKind::User => self.user_port,
            ServiceKind::Payment => self.payment_port,
            ServiceKind::Order => self.order_port,
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_section("observability")
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_request_size() -> usize {
    1024 * 1024 // 1MB
}

pub(crate) fn default_services() -> String {
    "product,user,order,payment".to_string()
}

pub(crate) fn default_product_port() -> u16 {
    8001
}

pub(crate) fn default_user_port() -> u16 {
    8002
}

pub(crate) fn default_payment_port() -> u16 {
    8003
}

pub(crate) fn default_order_port() -> u16 {
    8004
}

pub(crate) fn default_service_name() -> String {
    "shop-services".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
