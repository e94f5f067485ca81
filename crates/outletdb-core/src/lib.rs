//! Shared domain model and configuration for outletdb.

pub mod app_config;
pub mod config;
pub mod features;
pub mod outlet;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use features::{FeatureKey, FeatureSet, ICON_FEATURES};
pub use outlet::{map_links, MapLinks, OutletRecord};

use thiserror::Error;

/// Name of the only metropolitan area the locator data covers.
pub const SUPPORTED_REGION: &str = "Kuala Lumpur";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown feature key: {0}")]
    UnknownFeature(String),
}
