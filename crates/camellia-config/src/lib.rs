//! Configuration module for the camellia order system.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required values are properly set.
//! Besides the server binding, the configuration carries the menu seed:
//! the items, options, and note surcharges the catalog is populated with
//! at startup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the order service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// HTTP server binding.
	#[serde(default)]
	pub server: ServerConfig,
	/// Menu items the catalog is seeded with at startup.
	#[serde(default)]
	pub menu: Vec<MenuItemConfig>,
}

/// HTTP server binding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
	/// Host to bind to.
	#[serde(default = "default_host")]
	pub host: String,
	/// Port to bind to.
	#[serde(default = "default_port")]
	pub port: u16,
}

fn default_host() -> String {
	"127.0.0.1".to_string()
}

fn default_port() -> u16 {
	8080
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
		}
	}
}

/// One menu item seed entry.
///
/// Prices may be written as TOML strings ("8.99") to stay exact; plain
/// numbers are also accepted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuItemConfig {
	/// Display name, non-empty.
	pub name: String,
	/// Optional longer description.
	#[serde(default)]
	pub desc: Option<String>,
	/// Base price, non-negative.
	pub price: Decimal,
	/// Whether the item starts out sold out.
	#[serde(default)]
	pub sold_out: bool,
	/// Optional picture URL.
	#[serde(default)]
	pub picture_url: Option<String>,
	/// Option name to replacement price.
	#[serde(default)]
	pub options: HashMap<String, Decimal>,
	/// Note name to additive surcharge.
	#[serde(default)]
	pub notes: HashMap<String, Decimal>,
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_toml_str(&contents)
	}

	/// Parses and validates configuration from a TOML string.
	pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Validates the configuration values.
	fn validate(&self) -> Result<(), ConfigError> {
		for item in &self.menu {
			if item.name.trim().is_empty() {
				return Err(ConfigError::Validation(
					"menu item name must not be empty".to_string(),
				));
			}
			if item.price.is_sign_negative() {
				return Err(ConfigError::Validation(format!(
					"menu item '{}' has a negative price",
					item.name
				)));
			}
			for (name, price) in item.options.iter().chain(item.notes.iter()) {
				if name.trim().is_empty() {
					return Err(ConfigError::Validation(format!(
						"menu item '{}' has an option or note with an empty name",
						item.name
					)));
				}
				if price.is_sign_negative() {
					return Err(ConfigError::Validation(format!(
						"menu item '{}': '{}' has a negative price",
						item.name, name
					)));
				}
			}
		}
		Ok(())
	}
}
