//! Main entry point for the camellia order service.
//!
//! This binary wires the in-memory stores, the pricing core, and the
//! HTTP adapter together: it loads the TOML configuration, seeds the
//! menu catalog from it, and serves the order API until interrupted.

use camellia_config::{Config, MenuItemConfig};
use camellia_core::OrderService;
use camellia_storage::{MenuCatalog, OrderStore, StorageError};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod server;

/// Command-line arguments for the order service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Populates the catalog from the configured menu seed.
fn seed_catalog(catalog: &MenuCatalog, menu: &[MenuItemConfig]) -> Result<(), StorageError> {
	for entry in menu {
		let item = catalog.add_item(entry.name.clone(), entry.price);
		catalog.update(item.item_id, |it| {
			it.item_desc = entry.desc.clone();
			it.picture_url = entry.picture_url.clone();
			it.sold_out = entry.sold_out;
			for (name, price) in &entry.options {
				it.add_option(name.clone(), *price);
			}
			for (name, price) in &entry.notes {
				it.add_note(name.clone(), *price);
			}
		})?;
	}
	Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	// Load configuration
	let config = Config::from_file(&args.config)?;
	tracing::info!(
		"Loaded configuration with {} menu item(s)",
		config.menu.len()
	);

	// Build the stores and the core service
	let catalog = Arc::new(MenuCatalog::new());
	seed_catalog(&catalog, &config.menu)?;
	let store = Arc::new(OrderStore::new());
	let service = Arc::new(OrderService::new(catalog, store));

	// Serve the API until interrupted
	server::start_server(&config.server, service).await?;

	Ok(())
}
