pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::{AppConfig, DEFAULT_BASE_URL};
use crate::core::{CatalogLoader, Converter, RateService};
use crate::providers::fxconvert::FxConvertProvider;
use crate::store::HistoryStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Application commands, decoupled from the CLI argument parser.
pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Currencies,
    History {
        clear: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .fxconvert
        .as_ref()
        .map_or(DEFAULT_BASE_URL, |p| p.base_url.as_str());
    let service: Arc<dyn RateService> = Arc::new(FxConvertProvider::new(base_url));

    match command {
        AppCommand::Currencies => {
            let loader = CatalogLoader::new(service);
            cli::currencies::run(&loader).await
        }
        AppCommand::Convert { amount, from, to } => {
            let history = Arc::new(HistoryStore::open(&config.data_path()?));
            let loader = CatalogLoader::new(Arc::clone(&service));
            let converter = Converter::new(service, history);
            cli::convert::run(&loader, &converter, &amount, &from, &to).await
        }
        AppCommand::History { clear } => {
            let history = HistoryStore::open(&config.data_path()?);
            cli::history::run(&history, clear)
        }
    }
}
