//! Currency catalog types and the startup loader.

use crate::core::rates::RateService;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub name: String,
}

/// Mapping from currency code (e.g. "USD") to its display record.
pub type CurrencyCatalog = HashMap<String, CurrencyInfo>;

/// One catalog entry in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyOption {
    pub code: String,
    pub name: String,
}

#[derive(Default)]
struct CatalogState {
    catalog: CurrencyCatalog,
    options: Vec<CurrencyOption>,
    loading: bool,
}

/// Fetches the supported currencies at startup and holds the result.
///
/// The catalog is replaced wholesale on every successful load, never merged
/// incrementally. Sorted options are computed at replacement time.
pub struct CatalogLoader {
    service: Arc<dyn RateService>,
    state: Mutex<CatalogState>,
    cancelled: AtomicBool,
}

impl CatalogLoader {
    pub fn new(service: Arc<dyn RateService>) -> Self {
        Self {
            service,
            state: Mutex::new(CatalogState {
                loading: true,
                ..CatalogState::default()
            }),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Fetches the catalog once and replaces the held one.
    ///
    /// On failure the catalog stays empty and the loading flag still clears,
    /// so a caller is never left waiting. No retry is attempted.
    pub async fn load(&self) {
        let fetched = self.service.currencies().await;
        if self.cancelled.load(Ordering::SeqCst) {
            debug!("Catalog response arrived after cancellation, dropping it");
            return;
        }

        let mut state = self.state.lock().unwrap();
        match fetched {
            Ok(catalog) => {
                state.options = sorted_options(&catalog);
                state.catalog = catalog;
            }
            Err(e) => warn!(error = %e, "Failed to load currency catalog"),
        }
        state.loading = false;
    }

    /// Suppresses any state update from a fetch still in flight. Called when
    /// the owning view goes away.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True until the first fetch settles, success or failure.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    pub fn catalog(&self) -> CurrencyCatalog {
        self.state.lock().unwrap().catalog.clone()
    }

    /// Catalog entries sorted by code.
    pub fn options(&self) -> Vec<CurrencyOption> {
        self.state.lock().unwrap().options.clone()
    }
}

fn sorted_options(catalog: &CurrencyCatalog) -> Vec<CurrencyOption> {
    let mut options: Vec<CurrencyOption> = catalog
        .iter()
        .map(|(code, info)| CurrencyOption {
            code: code.clone(),
            name: info.name.clone(),
        })
        .collect();
    options.sort_by(|a, b| a.code.cmp(&b.code));
    options
}
