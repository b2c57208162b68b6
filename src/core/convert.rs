//! Convert request lifecycle: validation, issue, stale-response suppression
//! and history recording.

use crate::core::history::HistoryEntry;
use crate::core::rates::{Conversion, RateService};
use crate::store::HistoryStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

/// Result of a convert submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertOutcome {
    /// The amount did not parse to a finite number; nothing was issued.
    Rejected,
    /// The response was discarded because a newer request had been issued.
    Superseded,
    Converted(Conversion),
    Failed(String),
}

/// User-visible converter state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertState {
    pub from: String,
    pub to: String,
    pub loading: bool,
    pub conversion: Option<Conversion>,
    pub error: Option<String>,
}

/// Orchestrates convert submissions against the rate service.
///
/// Requests carry a monotonically increasing token: only the response to the
/// most recently issued request may update state or append to history, so
/// overlapping submissions resolve by issue order, not completion order.
pub struct Converter {
    service: Arc<dyn RateService>,
    history: Arc<HistoryStore>,
    state: Mutex<ConvertState>,
    issued: AtomicU64,
}

impl Converter {
    pub fn new(service: Arc<dyn RateService>, history: Arc<HistoryStore>) -> Self {
        Self {
            service,
            history,
            state: Mutex::new(ConvertState::default()),
            issued: AtomicU64::new(0),
        }
    }

    /// Sets the selected currency pair.
    pub fn select(&self, from: &str, to: &str) {
        let mut state = self.state.lock().unwrap();
        state.from = from.to_string();
        state.to = to.to_string();
    }

    /// Exchanges the selected pair. The displayed conversion belongs to the
    /// previous pair and is cleared.
    pub fn swap(&self) {
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        std::mem::swap(&mut state.from, &mut state.to);
        state.conversion = None;
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ConvertState {
        self.state.lock().unwrap().clone()
    }

    /// Validates the amount, issues the convert request and records the
    /// outcome. An unparseable amount is a local validation failure: no
    /// request is issued and no state changes.
    pub async fn convert(&self, from: &str, to: &str, amount_text: &str) -> ConvertOutcome {
        let amount = match amount_text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                debug!(amount = amount_text, "Amount failed validation, not submitting");
                return ConvertOutcome::Rejected;
            }
        };

        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().unwrap();
            state.from = from.to_string();
            state.to = to.to_string();
            state.loading = true;
            state.conversion = None;
            state.error = None;
        }

        let response = self.service.convert(from, to, amount).await;

        let mut state = self.state.lock().unwrap();
        if token != self.issued.load(Ordering::SeqCst) {
            debug!(token, "Discarding response to a superseded request");
            return ConvertOutcome::Superseded;
        }

        match response {
            Ok(conversion) => {
                state.conversion = Some(conversion.clone());
                state.loading = false;
                // Token check and append must stay atomic; the state lock is
                // held across both.
                self.history
                    .append(HistoryEntry::record(from, to, amount, &conversion));
                ConvertOutcome::Converted(conversion)
            }
            Err(e) => {
                error!(error = %e, from, to, amount, "Conversion request failed");
                let notice = format!("Could not convert {from} to {to}");
                state.error = Some(notice.clone());
                state.loading = false;
                ConvertOutcome::Failed(notice)
            }
        }
    }
}
