//! Application state for the web layer.

use std::sync::Arc;

use crate::aggregate::{Aggregator, AggregatorConfig};
use crate::labels::LabelLocale;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Aggregator shared by every request
    pub aggregator: Arc<Aggregator<LabelLocale>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(labels: LabelLocale, config: AggregatorConfig) -> Self {
        Self {
            aggregator: Arc::new(Aggregator::new(labels, config)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LabelLocale::default(), AggregatorConfig::default())
    }
}
