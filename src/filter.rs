use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::AggregatedClient;

/// Inclusion policy applied to aggregated clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// Keep clients with positive receivables and positive orders.
    #[default]
    RequireBoth,
    /// Keep clients with any non-zero receivables or orders.
    RequireEither,
}

impl FilterMode {
    /// Maps the `only_full` flag onto a mode.
    pub fn from_only_full(only_full: bool) -> Self {
        if only_full {
            FilterMode::RequireBoth
        } else {
            FilterMode::RequireEither
        }
    }

    pub fn accepts(self, client: &AggregatedClient) -> bool {
        match self {
            FilterMode::RequireBoth => client.receivables_total > 0.0 && client.orders_total > 0.0,
            FilterMode::RequireEither => {
                client.receivables_total != 0.0 || client.orders_total != 0.0
            }
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::RequireBoth => write!(f, "require-both"),
            FilterMode::RequireEither => write!(f, "require-either"),
        }
    }
}

/// Keeps the clients accepted by `mode`, preserving their order. An empty
/// result is returned as-is; the pipeline turns it into an error.
pub fn apply_filter(clients: Vec<AggregatedClient>, mode: FilterMode) -> Vec<AggregatedClient> {
    clients
        .into_iter()
        .filter(|client| mode.accepts(client))
        .collect()
}
