//! Availability registry port

use debate_domain::BackendId;
use std::collections::BTreeSet;

/// Set of backends usable in this run
///
/// Constructed once per run (probing or reading a cache is the adapter's
/// business) and passed to setup explicitly.
pub trait AvailabilityRegistry: Send + Sync {
    fn available_backends(&self) -> BTreeSet<BackendId>;

    fn is_available(&self, backend: &BackendId) -> bool {
        self.available_backends().contains(backend)
    }

    /// Human-readable name for a backend, e.g. `Claude`
    fn display_name(&self, backend: &BackendId) -> String {
        backend.to_string()
    }
}

/// Fixed set of backends, for tests and non-probing callers
#[derive(Debug, Clone, Default)]
pub struct StaticAvailability {
    backends: BTreeSet<BackendId>,
}

impl StaticAvailability {
    pub fn new(backends: impl IntoIterator<Item = BackendId>) -> Self {
        Self {
            backends: backends.into_iter().collect(),
        }
    }
}

impl AvailabilityRegistry for StaticAvailability {
    fn available_backends(&self) -> BTreeSet<BackendId> {
        self.backends.clone()
    }
}
