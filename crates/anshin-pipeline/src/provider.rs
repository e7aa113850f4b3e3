use std::sync::Arc;

use anshin_core::traits::SourceAdapter;
use anshin_sources::SourceRegistry;

/// Supplies the adapter set for each job.
///
/// Called once per job so implementations can scope per-job state, such
/// as a lookup cache, to that job.
pub trait AdapterProvider: Send + Sync {
    fn adapters(&self) -> Vec<Arc<dyn SourceAdapter>>;
}

impl AdapterProvider for SourceRegistry {
    fn adapters(&self) -> Vec<Arc<dyn SourceAdapter>> {
        self.job_adapters()
    }
}

/// A fixed adapter list, shared by every job.
#[derive(Clone, Default)]
pub struct StaticAdapters(pub Vec<Arc<dyn SourceAdapter>>);

impl StaticAdapters {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self(adapters)
    }
}

impl AdapterProvider for StaticAdapters {
    fn adapters(&self) -> Vec<Arc<dyn SourceAdapter>> {
        self.0.clone()
    }
}
