//! Process-wide cache for the loaded [`Configuration`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cashbook_domain::Configuration;
use tracing::{debug, info};

use crate::{storage::ConfigurationSource, LoadError};

/// Holds the configuration after its first successful load.
///
/// Filled lazily by [`ConfigurationCache::get_or_load`] and emptied only through
/// [`ConfigurationCache::invalidate`], which the ledger service calls after every
/// successful append. Read-only calls never clear it.
#[derive(Debug, Default)]
pub struct ConfigurationCache {
    slot: Mutex<Option<Arc<Configuration>>>,
}

impl ConfigurationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &self,
        source: &dyn ConfigurationSource,
    ) -> Result<Arc<Configuration>, LoadError> {
        let mut slot = self.lock();
        if let Some(config) = slot.as_ref() {
            debug!("configuration cache hit");
            return Ok(Arc::clone(config));
        }
        let loaded = Arc::new(source.load()?);
        info!(
            categories = loaded.all_categories.len(),
            methods = loaded.payment_methods.len(),
            types = loaded.transaction_types.len(),
            "configuration loaded"
        );
        *slot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            debug!("configuration cache invalidated");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Configuration>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
