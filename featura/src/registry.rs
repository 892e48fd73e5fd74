//! Keyed feature-system instances, built at most once.

use std::collections::HashMap;

use log::trace;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{FeatError, FeatResult};
use crate::system::FeatureSystem;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Maps keys and aliases to already-built [`FeatureSystem`] instances.
///
/// Keyed construction goes through a registry so every consumer of a key
/// shares one instance, which is what makes feature-set equality across call
/// sites meaningful. The process-wide registry backs
/// [`FeatureSystem::new`](crate::FeatureSystem::new) and serialization;
/// separate `Registry` values are useful for tests that must not observe
/// each other's systems.
pub struct Registry {
    systems: Mutex<HashMap<String, FeatureSystem>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            systems: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// The system registered under `key`, if any.
    pub fn get(&self, key: &str) -> Option<FeatureSystem> {
        self.systems.lock().get(key).cloned()
    }

    /// Like [`get`](Self::get), but failing with
    /// [`FeatError::UnknownSystem`] for unregistered keys.
    pub fn resolve(&self, key: &str) -> FeatResult<FeatureSystem> {
        self.get(key)
            .ok_or_else(|| FeatError::UnknownSystem(key.to_string()))
    }

    /// Return the instance registered under the config's key, or build the
    /// system and register it under its key and all aliases.
    ///
    /// The registry lock is held across construction, so two threads racing
    /// on the same key observe a single build.
    pub fn get_or_create(&self, config: Config) -> FeatResult<FeatureSystem> {
        let mut systems = self.systems.lock();
        if let Some(key) = config.key.as_deref()
            && let Some(system) = systems.get(key)
        {
            trace!("registry hit for feature system {key:?}");
            return Ok(system.clone());
        }
        let system = FeatureSystem::build(config)?;
        for name in system.config().names() {
            systems.insert(name.to_string(), system.clone());
        }
        Ok(system)
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}
