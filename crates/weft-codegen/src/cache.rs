//! Memoised generation keyed by a content hash of the request.
//!
//! Output is a pure function of `(elements, config)`, so the SHA-256 of their
//! canonical JSON identifies a generation. Each key owns a slot; concurrent
//! requests for the same key wait on the slot and the generation runs at most
//! once. Failed generations are not cached.

use crate::assembler::Generation;
use crate::error::Result;
use crate::registry::GeneratorRegistry;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use weft_core::{Element, GenerationConfig};

type Slot = Arc<Mutex<Option<Arc<Generation>>>>;

/// Hex SHA-256 of the canonical request JSON.
pub fn cache_key(elements: &[Element], config: &GenerationConfig) -> Result<String> {
    let payload = serde_json::to_vec(&(elements, config))?;
    let digest = Sha256::digest(&payload);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Thread-safe generation cache.
#[derive(Default)]
pub struct GenerationCache {
    slots: Mutex<HashMap<String, Slot>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic in another request leaves the map itself consistent.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached generation for the request, generating it on first use.
    pub fn get_or_generate(
        &self,
        registry: &GeneratorRegistry,
        elements: &[Element],
        config: &GenerationConfig,
    ) -> Result<Arc<Generation>> {
        let key = cache_key(elements, config)?;
        let slot = lock(&self.slots).entry(key.clone()).or_default().clone();

        let mut cached = lock(&slot);
        if let Some(generation) = cached.as_ref() {
            tracing::debug!(key = %key, "generation cache hit");
            return Ok(Arc::clone(generation));
        }

        tracing::debug!(key = %key, "generation cache miss");
        let generation = Arc::new(registry.generate(elements, config)?);
        *cached = Some(Arc::clone(&generation));
        Ok(generation)
    }

    /// Previously generated result, without generating.
    pub fn get(&self, elements: &[Element], config: &GenerationConfig) -> Result<Option<Arc<Generation>>> {
        let key = cache_key(elements, config)?;
        let slot = match lock(&self.slots).get(&key) {
            Some(slot) => Arc::clone(slot),
            None => return Ok(None),
        };
        let cached = lock(&slot).clone();
        Ok(cached)
    }

    /// Number of completed generations held.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.slots).clear();
    }
}

#[cfg(all(test, feature = "react"))]
mod tests {
    use super::*;
    use weft_core::Framework;

    fn tree() -> Vec<Element> {
        vec![Element::new("h1", "heading").with_prop("text", "Hello")]
    }

    #[test]
    fn test_key_is_stable_and_sensitive() {
        let config = GenerationConfig::default();
        let a = cache_key(&tree(), &config).unwrap();
        assert_eq!(a, cache_key(&tree(), &config).unwrap());
        assert_eq!(a.len(), 64);

        let other = GenerationConfig::for_framework(Framework::Vue);
        assert_ne!(a, cache_key(&tree(), &other).unwrap());
        let edited = vec![Element::new("h1", "heading").with_prop("text", "Hi")];
        assert_ne!(a, cache_key(&edited, &config).unwrap());
    }

    #[test]
    fn test_second_request_is_shared() {
        let registry = GeneratorRegistry::new();
        let cache = GenerationCache::new();
        let config = GenerationConfig::default();

        let first = cache.get_or_generate(&registry, &tree(), &config).unwrap();
        let second = cache.get_or_generate(&registry, &tree(), &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&tree(), &config).unwrap().is_none());
    }

    #[test]
    fn test_failures_are_not_cached() {
        let registry = GeneratorRegistry::new();
        let cache = GenerationCache::new();
        let config = GenerationConfig::default().with_feature(weft_core::Feature::Ssr);

        assert!(cache.get_or_generate(&registry, &tree(), &config).is_err());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_concurrent_requests_generate_once() {
        let registry = GeneratorRegistry::new();
        let cache = GenerationCache::new();
        let config = GenerationConfig::default();

        let results: Vec<Arc<Generation>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| cache.get_or_generate(&registry, &tree(), &config).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
