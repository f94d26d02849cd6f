//! Request cache and coalescer for symbol lookups.
//!
//! Entries are keyed by (document, open version) and evicted in strict LRU
//! order. Concurrent lookups for the same (document, version-or-untracked) key
//! share one pending external call.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use docket_core::{DeclarationSymbol, DocumentId};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lru::LruCache;

use crate::{SymbolProvider, normalize};

/// Shared, immutable result of one lookup.
pub type Symbols = Arc<[DeclarationSymbol]>;

type PendingLookup = Shared<BoxFuture<'static, Symbols>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PendingKey {
    document: DocumentId,
    /// `None` when the document is not open ("untracked").
    version: Option<i32>,
}

struct InFlight {
    generation: u64,
    lookup: PendingLookup,
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub coalesced: u64,
    pub external_calls: u64,
}

struct CacheState {
    entries: LruCache<(DocumentId, i32), Symbols>,
    in_flight: HashMap<PendingKey, InFlight>,
    next_generation: u64,
    stats: CacheStats,
}

/// LRU cache in front of a [`SymbolProvider`].
///
/// Each instance owns its own state, so independent sessions (and tests) never
/// observe each other's entries.
pub struct SymbolCache {
    provider: Arc<dyn SymbolProvider>,
    state: Arc<Mutex<CacheState>>,
}

impl SymbolCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(provider: Arc<dyn SymbolProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            provider,
            state: Arc::new(Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                in_flight: HashMap::new(),
                next_generation: 0,
                stats: CacheStats::default(),
            })),
        }
    }

    /// Declarations of `document`.
    ///
    /// Never fails: provider errors and unrecognized answers resolve to an
    /// empty list (and are logged).
    pub async fn resolve(&self, document: &DocumentId) -> Symbols {
        let version = self.provider.open_document_version(document);

        let lookup = {
            let mut state = lock(&self.state);

            if let Some(version) = version {
                if let Some(hit) = state.entries.get(&(document.clone(), version)) {
                    let hit = Arc::clone(hit);
                    state.stats.hits += 1;
                    tracing::debug!(%document, version, "symbol cache hit");
                    return hit;
                }
            }

            let key = PendingKey {
                document: document.clone(),
                version,
            };

            if let Some(pending) = state.in_flight.get(&key) {
                let lookup = pending.lookup.clone();
                state.stats.coalesced += 1;
                tracing::debug!(%document, ?version, "joining in-flight symbol lookup");
                lookup
            } else {
                state.stats.misses += 1;
                state.next_generation += 1;
                let generation = state.next_generation;
                let lookup = self.start_lookup(key.clone(), generation);
                state.in_flight.insert(
                    key,
                    InFlight {
                        generation,
                        lookup: lookup.clone(),
                    },
                );
                tracing::debug!(%document, ?version, "symbol cache miss");
                lookup
            }
        };

        lookup.await
    }

    /// Drop the cached entries and in-flight markers of one document.
    ///
    /// A lookup already running for it still completes for its callers, but its
    /// result is not cached.
    pub fn invalidate(&self, document: &DocumentId) {
        let mut state = lock(&self.state);
        let stale: Vec<_> = state
            .entries
            .iter()
            .filter(|((cached, _), _)| cached == document)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            state.entries.pop(key);
        }
        state.in_flight.retain(|key, _| &key.document != document);
        tracing::debug!(%document, entries = stale.len(), "symbol cache invalidated");
    }

    pub fn invalidate_all(&self) {
        let mut state = lock(&self.state);
        state.entries.clear();
        state.in_flight.clear();
        tracing::debug!("symbol cache cleared");
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        lock(&self.state).stats
    }

    /// Number of cached (document, version) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        lock(&self.state).in_flight.len()
    }

    fn start_lookup(&self, key: PendingKey, generation: u64) -> PendingLookup {
        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);

        async move {
            lock(&state).stats.external_calls += 1;

            let symbols: Symbols = match provider.document_symbols(&key.document).await {
                Ok(value) => normalize(&key.document, value).into(),
                Err(error) => {
                    tracing::warn!(document = %key.document, %error, "symbol lookup failed");
                    return finish_failed(&state, &key, generation);
                }
            };

            let mut state = lock(&state);
            if !take_in_flight(&mut state, &key, generation) {
                return symbols;
            }
            if let Some(version) = key.version {
                let cache_key = (key.document.clone(), version);
                if let Some((evicted, _)) = state.entries.push(cache_key.clone(), Arc::clone(&symbols)) {
                    if evicted != cache_key {
                        tracing::debug!(document = %evicted.0, version = evicted.1, "symbol cache evicted");
                    }
                }
            }
            symbols
        }
        .boxed()
        .shared()
    }
}

/// Failed lookups clear their marker but are not cached, so the next request retries.
fn finish_failed(state: &Mutex<CacheState>, key: &PendingKey, generation: u64) -> Symbols {
    take_in_flight(&mut lock(state), key, generation);
    Arc::from(Vec::new())
}

/// Remove the in-flight marker if it still belongs to this lookup.
///
/// Returns `false` when the marker was invalidated (or replaced) meanwhile.
fn take_in_flight(state: &mut CacheState, key: &PendingKey, generation: u64) -> bool {
    let current = state
        .in_flight
        .get(key)
        .is_some_and(|pending| pending.generation == generation);
    if current {
        state.in_flight.remove(key);
    }
    current
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use docket_core::DeclarationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;
    use crate::ProviderError;

    /// Provider answering with one method symbol, counting calls.
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
        versions: Mutex<HashMap<String, i32>>,
        fail: bool,
        gate: Option<Arc<Notify>>,
    }

    impl CountingProvider {
        fn tracked(documents: &[(&str, i32)]) -> Self {
            let versions = documents
                .iter()
                .map(|(doc, version)| ((*doc).to_string(), *version))
                .collect();
            Self {
                versions: Mutex::new(versions),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_version(&self, document: &str, version: i32) {
            self.versions
                .lock()
                .expect("versions lock")
                .insert(document.to_string(), version);
        }
    }

    #[async_trait]
    impl SymbolProvider for CountingProvider {
        async fn document_symbols(
            &self,
            document: &DocumentId,
        ) -> Result<serde_json::Value, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            } else {
                tokio::task::yield_now().await;
            }
            if self.fail {
                return Err(ProviderError::LookupFailed {
                    document: document.to_string(),
                    message: "server crashed".to_string(),
                });
            }
            let range = json!({
                "start": { "line": 1, "character": 0 },
                "end": { "line": 3, "character": 1 }
            });
            Ok(json!([{
                "name": document.base_name(),
                "kind": 6,
                "range": range,
                "selectionRange": range
            }]))
        }

        fn open_document_version(&self, document: &DocumentId) -> Option<i32> {
            self.versions
                .lock()
                .expect("versions lock")
                .get(document.as_str())
                .copied()
        }
    }

    fn cache_with(provider: &Arc<CountingProvider>, capacity: usize) -> SymbolCache {
        let provider: Arc<dyn SymbolProvider> = Arc::clone(provider) as Arc<dyn SymbolProvider>;
        SymbolCache::new(provider, capacity)
    }

    #[tokio::test]
    async fn concurrent_lookups_for_same_key_call_provider_once() {
        let provider = Arc::new(CountingProvider::tracked(&[("A.java", 1)]));
        let cache = cache_with(&provider, 4);
        let id = DocumentId::new("A.java");

        let (first, second) = tokio::join!(cache.resolve(&id), cache.resolve(&id));

        assert_eq!(provider.calls(), 1);
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.coalesced, 1);
        assert_eq!(stats.external_calls, 1);
        assert_eq!(cache.in_flight(), 0);
    }

    #[tokio::test]
    async fn untracked_documents_coalesce_but_are_not_cached() {
        let provider = Arc::new(CountingProvider::default());
        let cache = cache_with(&provider, 4);
        let id = DocumentId::new("B.java");

        let (first, second) = tokio::join!(cache.resolve(&id), cache.resolve(&id));
        assert_eq!(provider.calls(), 1);
        assert_eq!(first.len(), second.len());

        cache.resolve(&id).await;
        assert_eq!(provider.calls(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn open_version_hits_cache() {
        let provider = Arc::new(CountingProvider::tracked(&[("A.java", 3)]));
        let cache = cache_with(&provider, 4);
        let id = DocumentId::new("A.java");

        let first = cache.resolve(&id).await;
        let second = cache.resolve(&id).await;

        assert_eq!(provider.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(first[0].kind, DeclarationKind::Method);
    }

    #[tokio::test]
    async fn new_version_triggers_new_lookup() {
        let provider = Arc::new(CountingProvider::tracked(&[("A.java", 1)]));
        let cache = cache_with(&provider, 4);
        let id = DocumentId::new("A.java");

        cache.resolve(&id).await;
        provider.set_version("A.java", 2);
        cache.resolve(&id).await;

        assert_eq!(provider.calls(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn evicts_least_recently_used_entry() {
        let provider = Arc::new(CountingProvider::tracked(&[
            ("A.java", 1),
            ("B.java", 1),
            ("C.java", 1),
        ]));
        let cache = cache_with(&provider, 2);
        let (a, b, c) = (
            DocumentId::new("A.java"),
            DocumentId::new("B.java"),
            DocumentId::new("C.java"),
        );

        cache.resolve(&a).await;
        cache.resolve(&b).await;
        // Hit promotes A, so C evicts B.
        cache.resolve(&a).await;
        cache.resolve(&c).await;
        assert_eq!(provider.calls(), 3);

        cache.resolve(&a).await;
        assert_eq!(provider.calls(), 3);
        cache.resolve(&b).await;
        assert_eq!(provider.calls(), 4);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn failures_resolve_empty_and_are_retried() {
        let provider = Arc::new(CountingProvider {
            fail: true,
            ..CountingProvider::tracked(&[("A.java", 1)])
        });
        let cache = cache_with(&provider, 4);
        let id = DocumentId::new("A.java");

        assert!(cache.resolve(&id).await.is_empty());
        assert_eq!(cache.in_flight(), 0);
        assert!(cache.is_empty());

        assert!(cache.resolve(&id).await.is_empty());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_drops_entries_for_document_only() {
        let provider = Arc::new(CountingProvider::tracked(&[("A.java", 1), ("AB.java", 1)]));
        let cache = cache_with(&provider, 4);
        let a = DocumentId::new("A.java");
        let ab = DocumentId::new("AB.java");

        cache.resolve(&a).await;
        cache.resolve(&ab).await;
        cache.invalidate(&a);
        assert_eq!(cache.len(), 1);

        cache.resolve(&a).await;
        cache.resolve(&ab).await;
        assert_eq!(provider.calls(), 3);

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn invalidate_during_lookup_clears_marker_and_skips_caching() {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(CountingProvider {
            gate: Some(Arc::clone(&gate)),
            ..CountingProvider::tracked(&[("A.java", 1)])
        });
        let cache = cache_with(&provider, 4);
        let id = DocumentId::new("A.java");

        let pending = cache.resolve(&id);
        tokio::pin!(pending);
        assert!(futures::poll!(&mut pending).is_pending());
        assert_eq!(cache.in_flight(), 1);

        cache.invalidate(&id);
        assert_eq!(cache.in_flight(), 0);

        gate.notify_one();
        let symbols = pending.await;
        assert_eq!(symbols.len(), 1);
        assert!(cache.is_empty());
    }
}
