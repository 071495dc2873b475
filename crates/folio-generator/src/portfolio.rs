//! Portfolio model surface.
//!
//! [`Portfolio`] is the contract consumed by the presentation layer: listing,
//! single-collection lookup, the journey feed and scene partitioning. Every
//! call reads the content root afresh. [`CachedPortfolio`] adds an explicit,
//! invalidatable cache on top.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use folio_core::{Collection, CollectionMeta, Config, JourneyImage, Result};
use tracing::debug;

use crate::{
    collector::CollectionBuilder,
    reader::ContentRepository,
    scenes::{self, Scene},
};

/// Uncached access to a content root.
#[derive(Debug, Clone)]
pub struct Portfolio {
    builder: CollectionBuilder,
}

impl Portfolio {
    /// Portfolio over a repository.
    #[must_use]
    pub fn new(repo: ContentRepository) -> Self {
        Self {
            builder: CollectionBuilder::new(repo),
        }
    }

    /// Portfolio described by site configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            builder: CollectionBuilder::from_config(config),
        }
    }

    /// All collections, sorted by `order`.
    pub fn list_collections(&self) -> Result<Vec<CollectionMeta>> {
        self.builder.build_all_meta()
    }

    /// One collection with its media.
    ///
    /// Fails with a not-found error for an unknown slug.
    pub fn get_collection(&self, slug: &str) -> Result<Collection> {
        self.builder.build_collection(slug)
    }

    /// Images of every collection in date order.
    pub fn get_journey_feed(&self) -> Result<Vec<JourneyImage>> {
        self.builder.journey_feed()
    }

    /// Gallery scenes of a collection.
    pub fn partition_into_scenes<'a>(&self, collection: &'a Collection) -> Vec<Scene<'a>> {
        scenes::partition_into_scenes(collection)
    }
}

#[derive(Debug, Default)]
struct CacheState {
    /// Bumped by every invalidation; results computed under an older value are
    /// not stored.
    generation: u64,
    listing: Option<Arc<Vec<CollectionMeta>>>,
    collections: HashMap<String, Arc<Collection>>,
    journey: Option<Arc<Vec<JourneyImage>>>,
}

/// [`Portfolio`] with memoized results.
///
/// Successful results are kept until [`CachedPortfolio::invalidate`] is
/// called; errors are never cached. A result whose computation overlapped an
/// invalidation is returned to its caller but not stored.
#[derive(Debug)]
pub struct CachedPortfolio {
    inner: Portfolio,
    state: RwLock<CacheState>,
}

impl CachedPortfolio {
    /// Wrap a portfolio with an empty cache.
    #[must_use]
    pub fn new(inner: Portfolio) -> Self {
        Self {
            inner,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Drop every cached result.
    pub fn invalidate(&self) {
        let mut state = self.write_state();
        let generation = state.generation.wrapping_add(1);
        debug!(generation, "invalidating portfolio cache");
        *state = CacheState {
            generation,
            ..CacheState::default()
        };
    }

    /// Cached [`Portfolio::list_collections`].
    pub fn list_collections(&self) -> Result<Arc<Vec<CollectionMeta>>> {
        self.cached(
            |state| state.listing.clone(),
            || self.inner.list_collections(),
            |state, listing| state.listing = Some(listing),
        )
    }

    /// Cached [`Portfolio::get_collection`].
    pub fn get_collection(&self, slug: &str) -> Result<Arc<Collection>> {
        self.cached(
            |state| state.collections.get(slug).cloned(),
            || self.inner.get_collection(slug),
            |state, collection| {
                state.collections.insert(slug.to_string(), collection);
            },
        )
    }

    /// Cached [`Portfolio::get_journey_feed`].
    pub fn get_journey_feed(&self) -> Result<Arc<Vec<JourneyImage>>> {
        self.cached(
            |state| state.journey.clone(),
            || self.inner.get_journey_feed(),
            |state, journey| state.journey = Some(journey),
        )
    }

    fn cached<T>(
        &self,
        lookup: impl FnOnce(&CacheState) -> Option<Arc<T>>,
        compute: impl FnOnce() -> Result<T>,
        store: impl FnOnce(&mut CacheState, Arc<T>),
    ) -> Result<Arc<T>> {
        let generation = {
            let state = self.read_state();
            if let Some(hit) = lookup(&*state) {
                return Ok(hit);
            }
            state.generation
        };

        let value = Arc::new(compute()?);

        let mut state = self.write_state();
        if state.generation == generation {
            store(&mut *state, Arc::clone(&value));
        } else {
            debug!(generation, "discarding result computed before invalidation");
        }
        Ok(value)
    }

    /// Gallery scenes of a collection. Not cached; partitioning is pure.
    pub fn partition_into_scenes<'a>(&self, collection: &'a Collection) -> Vec<Scene<'a>> {
        self.inner.partition_into_scenes(collection)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
