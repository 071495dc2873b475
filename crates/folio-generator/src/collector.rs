//! Collection model building.
//!
//! Turns the raw reads of a [`ContentRepository`] into validated, ordered
//! [`CollectionMeta`] and [`Collection`] values.

use std::path::Path;

use folio_core::{
    Collection, CollectionMeta, Config, CoreError, FieldMap, JourneyImage, MediaItem, MediaKind,
    Result,
    frontmatter::{scalar_integer, scalar_string},
    model::parse_date,
};
use rayon::prelude::*;
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::{journey::journey_feed, reader::ContentRepository};

/// A collection that failed to build.
#[derive(Debug)]
pub struct CollectionFailure {
    /// Directory name of the failed collection.
    pub slug: String,

    /// Why it failed.
    pub error: CoreError,
}

/// Every collection of a content root, each built independently.
#[derive(Debug, Default)]
pub struct SiteCollections {
    /// Successfully built collections in listing order.
    pub collections: Vec<Collection>,

    /// Collections that failed, in directory iteration order.
    pub failures: Vec<CollectionFailure>,
}

impl SiteCollections {
    /// Metadata of the built collections in listing order.
    pub fn metas(&self) -> Vec<&CollectionMeta> {
        self.collections.iter().map(|c| &c.meta).collect()
    }

    /// Look up a built collection by slug.
    pub fn get(&self, slug: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.meta.slug == slug)
    }

    /// Whether every collection built.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Journey feed over the built collections.
    pub fn journey_feed(&self) -> Vec<JourneyImage> {
        journey_feed(&self.collections)
    }
}

/// Builds the typed collection model from a content repository.
#[derive(Debug, Clone)]
pub struct CollectionBuilder {
    repo: ContentRepository,
    strict_covers: bool,
}

impl CollectionBuilder {
    /// Create a builder over a repository.
    #[must_use]
    pub fn new(repo: ContentRepository) -> Self {
        Self {
            repo,
            strict_covers: false,
        }
    }

    /// Create a builder from site configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ContentRepository::from_config(&config.content))
            .with_strict_covers(config.build.strict_covers)
    }

    /// Reject collections whose cover is not one of their media files.
    #[must_use]
    pub fn with_strict_covers(mut self, strict: bool) -> Self {
        self.strict_covers = strict;
        self
    }

    /// The underlying repository.
    pub fn repository(&self) -> &ContentRepository {
        &self.repo
    }

    /// Build and validate the metadata of one collection.
    pub fn build_meta(&self, slug: &str) -> Result<CollectionMeta> {
        let fields = self.repo.read_meta_document(slug)?;

        let title = required_field(&fields, slug, "title")?;
        let date = required_field(&fields, slug, "date")?;
        let cover = required_field(&fields, slug, "cover")?;
        let description = required_field(&fields, slug, "description")?;

        let published = parse_date(&date).ok_or_else(|| {
            CoreError::validation(slug, format!("date `{date}` is not an ISO-8601 date"))
        })?;

        let order = match fields.get("order") {
            None | Some(Value::Null) => 0,
            Some(value) => scalar_integer(value).unwrap_or_else(|| {
                warn!(slug, ?value, "non-numeric order, using 0");
                0
            }),
        };

        Ok(CollectionMeta {
            slug: slug.to_string(),
            title,
            description,
            date,
            published,
            cover,
            order,
        })
    }

    /// Metadata of every collection, sorted by `order`.
    ///
    /// Collections with equal `order` keep directory iteration order. The
    /// first invalid collection fails the whole listing.
    pub fn build_all_meta(&self) -> Result<Vec<CollectionMeta>> {
        let mut metas = self
            .repo
            .list_collection_slugs()?
            .iter()
            .map(|slug| self.build_meta(slug))
            .collect::<Result<Vec<_>>>()?;

        metas.sort_by_key(|meta| meta.order);
        Ok(metas)
    }

    /// Build one collection with its media.
    pub fn build_collection(&self, slug: &str) -> Result<Collection> {
        let meta = self.build_meta(slug)?;

        let mut filenames = self.repo.list_media_files(slug)?;
        filenames.sort();

        let mut media = Vec::with_capacity(filenames.len());
        for filename in filenames {
            let Some(kind) = MediaKind::from_path(Path::new(&filename)) else {
                continue;
            };
            let mut item = MediaItem {
                filename,
                kind,
                reflection: None,
            };
            item.reflection = self.repo.read_reflection(slug, item.base_name())?;
            media.push(item);
        }

        let collection = Collection { meta, media };

        if !collection.cover_resolves() {
            if self.strict_covers {
                return Err(CoreError::validation(
                    slug,
                    format!(
                        "cover `{}` does not match any media file",
                        collection.meta.cover
                    ),
                ));
            }
            warn!(slug, cover = %collection.meta.cover, "cover does not match any media file");
        }

        debug!(slug, media = collection.media.len(), "built collection");
        Ok(collection)
    }

    /// Build every collection in parallel.
    ///
    /// A failing collection is recorded and does not stop the others.
    pub fn collect_all(&self) -> Result<SiteCollections> {
        let slugs = self.repo.list_collection_slugs()?;
        info!(root = %self.repo.root().display(), count = slugs.len(), "collecting collections");

        let results: Vec<_> = slugs
            .par_iter()
            .map(|slug| (slug, self.build_collection(slug)))
            .collect();

        let mut site = SiteCollections::default();
        for (slug, result) in results {
            match result {
                Ok(collection) => site.collections.push(collection),
                Err(error) => {
                    warn!(slug = %slug, %error, "collection failed to build");
                    site.failures.push(CollectionFailure {
                        slug: slug.clone(),
                        error,
                    });
                }
            }
        }

        site.collections.sort_by_key(|c| c.meta.order);

        info!(
            collections = site.collections.len(),
            failures = site.failures.len(),
            "collection complete"
        );

        Ok(site)
    }

    /// Cross-collection journey feed.
    pub fn journey_feed(&self) -> Result<Vec<JourneyImage>> {
        let collections = self
            .build_all_meta()?
            .iter()
            .map(|meta| self.build_collection(&meta.slug))
            .collect::<Result<Vec<_>>>()?;

        Ok(journey_feed(&collections))
    }
}

/// Read a required field, failing when it is absent or blank.
fn required_field(fields: &FieldMap, slug: &str, name: &str) -> Result<String> {
    fields
        .get(name)
        .and_then(scalar_string)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CoreError::validation(slug, format!("missing required field `{name}`")))
}
