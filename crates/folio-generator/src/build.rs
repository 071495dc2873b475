//! Build orchestration.
//!
//! Writes the collection model, gallery scenes, journey feed, media copies
//! and sitemap into the output directory.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{Collection, CollectionMeta, Config, CoreError};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    collector::{CollectionBuilder, CollectionFailure},
    reader::ContentRepository,
    scenes::{Scene, partition_into_scenes},
    sitemap::{SitemapError, SitemapGenerator},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content error outside any single collection.
    #[error("content error: {0}")]
    Core(#[from] CoreError),

    /// One or more collections failed to build.
    #[error("{} collection(s) failed to build: {}", .0.len(), summarize(.0))]
    Collections(Vec<CollectionFailure>),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),
}

fn summarize(failures: &[CollectionFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.slug, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of collections written.
    pub collections: usize,

    /// Number of media items across all collections.
    pub media: usize,

    /// Number of gallery scenes across all collections.
    pub scenes: usize,

    /// Number of journey feed entries.
    pub journey_images: usize,

    /// Number of media files copied.
    pub copied_media: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Per-collection output document.
#[derive(Debug, Serialize)]
struct CollectionPage<'a> {
    #[serde(flatten)]
    collection: &'a Collection,
    scenes: Vec<Scene<'a>>,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    output_dir: PathBuf,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
        }
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.config.content.root.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Collect every collection; any failure aborts before touching output.
        let builder = CollectionBuilder::from_config(&self.config);
        let site = builder.collect_all()?;
        if !site.is_complete() {
            for failure in &site.failures {
                error!(slug = %failure.slug, error = %failure.error, "collection failed");
            }
            return Err(BuildError::Collections(site.failures));
        }

        // 2. Clean output directory
        self.clean_output()?;

        // 3. Listing
        let metas = site.metas();
        self.write_json(Path::new("collections.json"), &metas)?;
        stats.collections = metas.len();

        // 4. Collection pages with scenes
        let written: Vec<_> = site
            .collections
            .par_iter()
            .map(|collection| self.write_collection(collection))
            .collect::<Result<_>>()?;
        stats.scenes = written.iter().sum();
        stats.media = site.collections.iter().map(|c| c.media.len()).sum();

        // 5. Journey feed
        let journey = site.journey_feed();
        self.write_json(Path::new("journey.json"), &journey)?;
        stats.journey_images = journey.len();

        // 6. Media
        if self.config.build.copy_media {
            stats.copied_media = self.copy_media(builder.repository(), &site.collections)?;
        }

        // 7. Sitemap
        if self.config.sitemap.enabled {
            self.generate_sitemap(&metas)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            collections = stats.collections,
            media = stats.media,
            scenes = stats.scenes,
            journey_images = stats.journey_images,
            copied_media = stats.copied_media,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Write one collection document, returning its scene count.
    fn write_collection(&self, collection: &Collection) -> Result<usize> {
        let page = CollectionPage {
            collection,
            scenes: partition_into_scenes(collection),
        };
        let relative = Path::new("collections").join(format!("{}.json", collection.meta.slug));
        self.write_json(&relative, &page)?;
        Ok(page.scenes.len())
    }

    /// Serialize a value as pretty JSON under the output directory.
    fn write_json<T: Serialize + ?Sized>(&self, relative: &Path, value: &T) -> Result<()> {
        let path = self.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_vec_pretty(value)?)?;
        debug!(path = %path.display(), "wrote file");
        Ok(())
    }

    /// Copy media files to `collections/<slug>/media/`.
    fn copy_media(&self, repo: &ContentRepository, collections: &[Collection]) -> Result<usize> {
        let copied: Vec<_> = collections
            .par_iter()
            .map(|collection| {
                let slug = &collection.meta.slug;
                let dest = self
                    .output_dir
                    .join("collections")
                    .join(slug)
                    .join("media");
                if !collection.media.is_empty() {
                    fs::create_dir_all(&dest)?;
                }
                for item in &collection.media {
                    fs::copy(repo.media_path(slug, &item.filename), dest.join(&item.filename))?;
                }
                Ok::<_, BuildError>(collection.media.len())
            })
            .collect::<Result<_>>()?;

        let total: usize = copied.iter().sum();
        info!(count = total, "copied media");
        Ok(total)
    }

    /// Generate sitemap.
    fn generate_sitemap(&self, metas: &[&CollectionMeta]) -> Result<()> {
        let generator = SitemapGenerator::new(self.config.clone());
        let mut file = fs::File::create(self.output_dir.join("sitemap.xml"))?;
        generator.write_to(metas, &mut file)?;
        debug!("generated sitemap.xml");
        Ok(())
    }
}
