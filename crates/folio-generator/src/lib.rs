//! Folio Generator Library
//!
//! Loads photography collections from disk and produces the model consumed by
//! the presentation layer.
//!
//! # Modules
//!
//! - [`reader`] - Content repository access (slugs, metadata, media, reflections)
//! - [`collector`] - Validated collection model building
//! - [`scenes`] - Gallery scene partitioning
//! - [`journey`] - Chronological cross-collection image feed
//! - [`portfolio`] - Model surface with an optional explicit cache
//! - [`sitemap`] - XML sitemap generation
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod journey;
pub mod portfolio;
pub mod reader;
pub mod scenes;
pub mod sitemap;

pub use build::{BuildError, BuildStats, Builder};
pub use collector::{CollectionBuilder, CollectionFailure, SiteCollections};
pub use journey::journey_feed;
pub use portfolio::{CachedPortfolio, Portfolio};
pub use reader::ContentRepository;
pub use scenes::{Scene, SceneLayout, partition_into_scenes};
pub use sitemap::SitemapGenerator;
