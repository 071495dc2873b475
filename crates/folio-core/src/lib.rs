//! Folio Core Library
//!
//! Model types, configuration, frontmatter parsing and error handling for the
//! Folio portfolio generator.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod media;
pub mod model;

pub use config::Config;
pub use error::{CoreError, Result};
pub use frontmatter::FieldMap;
pub use media::MediaKind;
pub use model::{Collection, CollectionMeta, JourneyImage, MediaItem};
