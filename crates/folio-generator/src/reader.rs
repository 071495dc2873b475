//! Content repository reader.
//!
//! Enumerates collection directories under an explicit content root and loads
//! their raw metadata, media listings and reflection captions. Nothing here is
//! cached; every call goes to the filesystem.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use folio_core::{
    CoreError, FieldMap, MediaKind, Result,
    config::ContentConfig,
    frontmatter::{parse_fields, strip_frontmatter},
};
use tracing::{debug, trace, warn};

/// Read-only view of a content root holding one directory per collection.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    root: PathBuf,
    meta_file: String,
    media_dir: String,
}

impl ContentRepository {
    /// Repository with the default `meta.md` / `media` layout.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(&ContentConfig {
            root: root.into(),
            ..ContentConfig::default()
        })
    }

    /// Repository described by the `[content]` configuration section.
    #[must_use]
    pub fn from_config(config: &ContentConfig) -> Self {
        Self {
            root: config.root.clone(),
            meta_file: config.meta_file.clone(),
            media_dir: config.media_dir.clone(),
        }
    }

    /// Content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of one collection.
    pub fn collection_dir(&self, slug: &str) -> PathBuf {
        self.root.join(slug)
    }

    /// Media directory of one collection.
    pub fn media_dir(&self, slug: &str) -> PathBuf {
        self.collection_dir(slug).join(&self.media_dir)
    }

    /// Path of one media file.
    pub fn media_path(&self, slug: &str, filename: &str) -> PathBuf {
        self.media_dir(slug).join(filename)
    }

    /// Names of the collection directories, in directory iteration order.
    ///
    /// Every subdirectory is a collection, except that `.`-prefixed ones
    /// (`.git`, editor and OS metadata) are skipped; such names are never
    /// accepted as slugs by [`Self::read_meta_document`] either. Plain files
    /// are ignored.
    pub fn list_collection_slugs(&self) -> Result<Vec<String>> {
        let mut slugs = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                trace!(path = %path.display(), "skipping non-directory entry");
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "skipping collection with non UTF-8 name");
                continue;
            };

            if name.starts_with('.') {
                continue;
            }

            slugs.push(name);
        }

        debug!(root = %self.root.display(), count = slugs.len(), "listed collections");
        Ok(slugs)
    }

    /// Raw frontmatter fields of a collection's metadata document.
    ///
    /// Fails with [`CoreError::NotFound`] when the document does not exist.
    pub fn read_meta_document(&self, slug: &str) -> Result<FieldMap> {
        let path = self.collection_dir(slug).join(&self.meta_file);

        if !is_plain_slug(slug) {
            return Err(CoreError::not_found(slug, path));
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if is_missing(&e) => return Err(CoreError::not_found(slug, path)),
            Err(e) => return Err(e.into()),
        };

        let (fields, _body) = parse_fields(&content, &path)?;
        Ok(fields)
    }

    /// Media filenames of a collection, in directory iteration order.
    ///
    /// Only allow-listed image and video extensions are returned. A missing
    /// media directory yields an empty list.
    pub fn list_media_files(&self, slug: &str) -> Result<Vec<String>> {
        let dir = self.media_dir(slug);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(slug, "no media directory");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || MediaKind::from_path(&path).is_none() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => warn!(?name, "skipping media file with non UTF-8 name"),
            }
        }

        Ok(files)
    }

    /// Reflection caption for a media file, if a `<base_name>.md` sibling exists.
    ///
    /// Frontmatter is stripped and the body trimmed; an empty body counts as no
    /// reflection.
    pub fn read_reflection(&self, slug: &str, base_name: &str) -> Result<Option<String>> {
        let path = self.media_dir(slug).join(format!("{base_name}.md"));

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if is_missing(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let text = strip_frontmatter(&content).trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }
}

/// A slug must name a single directory below the root.
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
