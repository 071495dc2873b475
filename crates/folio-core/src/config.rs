//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content layout settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Photographer or site author.
    #[serde(default)]
    pub author: Option<String>,

    /// Site description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Where collections live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding one subdirectory per collection.
    #[serde(default = "default_content_root")]
    pub root: PathBuf,

    /// Metadata document inside each collection directory.
    #[serde(default = "default_meta_file")]
    pub meta_file: String,

    /// Media subfolder inside each collection directory.
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Copy media files next to the generated model.
    #[serde(default = "default_true")]
    pub copy_media: bool,

    /// Fail a collection whose cover does not match any media file.
    #[serde(default)]
    pub strict_covers: bool,
}

/// Sitemap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Whether sitemap.xml is generated.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default value functions
fn default_content_root() -> PathBuf {
    PathBuf::from("content/collections")
}

fn default_meta_file() -> String {
    "meta.md".to_string()
}

fn default_media_dir() -> String {
    "media".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            meta_file: default_meta_file(),
            media_dir: default_media_dir(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            copy_media: true,
            strict_covers: false,
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaulted configuration reading collections from `root`.
    pub fn for_content_root(root: impl Into<PathBuf>) -> Self {
        Self {
            site: SiteConfig {
                title: "Portfolio".to_string(),
                base_url: "http://localhost".to_string(),
                author: None,
                description: None,
            },
            content: ContentConfig {
                root: root.into(),
                ..ContentConfig::default()
            },
            build: BuildConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.content.meta_file.is_empty() || self.content.media_dir.is_empty() {
            return Err(CoreError::config(
                "content.meta_file and content.media_dir cannot be empty",
            ));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url().to_string()
        } else {
            format!("{}/{path}", self.base_url())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, content).expect("write");
        config_path
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Light Studies"
base_url = "https://photos.example.com"
author = "A. Photographer"

[content]
root = "albums"
meta_file = "index.md"

[build]
output_dir = "dist"
copy_media = false
strict_covers = true

[sitemap]
enabled = false
"#,
        );

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Light Studies");
        assert_eq!(config.site.author.as_deref(), Some("A. Photographer"));
        assert_eq!(config.content.root, PathBuf::from("albums"));
        assert_eq!(config.content.meta_file, "index.md");
        assert_eq!(config.content.media_dir, "media");
        assert_eq!(config.build.output_dir, "dist");
        assert!(!config.build.copy_media);
        assert!(config.build.strict_covers);
        assert!(!config.sitemap.enabled);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Minimal"
base_url = "https://example.com"
"#,
        );

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.content.root, PathBuf::from("content/collections"));
        assert_eq!(config.content.meta_file, "meta.md");
        assert_eq!(config.build.output_dir, "public");
        assert!(config.build.copy_media);
        assert!(!config.build.strict_covers);
        assert!(config.sitemap.enabled);
    }

    #[test]
    fn test_url_for() {
        let mut config = Config::for_content_root("content/collections");
        config.site.base_url = "https://example.com/".to_string();

        assert_eq!(
            config.url_for("/collections/kyoto"),
            "https://example.com/collections/kyoto"
        );
        assert_eq!(config.url_for("journey"), "https://example.com/journey");
        assert_eq!(config.url_for("/"), "https://example.com");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = ""
base_url = "https://example.com"
"#,
        );

        let result = Config::load(&config_path);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = write_config(
            &dir,
            r#"
[site]
title = "Layered"
base_url = "https://example.com"

[build]
output_dir = "dist"
"#,
        );

        let config = Config::load_with_env(&config_path).expect("load config");

        assert_eq!(config.site.title, "Layered");
        assert_eq!(config.build.output_dir, "dist");
        assert_eq!(config.content.meta_file, "meta.md");
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/folio.toml"));
        assert!(result.unwrap_err().to_string().contains("not found"));

        let result = Config::load_with_env(Path::new("/nonexistent/folio.toml"));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
