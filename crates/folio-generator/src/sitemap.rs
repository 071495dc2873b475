//! Sitemap generation.
//!
//! Lists the fixed site routes followed by one entry per collection.

use std::io::Write;

use chrono::{DateTime, Utc};
use folio_core::{CollectionMeta, Config};
use thiserror::Error;
use tracing::debug;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date.
    pub lastmod: Option<DateTime<Utc>>,

    /// Change frequency.
    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Fixed site routes with their change frequency and priority.
const STATIC_ROUTES: &[(&str, ChangeFreq, f32)] = &[
    ("/", ChangeFreq::Weekly, 1.0),
    ("/collections", ChangeFreq::Weekly, 0.9),
    ("/about", ChangeFreq::Monthly, 0.7),
    ("/journey", ChangeFreq::Monthly, 0.7),
];

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// All entries: static routes, then collections in the given order.
    pub fn urls(&self, collections: &[&CollectionMeta]) -> Vec<SitemapUrl> {
        let statics = STATIC_ROUTES
            .iter()
            .map(|&(path, changefreq, priority)| SitemapUrl {
                loc: self.config.url_for(path),
                lastmod: None,
                changefreq,
                priority,
            });

        let collections = collections.iter().map(|meta| SitemapUrl {
            loc: self.config.url_for(&meta.url_path()),
            lastmod: Some(meta.published),
            changefreq: ChangeFreq::Weekly,
            priority: 0.8,
        });

        statics.chain(collections).collect()
    }

    /// Generate sitemap XML.
    pub fn generate(&self, collections: &[&CollectionMeta]) -> String {
        let urls = self.urls(collections);
        debug!(count = urls.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in &urls {
            xml.push_str(&url_to_xml(url));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to a writer.
    pub fn write_to<W: Write>(&self, collections: &[&CollectionMeta], writer: &mut W) -> Result<()> {
        writer.write_all(self.generate(collections).as_bytes())?;
        Ok(())
    }
}

/// Convert a URL entry to XML.
fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");

    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));

    if let Some(lastmod) = &url.lastmod {
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            lastmod.format("%Y-%m-%d")
        ));
    }

    xml.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        url.changefreq.as_str()
    ));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));

    xml.push_str("  </url>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
