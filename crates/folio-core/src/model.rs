//! Collection model types.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

/// Identity and listing metadata for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMeta {
    /// Directory name of the collection; unique and URL-safe.
    pub slug: String,

    /// Display title.
    pub title: String,

    /// Display description.
    pub description: String,

    /// Date as written in the metadata document.
    pub date: String,

    /// Parsed form of `date`, used for chronological ordering.
    pub published: DateTime<Utc>,

    /// Filename of the representative image.
    pub cover: String,

    /// Listing sort key.
    pub order: i64,
}

impl CollectionMeta {
    /// URL path of the collection page.
    pub fn url_path(&self) -> String {
        format!("/collections/{}", self.slug)
    }
}

/// One media file within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Base name within the collection's media directory.
    pub filename: String,

    /// Image or video, derived from the extension.
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Caption read from the sibling `<base>.md` document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

impl MediaItem {
    /// Filename without its extension.
    pub fn base_name(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }

    /// Whether this item is a still image.
    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }
}

/// A collection with its ordered media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(flatten)]
    pub meta: CollectionMeta,

    /// Media sorted by filename.
    pub media: Vec<MediaItem>,
}

impl Collection {
    /// Image items in filename order.
    pub fn images(&self) -> impl Iterator<Item = &MediaItem> {
        self.media.iter().filter(|m| m.is_image())
    }

    /// Public URL of a media file in this collection.
    pub fn media_src(&self, filename: &str) -> String {
        format!("/collections/{}/media/{}", self.meta.slug, filename)
    }

    /// Whether `cover` names one of this collection's media files.
    pub fn cover_resolves(&self) -> bool {
        let cover = self.meta.cover.rsplit('/').next().unwrap_or(&self.meta.cover);
        self.media.iter().any(|m| m.filename == cover)
    }
}

/// One image in the cross-collection journey feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyImage {
    pub src: String,
    pub alt: String,
    /// Title of the parent collection.
    pub collection: String,
    pub collection_slug: String,
    /// Date of the parent collection, as authored.
    pub date: String,
    /// Position among the parent collection's images.
    pub index: usize,
}

/// Parse an ISO-8601 date or date-time.
///
/// Accepts RFC 3339 timestamps, date-times without an offset (taken as UTC)
/// and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn sample_collection() -> Collection {
        Collection {
            meta: CollectionMeta {
                slug: "kyoto".to_string(),
                title: "Kyoto".to_string(),
                description: "Rain and lanterns".to_string(),
                date: "2021-05-01".to_string(),
                published: parse_date("2021-05-01").expect("date"),
                cover: "01.jpg".to_string(),
                order: 0,
            },
            media: vec![
                MediaItem {
                    filename: "01.jpg".to_string(),
                    kind: MediaKind::Image,
                    reflection: Some("A quiet moment.".to_string()),
                },
                MediaItem {
                    filename: "02.mp4".to_string(),
                    kind: MediaKind::Video,
                    reflection: None,
                },
            ],
        }
    }

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_date("2021-05-01").expect("parse");
        assert_eq!((dt.year(), dt.month(), dt.day()), (2021, 5, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let dt = parse_date("2021-05-01T10:00:00+02:00").expect("parse");
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert!(parse_date("2021-05-01T10:30:00").is_some());
        assert!(parse_date("2021-05-01 10:30:00").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("last spring").is_none());
        assert!(parse_date("2021-13-01").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_media_item_base_name() {
        let collection = sample_collection();
        assert_eq!(collection.media[0].base_name(), "01");
        assert_eq!(collection.media[1].base_name(), "02");
    }

    #[test]
    fn test_images_excludes_video() {
        let collection = sample_collection();
        let images: Vec<_> = collection.images().map(|m| m.filename.as_str()).collect();
        assert_eq!(images, vec!["01.jpg"]);
    }

    #[test]
    fn test_media_src_and_cover() {
        let collection = sample_collection();
        assert_eq!(
            collection.media_src("01.jpg"),
            "/collections/kyoto/media/01.jpg"
        );
        assert!(collection.cover_resolves());
        assert_eq!(collection.meta.url_path(), "/collections/kyoto");
    }

    #[test]
    fn test_collection_serializes_flat_with_type_tag() {
        let json = serde_json::to_value(sample_collection()).expect("serialize");
        assert_eq!(json["slug"], "kyoto");
        assert_eq!(json["media"][0]["type"], "image");
        assert_eq!(json["media"][1]["type"], "video");
        assert!(json["media"][1].get("reflection").is_none());
    }
}
