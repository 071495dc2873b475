//! Inspection commands - list, scenes and journey

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{CollectionMeta, Config, JourneyImage};
use folio_generator::{Portfolio, Scene};

fn load_portfolio(config_path: &Path) -> Result<Portfolio> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    Ok(Portfolio::from_config(&config))
}

/// Print collections in display order.
pub fn list(config_path: &Path) -> Result<()> {
    let collections = load_portfolio(config_path)?
        .list_collections()
        .wrap_err("Failed to list collections")?;

    for line in format_listing(&collections) {
        println!("{line}");
    }
    Ok(())
}

/// Print the gallery scenes of one collection.
pub fn scenes(config_path: &Path, slug: &str) -> Result<()> {
    let portfolio = load_portfolio(config_path)?;
    let collection = portfolio
        .get_collection(slug)
        .wrap_err_with(|| format!("Failed to load collection {slug}"))?;

    println!("{} ({})", collection.meta.title, collection.meta.slug);
    for line in format_scenes(&portfolio.partition_into_scenes(&collection)) {
        println!("{line}");
    }
    Ok(())
}

/// Print the journey feed.
pub fn journey(config_path: &Path) -> Result<()> {
    let feed = load_portfolio(config_path)?
        .get_journey_feed()
        .wrap_err("Failed to build journey feed")?;

    for line in format_journey(&feed) {
        println!("{line}");
    }
    Ok(())
}

fn format_listing(collections: &[CollectionMeta]) -> Vec<String> {
    collections
        .iter()
        .map(|m| format!("{:>4}  {:<10}  {:<24}  {}", m.order, m.date, m.slug, m.title))
        .collect()
}

fn format_scenes(scenes: &[Scene<'_>]) -> Vec<String> {
    scenes
        .iter()
        .enumerate()
        .map(|(i, scene)| {
            let files: Vec<_> = scene.images.iter().map(|m| m.filename.as_str()).collect();
            format!(
                "  {:>3}. {:<8} @{:<4} {}",
                i + 1,
                scene.layout.as_str(),
                scene.start_index,
                files.join(", ")
            )
        })
        .collect()
}

fn format_journey(feed: &[JourneyImage]) -> Vec<String> {
    feed.iter()
        .map(|image| format!("{:<10}  {:<32}  {}", image.date, image.alt, image.src))
        .collect()
}

#[cfg(test)]
mod tests {
    use folio_core::{MediaItem, MediaKind};
    use folio_generator::scenes::partition_images;

    use super::*;

    #[test]
    fn test_format_scenes() {
        let items: Vec<_> = ["01.jpg", "02.jpg", "03.jpg"]
            .iter()
            .map(|f| MediaItem {
                filename: f.to_string(),
                kind: MediaKind::Image,
                reflection: None,
            })
            .collect();
        let refs: Vec<_> = items.iter().collect();

        let lines = format_scenes(&partition_images(&refs));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("hero"));
        assert!(lines[1].contains("duo"));
        assert!(lines[1].contains("02.jpg, 03.jpg"));
    }

    #[test]
    fn test_format_journey() {
        let feed = vec![JourneyImage {
            src: "/collections/coast/media/a.jpg".to_string(),
            alt: "Coast - 1".to_string(),
            collection: "Coast".to_string(),
            collection_slug: "coast".to_string(),
            date: "2020-01-01".to_string(),
            index: 0,
        }];
        let lines = format_journey(&feed);
        assert!(lines[0].starts_with("2020-01-01"));
        assert!(lines[0].ends_with("/collections/coast/media/a.jpg"));
    }
}
