//! New command - scaffold a collection

use std::{fs, path::Path};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::Config;

/// Run the new command.
///
/// Creates `<root>/<slug>/` with a metadata document and an empty media folder.
pub fn run(config_path: &Path, slug: &str) -> Result<()> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let dir = scaffold(&config, slug)?;

    println!("Created: {}", dir.display());
    println!("Add images to {}/", dir.join(&config.content.media_dir).display());
    Ok(())
}

/// Create the collection directory, returning its path.
pub fn scaffold(config: &Config, slug: &str) -> Result<std::path::PathBuf> {
    tracing::info!(slug, "Creating new collection");

    if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
        bail!("Invalid collection slug: {slug:?}");
    }

    let dir = config.content.root.join(slug);
    if dir.exists() {
        bail!("Collection already exists: {}", dir.display());
    }

    fs::create_dir_all(dir.join(&config.content.media_dir))
        .wrap_err("Failed to create directories")?;
    fs::write(dir.join(&config.content.meta_file), meta_template(slug))
        .wrap_err("Failed to write metadata document")?;

    tracing::info!(dir = %dir.display(), "Created new collection");
    Ok(dir)
}

fn meta_template(slug: &str) -> String {
    let title = slug.replace(['-', '_'], " ");
    let date = Utc::now().format("%Y-%m-%d");

    format!(
        r#"---
title: "{title}"
date: {date}
cover: 01.jpg
description: "Describe this collection."
order: 0
---
"#
    )
}

#[cfg(test)]
mod tests {
    use folio_generator::Portfolio;

    use super::*;

    #[test]
    fn test_scaffold_builds_as_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::for_content_root(dir.path());

        scaffold(&config, "winter-light").expect("scaffold");

        let collection = Portfolio::from_config(&config)
            .get_collection("winter-light")
            .expect("builds");
        assert_eq!(collection.meta.title, "winter light");
        assert!(collection.media.is_empty());
    }

    #[test]
    fn test_scaffold_refuses_existing_and_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::for_content_root(dir.path());

        scaffold(&config, "kyoto").expect("scaffold");
        assert!(scaffold(&config, "kyoto").is_err());
        assert!(scaffold(&config, "../escape").is_err());
        assert!(scaffold(&config, "").is_err());
    }
}
