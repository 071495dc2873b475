//! Check command - validate configuration and collections

use std::{collections::HashSet, fs, path::Path};

use color_eyre::eyre::{Result, bail};
use folio_core::{Collection, Config};
use folio_generator::{CollectionBuilder, ContentRepository};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every collection independently.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and collections");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load_with_env(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            check_config_values(&config, &mut result);

            println!("\nChecking collections...");
            check_collections(&config, &mut result);
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Build every collection and record problems.
///
/// Cover mismatches are always reported as warnings here so that one run
/// shows every problem, whatever `build.strict_covers` says.
pub fn check_collections(config: &Config, result: &mut ValidationResult) {
    let builder = CollectionBuilder::from_config(config).with_strict_covers(false);

    let site = match builder.collect_all() {
        Ok(site) => site,
        Err(e) => {
            result.add_error(format!(
                "Cannot read content root {}: {e}",
                config.content.root.display()
            ));
            return;
        }
    };

    for failure in &site.failures {
        result.add_error(format!("{}: {}", failure.slug, failure.error));
    }

    for collection in &site.collections {
        check_collection(builder.repository(), collection, config.build.strict_covers, result);
    }

    println!(
        "  {} {} collection(s) built, {} failed",
        if site.is_complete() { "✓" } else { "✗" },
        site.collections.len(),
        site.failures.len()
    );
}

fn check_collection(
    repo: &ContentRepository,
    collection: &Collection,
    strict_covers: bool,
    result: &mut ValidationResult,
) {
    let slug = &collection.meta.slug;

    if !collection.cover_resolves() {
        let msg = format!(
            "{slug}: cover `{}` does not match any media file",
            collection.meta.cover
        );
        if strict_covers {
            result.add_error(msg);
        } else {
            result.add_warning(msg);
        }
    }

    if collection.media.is_empty() {
        result.add_warning(format!("{slug}: no media files"));
    } else if collection.images().next().is_none() {
        result.add_warning(format!("{slug}: only videos, gallery will have no scenes"));
    }

    for orphan in orphan_reflections(repo, collection) {
        result.add_warning(format!("{slug}: reflection {orphan} has no matching media file"));
    }
}

/// Reflection documents whose base name matches no media file.
fn orphan_reflections(repo: &ContentRepository, collection: &Collection) -> Vec<String> {
    let Ok(entries) = fs::read_dir(repo.media_dir(&collection.meta.slug)) else {
        return Vec::new();
    };

    let bases: HashSet<_> = collection.media.iter().map(|m| m.base_name()).collect();

    let mut orphans: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| {
            name.strip_suffix(".md")
                .is_some_and(|base| !bases.contains(base))
        })
        .collect();
    orphans.sort();
    orphans
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if !config.content.root.is_dir() {
        result.add_error(format!(
            "Content root is not a directory: {}",
            config.content.root.display()
        ));
    }

    let output = Path::new(&config.build.output_dir);
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            config.build.output_dir
        ));
    }

    println!("  ✓ Configuration values checked");
}
