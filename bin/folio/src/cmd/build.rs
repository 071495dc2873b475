//! Build command - writes the portfolio model

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Builds every collection and writes the model to the output directory.
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, "Starting build");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let output = output_dir(&config, output);

    tracing::debug!(?config, "Loaded configuration");

    let stats = Builder::new(config, &output)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    print_stats(&stats);
    println!("  Duration:     {:.2}s", duration.as_secs_f64());
    println!("  Output:       {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

/// Output directory from the CLI override or the configuration.
pub fn output_dir(config: &Config, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| PathBuf::from(&config.build.output_dir), Path::to_path_buf)
}

/// Print build statistics.
pub fn print_stats(stats: &BuildStats) {
    println!();
    println!("  Collections:  {:>6}", stats.collections);
    println!("  Media:        {:>6}", stats.media);
    println!("  Scenes:       {:>6}", stats.scenes);
    println!("  Journey:      {:>6}", stats.journey_images);
    println!("  Copied:       {:>6}", stats.copied_media);
    println!();
}
