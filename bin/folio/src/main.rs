//! Folio CLI
//!
//! Builds a photography portfolio model from markdown collections.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Build and preview a photography portfolio"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the portfolio model into the output directory
    Build {
        /// Output directory (overrides build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Validate configuration and every collection
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// List collections in display order
    List,
    /// Show the gallery scenes of one collection
    Scenes {
        /// Collection slug
        slug: String,
    },
    /// Show the chronological journey feed
    Journey,
    /// Scaffold a new collection
    New {
        /// Slug (directory name) of the new collection
        slug: String,
    },
    /// Serve the built output and rebuild on content changes
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output } => {
            folio::cmd::build::run(&cli.config, output.as_deref())?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::List => {
            folio::cmd::inspect::list(&cli.config)?;
        }
        Commands::Scenes { slug } => {
            folio::cmd::inspect::scenes(&cli.config, &slug)?;
        }
        Commands::Journey => {
            folio::cmd::inspect::journey(&cli.config)?;
        }
        Commands::New { slug } => {
            folio::cmd::new::run(&cli.config, &slug)?;
        }
        Commands::Serve { port } => {
            folio::cmd::serve::run(&cli.config, port).await?;
        }
    }

    Ok(())
}
