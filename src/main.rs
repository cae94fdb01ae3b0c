use anyhow::{Context, Result};
use asset_gen::{
    CompressionTier, GenerationReport, Generator, OptiPng, Orientation, Platform, SettingsFile,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[clap(
    name = "asset-gen",
    about = "Generate icons and splash screens for all major mobile platforms"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    options: Options,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate app icons from a square master icon (1024x1024 recommended).
    Icons {
        /// Path to the master icon.
        #[clap(value_name = "ICON")]
        icon: Option<PathBuf>,

        /// Icon with its own transparent shape, used for Android, Mobile Web,
        /// BlackBerry and Tizen. Disables corner rounding for those.
        #[clap(short, long, value_name = "FILE")]
        transparent: Option<PathBuf>,
    },

    /// Generate splash screens from a master image (at least 2208x2208 recommended).
    Splash {
        /// Path to the master splash image.
        #[clap(value_name = "SPLASH")]
        splash: Option<PathBuf>,
    },
}

#[derive(Debug, ClapArgs)]
struct Options {
    /// JSON settings file; command line options override its values.
    #[clap(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output directory (project root).
    #[clap(short, long, value_name = "DIR", global = true)]
    output: Option<PathBuf>,

    /// Platforms to generate for.
    #[clap(short, long, value_delimiter = ',', value_name = "PLATFORMS", global = true)]
    platforms: Option<Vec<Platform>>,

    /// Orientations to generate splash screens for.
    #[clap(long, value_delimiter = ',', value_name = "ORIENTATIONS", global = true)]
    orientations: Option<Vec<Orientation>>,

    /// Corner radius in percent of the icon width (0-50).
    #[clap(short, long, value_name = "PERCENT", allow_negative_numbers = true, global = true)]
    radius: Option<i64>,

    /// Two-letter language code for localized splash screens.
    #[clap(short, long, value_name = "LANG", global = true)]
    language: Option<String>,

    /// Compression tier: none, low, medium or high.
    #[clap(short, long, value_name = "TIER", global = true)]
    compression: Option<CompressionTier>,

    /// Use legacy iPad launch image heights (status bar excluded).
    #[clap(long, global = true)]
    legacy_splash: bool,

    /// Write into a classic `Resources` folder instead of `app/assets`.
    #[clap(long, global = true)]
    classic_layout: bool,

    /// PNG optimizer executable.
    #[clap(long, value_name = "PROGRAM", default_value = "optipng", global = true)]
    optimizer: PathBuf,

    /// Log debug output.
    #[clap(short, long, global = true)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn configure(options: &Options) -> Result<Generator> {
    let settings = match &options.config {
        Some(path) => SettingsFile::load(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?,
        None => SettingsFile::default(),
    };

    let output = options
        .output
        .clone()
        .or_else(|| settings.output.clone())
        .unwrap_or_else(|| PathBuf::from(asset_gen::generator::DEFAULT_OUTPUT));

    let mut generator = Generator::with_output(&output)
        .context("Can't create output directory")?
        .with_optimizer(OptiPng::new(&options.optimizer));
    generator
        .apply_settings(&settings)
        .context("Invalid settings file")?;

    if let Some(output) = &options.output {
        generator.set_output(output)?;
    }
    if let Some(platforms) = &options.platforms {
        generator.set_platforms(platforms.iter().copied());
    }
    if let Some(orientations) = &options.orientations {
        generator.set_orientations(orientations.iter().copied());
    }
    if let Some(radius) = options.radius {
        generator.set_radius(radius)?;
    }
    if let Some(language) = &options.language {
        generator.set_language(language)?;
    }
    if let Some(tier) = options.compression {
        generator.set_compression(tier);
    }
    if options.legacy_splash {
        generator.set_apple_splash_dimensions(false);
    }
    if options.classic_layout {
        generator.set_alloy_layout(false);
    }

    Ok(generator)
}

fn summarize(kind: &str, report: &GenerationReport) {
    println!("✓ Generated {} {kind}", report.written.len());
    match report.optimizer_level {
        Some(level) => println!(
            "  - {} PNG files passed to the optimizer at level {level}",
            report.png_batch.len()
        ),
        None => println!("  - PNG compression disabled"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.options.verbose);

    let mut generator = configure(&args.options)?;

    match args.command {
        Command::Icons { icon, transparent } => {
            let report = generator
                .generate_icons(icon.as_deref(), transparent.as_deref())
                .context("Failed to generate icons")?;
            summarize("icons", &report);
        }
        Command::Splash { splash } => {
            let report = generator
                .generate_splash(splash.as_deref())
                .context("Failed to generate splash screens")?;
            summarize("splash screens", &report);
        }
    }

    Ok(())
}
