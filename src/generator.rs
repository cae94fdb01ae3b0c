//! Entry point tying configuration, catalog, rendering and compression together.

use crate::catalog::{icon_catalog, splash_catalog};
use crate::compress::{compress, OptiPng, Optimizer};
use crate::config::{
    ensure_output_dir, validate_language, validate_radius, validate_source, CompressionTier,
    GenerationConfig, Orientation, Platform, SettingsFile,
};
use crate::error::{Result, ValidationError};
use crate::paths::resolve;
use crate::render::{load_source, render_icon, render_splash, Encoding};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT: &str = "output";

/// Files produced by one `icons` or `splash` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Every file written, in catalog order.
    pub written: Vec<PathBuf>,
    /// PNG files handed to the optimizer.
    pub png_batch: Vec<PathBuf>,
    /// Optimizer level used, `None` when the optimizer was not invoked.
    pub optimizer_level: Option<u8>,
}

impl GenerationReport {
    fn record(&mut self, path: PathBuf, encoding: Encoding) {
        if encoding == Encoding::Png {
            self.png_batch.push(path.clone());
        }
        self.written.push(path);
    }
}

/// Generates icons and splash screens for a mobile project.
///
/// Options are changed through validating setters which reject bad values
/// immediately. Each run works on a snapshot of the options taken when it
/// starts.
pub struct Generator {
    config: GenerationConfig,
    optimizer: Box<dyn Optimizer>,
}

impl Generator {
    /// A generator writing to [`DEFAULT_OUTPUT`].
    pub fn new() -> Result<Self> {
        Self::with_output(DEFAULT_OUTPUT)
    }

    pub fn with_output(output: impl AsRef<Path>) -> Result<Self> {
        let output = ensure_output_dir(output.as_ref())?;
        Ok(Self {
            config: GenerationConfig::new(output),
            optimizer: Box::new(OptiPng::default()),
        })
    }

    /// Replace the PNG optimizer used by the compression post-pass.
    pub fn with_optimizer(mut self, optimizer: impl Optimizer + 'static) -> Self {
        self.optimizer = Box::new(optimizer);
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn set_icon(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.config.icon = Some(validate_source(path.as_ref())?);
        Ok(self)
    }

    pub fn set_icon_transparent(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.config.icon_transparent = Some(validate_source(path.as_ref())?);
        Ok(self)
    }

    pub fn clear_icon_transparent(&mut self) -> &mut Self {
        self.config.icon_transparent = None;
        self
    }

    pub fn set_splash(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.config.splash = Some(validate_source(path.as_ref())?);
        Ok(self)
    }

    /// Corner radius as a percentage of the icon width, 0 to 50.
    pub fn set_radius(&mut self, radius: i64) -> Result<&mut Self> {
        self.config.radius = validate_radius(radius)?;
        Ok(self)
    }

    /// Two lowercase letters, or empty for the default language.
    pub fn set_language(&mut self, language: &str) -> Result<&mut Self> {
        self.config.language = validate_language(language)?;
        Ok(self)
    }

    pub fn set_compression(&mut self, tier: CompressionTier) -> &mut Self {
        self.config.compression = tier;
        self
    }

    /// Set the compression tier from its numeric value (100, 80, 65 or 50).
    pub fn set_compression_value(&mut self, value: u32) -> Result<&mut Self> {
        self.config.compression = CompressionTier::try_from(value)?;
        Ok(self)
    }

    pub fn set_platforms(&mut self, platforms: impl IntoIterator<Item = Platform>) -> &mut Self {
        self.config.platforms = platforms.into_iter().collect();
        self
    }

    pub fn set_orientations(
        &mut self,
        orientations: impl IntoIterator<Item = Orientation>,
    ) -> &mut Self {
        self.config.orientations = orientations.into_iter().collect();
        self
    }

    pub fn set_apple_splash_dimensions(&mut self, enabled: bool) -> &mut Self {
        self.config.apple_splash_dimensions = enabled;
        self
    }

    pub fn set_alloy_layout(&mut self, enabled: bool) -> &mut Self {
        self.config.alloy_layout = enabled;
        self
    }

    /// Set the output directory, creating it when missing.
    pub fn set_output(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        self.config.output = ensure_output_dir(path.as_ref())?;
        Ok(self)
    }

    /// Apply every option present in a settings file.
    pub fn apply_settings(&mut self, settings: &SettingsFile) -> Result<&mut Self> {
        if let Some(path) = &settings.output {
            self.set_output(path)?;
        }
        if let Some(path) = &settings.icon {
            self.set_icon(path)?;
        }
        if let Some(path) = &settings.icon_transparent {
            self.set_icon_transparent(path)?;
        }
        if let Some(path) = &settings.splash {
            self.set_splash(path)?;
        }
        if let Some(platforms) = &settings.platforms {
            self.set_platforms(platforms.iter().copied());
        }
        if let Some(orientations) = &settings.orientations {
            self.set_orientations(orientations.iter().copied());
        }
        if let Some(radius) = settings.radius {
            self.set_radius(radius)?;
        }
        if let Some(language) = &settings.language {
            self.set_language(language)?;
        }
        if let Some(compression) = &settings.compression {
            self.set_compression(compression.parse()?);
        }
        if let Some(enabled) = settings.apple_splash_dimensions {
            self.set_apple_splash_dimensions(enabled);
        }
        if let Some(enabled) = settings.alloy_layout {
            self.set_alloy_layout(enabled);
        }
        Ok(self)
    }

    /// Generate every icon for the selected platforms, then compress the PNGs.
    ///
    /// Given paths are validated and stored like [`set_icon`](Self::set_icon)
    /// and [`set_icon_transparent`](Self::set_icon_transparent). Files written
    /// before a failure are left in place.
    pub fn generate_icons(
        &mut self,
        icon: Option<&Path>,
        icon_transparent: Option<&Path>,
    ) -> Result<GenerationReport> {
        if let Some(path) = icon {
            self.set_icon(path)?;
        }
        if let Some(path) = icon_transparent {
            self.set_icon_transparent(path)?;
        }

        let config = self.config.clone();
        let icon = config
            .icon
            .clone()
            .ok_or(ValidationError::MissingSource("icon"))?;
        config.check_selection()?;

        run_icons(config, &icon, self.optimizer.as_ref())
    }

    /// Generate every splash screen for the selected platforms and
    /// orientations, then compress the PNGs.
    pub fn generate_splash(&mut self, splash: Option<&Path>) -> Result<GenerationReport> {
        if let Some(path) = splash {
            self.set_splash(path)?;
        }

        let config = self.config.clone();
        let splash = config
            .splash
            .clone()
            .ok_or(ValidationError::MissingSource("splash"))?;
        config.check_selection()?;

        run_splash(config, &splash, self.optimizer.as_ref())
    }

    /// Like [`generate_icons`](Self::generate_icons), reporting only success.
    pub fn icons(&mut self, icon: Option<&Path>, icon_transparent: Option<&Path>) -> bool {
        match self.generate_icons(icon, icon_transparent) {
            Ok(_) => true,
            Err(err) => {
                warn!("icon generation failed: {err}");
                false
            }
        }
    }

    /// Like [`generate_splash`](Self::generate_splash), reporting only success.
    pub fn splash(&mut self, splash: Option<&Path>) -> bool {
        match self.generate_splash(splash) {
            Ok(_) => true,
            Err(err) => {
                warn!("splash generation failed: {err}");
                false
            }
        }
    }
}

fn run_icons(
    config: GenerationConfig,
    icon: &Path,
    optimizer: &dyn Optimizer,
) -> Result<GenerationReport> {
    let catalog = icon_catalog(&config);
    info!("Generating {} icons...", catalog.len());

    let primary = load_source(icon)?;
    let mut report = GenerationReport::default();

    for entry in &catalog.apple {
        let path = resolve(entry, &config);
        render_icon(&primary, entry, &path, config.radius)?;
        report.record(path, Encoding::Png);
    }

    if !catalog.rounded.is_empty() {
        let transparent;
        let source = match &config.icon_transparent {
            Some(path) => {
                debug!("using transparent icon {}", path.display());
                transparent = load_source(path)?;
                &transparent
            }
            None => &primary,
        };

        for entry in &catalog.rounded {
            let path = resolve(entry, &config);
            render_icon(source, entry, &path, config.radius)?;
            report.record(path, Encoding::Png);
        }
    }

    report.optimizer_level = compress(optimizer, &report.png_batch, config.compression);
    Ok(report)
}

fn run_splash(
    config: GenerationConfig,
    splash: &Path,
    optimizer: &dyn Optimizer,
) -> Result<GenerationReport> {
    let entries = splash_catalog(&config);
    info!("Generating {} splash screens...", entries.len());

    let source = load_source(splash)?;
    let mut report = GenerationReport::default();

    for entry in &entries {
        let path = resolve(entry, &config);
        let encoding = render_splash(&source, entry, &path, config.compression)?;
        report.record(path, encoding);
    }

    report.optimizer_level = compress(optimizer, &report.png_batch, config.compression);
    Ok(report)
}
