//! Generation options and the values they are built from.

use crate::error::{Error, ValidationError};
use regex::Regex;
use serde::Deserialize;
use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::OnceLock,
};

/// Target platform of a generated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Iphone,
    Ipad,
    Android,
    Mobileweb,
    Blackberry,
    Tizen,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Iphone,
        Platform::Ipad,
        Platform::Android,
        Platform::Mobileweb,
        Platform::Blackberry,
        Platform::Tizen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Iphone => "iphone",
            Platform::Ipad => "ipad",
            Platform::Android => "android",
            Platform::Mobileweb => "mobileweb",
            Platform::Blackberry => "blackberry",
            Platform::Tizen => "tizen",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownPlatform(s.to_string()))
    }
}

/// Screen orientation a splash screen is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(ValidationError::UnknownOrientation(other.to_string())),
        }
    }
}

/// How hard generated files are compressed.
///
/// The discriminant doubles as the JPEG quality used for splash screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionTier {
    None = 100,
    Low = 80,
    #[default]
    Medium = 65,
    High = 50,
}

impl CompressionTier {
    /// JPEG encoder quality for this tier.
    pub fn jpeg_quality(self) -> u8 {
        self as u8
    }

    /// Level passed to the PNG optimizer, or `None` when compression is off.
    pub fn optimizer_level(self) -> Option<u8> {
        match self {
            CompressionTier::None => None,
            CompressionTier::Low => Some(1),
            CompressionTier::Medium => Some(2),
            CompressionTier::High => Some(3),
        }
    }
}

impl TryFrom<u32> for CompressionTier {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(CompressionTier::None),
            80 => Ok(CompressionTier::Low),
            65 => Ok(CompressionTier::Medium),
            50 => Ok(CompressionTier::High),
            other => Err(ValidationError::UnknownCompression(other.to_string())),
        }
    }
}

impl FromStr for CompressionTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CompressionTier::None),
            "low" => Ok(CompressionTier::Low),
            "medium" => Ok(CompressionTier::Medium),
            "high" => Ok(CompressionTier::High),
            other => other
                .parse::<u32>()
                .map_err(|_| ValidationError::UnknownCompression(s.to_string()))
                .and_then(CompressionTier::try_from),
        }
    }
}

/// Options for one generator instance.
///
/// Fields are only changed through the validating setters on
/// [`Generator`](crate::Generator); each operation takes a snapshot.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub icon: Option<PathBuf>,
    pub icon_transparent: Option<PathBuf>,
    pub splash: Option<PathBuf>,
    pub radius: u8,
    pub language: String,
    pub compression: CompressionTier,
    pub platforms: BTreeSet<Platform>,
    pub orientations: BTreeSet<Orientation>,
    pub apple_splash_dimensions: bool,
    pub alloy_layout: bool,
    pub output: PathBuf,
}

impl GenerationConfig {
    pub fn new(output: PathBuf) -> Self {
        Self {
            icon: None,
            icon_transparent: None,
            splash: None,
            radius: 0,
            language: String::new(),
            compression: CompressionTier::default(),
            platforms: [Platform::Iphone, Platform::Ipad, Platform::Android].into(),
            orientations: [Orientation::Portrait, Orientation::Landscape].into(),
            apple_splash_dimensions: true,
            alloy_layout: true,
            output,
        }
    }

    pub fn has_platform(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    pub fn has_orientation(&self, orientation: Orientation) -> bool {
        self.orientations.contains(&orientation)
    }

    pub(crate) fn check_selection(&self) -> Result<(), ValidationError> {
        if self.platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }
        if self.orientations.is_empty() {
            return Err(ValidationError::NoOrientations);
        }
        Ok(())
    }
}

pub(crate) fn validate_radius(radius: i64) -> Result<u8, ValidationError> {
    match u8::try_from(radius) {
        Ok(value) if value <= 50 => Ok(value),
        _ => Err(ValidationError::RadiusOutOfRange(radius)),
    }
}

pub(crate) fn validate_language(language: &str) -> Result<String, ValidationError> {
    static LANGUAGE: OnceLock<Regex> = OnceLock::new();
    let pattern = LANGUAGE.get_or_init(|| Regex::new("^[a-z]{2}$").expect("valid regex"));

    if language.is_empty() || pattern.is_match(language) {
        Ok(language.to_string())
    } else {
        Err(ValidationError::InvalidLanguage(language.to_string()))
    }
}

pub(crate) fn validate_source(path: &Path) -> Result<PathBuf, ValidationError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ValidationError::FileNotFound(path.to_path_buf()))
    }
}

pub(crate) fn ensure_output_dir(path: &Path) -> Result<PathBuf, ValidationError> {
    std::fs::create_dir_all(path).map_err(|source| ValidationError::OutputDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// Generation options read from a JSON settings file.
///
/// Every field is optional; present fields are applied through the same
/// setters as programmatic configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub icon: Option<PathBuf>,
    pub icon_transparent: Option<PathBuf>,
    pub splash: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub platforms: Option<Vec<Platform>>,
    pub orientations: Option<Vec<Orientation>>,
    pub radius: Option<i64>,
    pub language: Option<String>,
    pub compression: Option<String>,
    pub apple_splash_dimensions: Option<bool>,
    pub alloy_layout: Option<bool>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        serde_json::from_str(&text).map_err(|err| {
            ValidationError::Settings {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()
        })
    }
}
