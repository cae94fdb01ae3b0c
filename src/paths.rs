//! Resolves catalog entries to output file paths.

use crate::catalog::{Location, SizeEntry};
use crate::config::GenerationConfig;
use std::path::{Path, PathBuf};

/// Asset folder of an Alloy project.
pub const ALLOY_ASSETS: &str = "app/assets";
/// Asset folder of a classic project.
pub const CLASSIC_ASSETS: &str = "Resources";

/// Asset base directory for the configured project layout.
pub fn asset_base(config: &GenerationConfig) -> PathBuf {
    let base = if config.alloy_layout {
        ALLOY_ASSETS
    } else {
        CLASSIC_ASSETS
    };
    config.output.join(base)
}

/// Folder name of an Android splash bucket, e.g. `res-fr-long-port-hdpi`.
pub fn android_bucket(bucket: &str, language: &str) -> String {
    if language.is_empty() {
        format!("res-{bucket}")
    } else {
        format!("res-{language}-{bucket}")
    }
}

/// Absolute output path of `entry`.
pub fn resolve(entry: &SizeEntry, config: &GenerationConfig) -> PathBuf {
    let assets = asset_base(config);

    match entry.location {
        Location::Assets => assets.join(entry.path),
        Location::ProjectRoot => config.output.join(entry.path),
        Location::IosSplash if config.language.is_empty() => {
            assets.join("iphone").join(entry.path)
        }
        // The i18n folder sits next to the asset folder in both layouts.
        Location::IosSplash => parent_or_root(&assets, &config.output)
            .join("i18n")
            .join(&config.language)
            .join(entry.path),
        Location::AndroidSplash(bucket) => assets
            .join("android")
            .join("images")
            .join(android_bucket(bucket, &config.language))
            .join(entry.path),
    }
}

fn parent_or_root(assets: &Path, root: &Path) -> PathBuf {
    assets
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf())
}
