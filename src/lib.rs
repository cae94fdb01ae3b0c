//! Generate the icons and splash screens a cross-platform mobile project
//! needs from one master icon and one master splash image.

pub mod catalog;
pub mod compress;
pub mod config;
pub mod error;
pub mod generator;
pub mod paths;
pub mod render;

pub use compress::{OptiPng, Optimizer};
pub use config::{CompressionTier, GenerationConfig, Orientation, Platform, SettingsFile};
pub use error::{Error, Result, ValidationError};
pub use generator::{GenerationReport, Generator};
