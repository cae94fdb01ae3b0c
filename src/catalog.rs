//! The fixed table of icons and splash screens every platform expects.
//!
//! Rows are plain data grouped per platform. The catalog functions only
//! filter groups by the selected platforms (and splash rows by orientation);
//! nothing here touches the filesystem.

use crate::config::{GenerationConfig, Orientation, Platform};

/// Height of the status bar trimmed from iPad launch images when the legacy
/// (pre Apple specification) dimensions are requested.
pub const IPAD_STATUS_BAR: u32 = 20;

/// Where a [`SizeEntry`] path is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Below the asset base directory of the project layout.
    Assets,
    /// Directly in the project (output) root, outside the asset base.
    ProjectRoot,
    /// iOS launch images: the `iphone` asset folder, or `i18n/<lang>` when a
    /// language is set.
    IosSplash,
    /// Android splash bucket, e.g. `long-port-hdpi`. The folder name gains a
    /// `<lang>-` qualifier when a language is set.
    AndroidSplash(&'static str),
}

/// One output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeEntry {
    pub location: Location,
    pub path: &'static str,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    /// Whether the configured corner radius may be applied.
    pub rounded: bool,
    /// Clockwise rotation applied before cropping.
    pub rotate: Option<u16>,
}

impl SizeEntry {
    const fn icon(location: Location, path: &'static str, size: u32, dpi: u32) -> Self {
        Self::splash(location, path, size, size, dpi)
    }

    const fn splash(
        location: Location,
        path: &'static str,
        width: u32,
        height: u32,
        dpi: u32,
    ) -> Self {
        Self {
            location,
            path,
            width,
            height,
            dpi,
            rounded: false,
            rotate: None,
        }
    }

    const fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    const fn rotated(mut self, degrees: u16) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Whether the entry should be written for the selected orientations.
    /// Square entries always are.
    pub fn fits(&self, config: &GenerationConfig) -> bool {
        if self.width < self.height {
            config.has_orientation(Orientation::Portrait)
        } else if self.width > self.height {
            config.has_orientation(Orientation::Landscape)
        } else {
            true
        }
    }

    pub fn is_jpeg(&self) -> bool {
        self.path.to_ascii_lowercase().ends_with(".jpg")
    }
}

struct Group {
    platforms: &'static [Platform],
    entries: &'static [SizeEntry],
    trims_status_bar: bool,
}

impl Group {
    const fn new(platforms: &'static [Platform], entries: &'static [SizeEntry]) -> Self {
        Self {
            platforms,
            entries,
            trims_status_bar: false,
        }
    }

    fn selected(&self, config: &GenerationConfig) -> bool {
        self.platforms.iter().any(|p| config.has_platform(*p))
    }
}

use Location::{AndroidSplash, Assets, IosSplash, ProjectRoot};

const APPLE_ICONS: &[SizeEntry] = &[
    SizeEntry::icon(ProjectRoot, "iTunesConnect.png", 1024, 72),
    SizeEntry::icon(Assets, "iphone/iTunesArtwork", 512, 72),
    SizeEntry::icon(Assets, "iphone/iTunesArtwork@2x", 1024, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small@2x.png", 58, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small-40.png", 40, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small-40@2x.png", 80, 72),
    SizeEntry::icon(Assets, "iphone/appicon.png", 57, 72),
];

const IPHONE_ICONS: &[SizeEntry] = &[
    SizeEntry::icon(Assets, "iphone/appicon@2x.png", 114, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small.png", 29, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small@3x.png", 87, 72),
    SizeEntry::icon(Assets, "iphone/appicon-60.png", 60, 72),
    SizeEntry::icon(Assets, "iphone/appicon-60@2x.png", 120, 72),
    SizeEntry::icon(Assets, "iphone/appicon-60@3x.png", 180, 72),
];

const IPAD_ICONS: &[SizeEntry] = &[
    SizeEntry::icon(Assets, "iphone/appicon-72.png", 72, 72),
    SizeEntry::icon(Assets, "iphone/appicon-72@2x.png", 144, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small-50.png", 50, 72),
    SizeEntry::icon(Assets, "iphone/appicon-Small-50@2x.png", 100, 72),
    SizeEntry::icon(Assets, "iphone/appicon-76.png", 76, 72),
    SizeEntry::icon(Assets, "iphone/appicon-76@2x.png", 152, 72),
];

const ANDROID_ICONS: &[SizeEntry] = &[
    SizeEntry::icon(Assets, "android/appicon.png", 128, 72),
    SizeEntry::icon(Assets, "android/images/res-ldpi/appicon.png", 36, 120).rounded(),
    SizeEntry::icon(Assets, "android/images/res-mdpi/appicon.png", 48, 160).rounded(),
    SizeEntry::icon(Assets, "android/images/res-hdpi/appicon.png", 72, 240).rounded(),
    SizeEntry::icon(Assets, "android/images/res-xhdpi/appicon.png", 96, 320).rounded(),
    SizeEntry::icon(Assets, "android/images/res-xxhdpi/appicon.png", 144, 480).rounded(),
    SizeEntry::icon(Assets, "android/images/res-xxxhdpi/appicon.png", 192, 640).rounded(),
    SizeEntry::icon(ProjectRoot, "MarketplaceArtwork.png", 512, 72).rounded(),
];

const MOBILEWEB_ICONS: &[SizeEntry] =
    &[SizeEntry::icon(Assets, "mobileweb/appicon.png", 128, 72).rounded()];

const TIZEN_ICONS: &[SizeEntry] = &[SizeEntry::icon(Assets, "tizen/appicon.png", 96, 72).rounded()];

const BLACKBERRY_ICONS: &[SizeEntry] =
    &[SizeEntry::icon(Assets, "blackberry/appicon.png", 114, 72).rounded()];

const IPHONE_SPLASH: &[SizeEntry] = &[
    SizeEntry::splash(IosSplash, "Default.png", 320, 480, 72),
    SizeEntry::splash(IosSplash, "Default@2x.png", 640, 960, 144),
    SizeEntry::splash(IosSplash, "Default-568h@2x.png", 640, 1136, 144),
    SizeEntry::splash(IosSplash, "Default-667h@2x.png", 750, 1334, 144),
    SizeEntry::splash(IosSplash, "Default-Portrait-736h@3x.png", 1242, 2208, 216),
    SizeEntry::splash(IosSplash, "Default-Landscape-736h@3x.png", 2208, 1242, 216),
];

const IPAD_SPLASH: &[SizeEntry] = &[
    SizeEntry::splash(IosSplash, "Default-Portrait.png", 768, 1024, 72),
    SizeEntry::splash(IosSplash, "Default-Landscape.png", 1024, 768, 72),
    SizeEntry::splash(IosSplash, "Default-Portrait@2x.png", 1536, 2048, 144),
    SizeEntry::splash(IosSplash, "Default-Landscape@2x.png", 2048, 1536, 144),
];

const ANDROID_SPLASH: &[SizeEntry] = &[
    SizeEntry::splash(ProjectRoot, "MarketplaceFeatureGraphic.png", 1024, 500, 72),
    SizeEntry::splash(Assets, "android/default.png", 320, 480, 72),
    SizeEntry::splash(AndroidSplash("notlong-port-ldpi"), "default.png", 240, 320, 120),
    SizeEntry::splash(AndroidSplash("notlong-land-ldpi"), "default.png", 320, 240, 120),
    SizeEntry::splash(AndroidSplash("long-port-ldpi"), "default.png", 240, 400, 120),
    SizeEntry::splash(AndroidSplash("long-land-ldpi"), "default.png", 400, 240, 120),
    SizeEntry::splash(AndroidSplash("notlong-port-mdpi"), "default.png", 320, 480, 160),
    SizeEntry::splash(AndroidSplash("notlong-land-mdpi"), "default.png", 480, 320, 160),
    SizeEntry::splash(AndroidSplash("long-port-mdpi"), "default.png", 320, 533, 160),
    SizeEntry::splash(AndroidSplash("long-land-mdpi"), "default.png", 533, 320, 160),
    SizeEntry::splash(AndroidSplash("notlong-port-hdpi"), "default.png", 480, 800, 240),
    SizeEntry::splash(AndroidSplash("notlong-land-hdpi"), "default.png", 800, 480, 240),
    SizeEntry::splash(AndroidSplash("long-port-hdpi"), "default.png", 480, 854, 240),
    SizeEntry::splash(AndroidSplash("long-land-hdpi"), "default.png", 854, 480, 240),
    SizeEntry::splash(AndroidSplash("notlong-port-xhdpi"), "default.png", 640, 960, 320),
    SizeEntry::splash(AndroidSplash("notlong-land-xhdpi"), "default.png", 960, 640, 320),
    SizeEntry::splash(AndroidSplash("long-port-xhdpi"), "default.png", 720, 1280, 320),
    SizeEntry::splash(AndroidSplash("long-land-xhdpi"), "default.png", 1280, 720, 320),
    SizeEntry::splash(AndroidSplash("notlong-port-xxhdpi"), "default.png", 960, 1440, 480),
    SizeEntry::splash(AndroidSplash("notlong-land-xxhdpi"), "default.png", 1440, 960, 480),
    SizeEntry::splash(AndroidSplash("long-port-xxhdpi"), "default.png", 1080, 1920, 480),
    SizeEntry::splash(AndroidSplash("long-land-xxhdpi"), "default.png", 1920, 1080, 480),
    SizeEntry::splash(AndroidSplash("notlong-port-xxxhdpi"), "default.png", 1280, 1920, 640),
    SizeEntry::splash(AndroidSplash("notlong-land-xxxhdpi"), "default.png", 1920, 1280, 640),
    SizeEntry::splash(AndroidSplash("long-port-xxxhdpi"), "default.png", 1440, 2560, 640),
    SizeEntry::splash(AndroidSplash("long-land-xxxhdpi"), "default.png", 2560, 1440, 640),
];

// Apple startup images for web apps are always stored in portrait; the
// landscape pair is rotated into that frame.
const MOBILEWEB_SPLASH: &[SizeEntry] = &[
    SizeEntry::splash(Assets, "mobileweb/apple_startup_images/Default.jpg", 320, 460, 72),
    SizeEntry::splash(Assets, "mobileweb/apple_startup_images/Default.png", 320, 460, 72),
    SizeEntry::splash(Assets, "mobileweb/apple_startup_images/Default-Portrait.jpg", 748, 1024, 72),
    SizeEntry::splash(Assets, "mobileweb/apple_startup_images/Default-Portrait.png", 748, 1024, 72),
    SizeEntry::splash(Assets, "mobileweb/apple_startup_images/Default-Landscape.jpg", 748, 1024, 72)
        .rotated(90),
    SizeEntry::splash(Assets, "mobileweb/apple_startup_images/Default-Landscape.png", 748, 1024, 72)
        .rotated(90),
];

const BLACKBERRY_SPLASH: &[SizeEntry] = &[
    SizeEntry::splash(Assets, "blackberry/splash-600x1024.png", 600, 1024, 72),
    SizeEntry::splash(Assets, "blackberry/splash-1024x600.png", 1024, 600, 72),
];

const APPLE_ICON_GROUPS: &[Group] = &[
    Group::new(&[Platform::Iphone, Platform::Ipad], APPLE_ICONS),
    Group::new(&[Platform::Iphone], IPHONE_ICONS),
    Group::new(&[Platform::Ipad], IPAD_ICONS),
];

const ROUNDED_ICON_GROUPS: &[Group] = &[
    Group::new(&[Platform::Android], ANDROID_ICONS),
    Group::new(&[Platform::Mobileweb], MOBILEWEB_ICONS),
    Group::new(&[Platform::Tizen], TIZEN_ICONS),
    Group::new(&[Platform::Blackberry], BLACKBERRY_ICONS),
];

const SPLASH_GROUPS: &[Group] = &[
    Group::new(&[Platform::Iphone], IPHONE_SPLASH),
    Group {
        platforms: &[Platform::Ipad],
        entries: IPAD_SPLASH,
        trims_status_bar: true,
    },
    Group::new(&[Platform::Android], ANDROID_SPLASH),
    Group::new(&[Platform::Mobileweb], MOBILEWEB_SPLASH),
    Group::new(&[Platform::Blackberry], BLACKBERRY_SPLASH),
];

/// Icons to produce, split by the master image each pass reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconCatalog {
    /// Apple icons, always rendered from the primary icon without rounding.
    pub apple: Vec<SizeEntry>,
    /// Remaining platforms, rendered from the transparent icon when given.
    pub rounded: Vec<SizeEntry>,
}

impl IconCatalog {
    pub fn len(&self) -> usize {
        self.apple.len() + self.rounded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apple.is_empty() && self.rounded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeEntry> {
        self.apple.iter().chain(self.rounded.iter())
    }
}

fn collect(groups: &[Group], config: &GenerationConfig) -> Vec<SizeEntry> {
    groups
        .iter()
        .filter(|group| group.selected(config))
        .flat_map(|group| {
            group.entries.iter().map(move |entry| {
                let mut entry = *entry;
                if group.trims_status_bar && !config.apple_splash_dimensions {
                    entry.height -= IPAD_STATUS_BAR;
                }
                entry
            })
        })
        .collect()
}

/// Icons for the selected platforms.
///
/// A transparent master icon is expected to carry its own shape, so its
/// presence disables rounding for the whole second pass.
pub fn icon_catalog(config: &GenerationConfig) -> IconCatalog {
    let apple = collect(APPLE_ICON_GROUPS, config);
    let mut rounded = collect(ROUNDED_ICON_GROUPS, config);

    if config.icon_transparent.is_some() {
        for entry in &mut rounded {
            entry.rounded = false;
        }
    }

    IconCatalog { apple, rounded }
}

/// Splash screens for the selected platforms and orientations.
pub fn splash_catalog(config: &GenerationConfig) -> Vec<SizeEntry> {
    collect(SPLASH_GROUPS, config)
        .into_iter()
        .filter(|entry| entry.fits(config))
        .collect()
}
