use asset_gen::{CompressionTier, Generator, Optimizer, Orientation, Platform};
use image::{io::Reader as ImageReader, DynamicImage, Rgba, RgbaImage};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Optimizer that records its calls instead of running anything.
#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<(Vec<PathBuf>, u8)>>>);

impl Recorder {
    fn calls(&self) -> Vec<(Vec<PathBuf>, u8)> {
        self.0.borrow().clone()
    }
}

impl Optimizer for Recorder {
    fn optimize(&self, paths: &[PathBuf], level: u8) -> io::Result<()> {
        self.0.borrow_mut().push((paths.to_vec(), level));
        Ok(())
    }
}

fn create_gradient(path: &Path, width: u32, height: u32) {
    let mut image = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let red = (255.0 * x as f32 / width as f32) as u8;
        let green = (255.0 * y as f32 / height as f32) as u8;
        *pixel = Rgba([red, green, 128, 255]);
    }
    image.save(path).expect("Failed to save gradient image");
}

fn create_solid(path: &Path, size: u32, color: Rgba<u8>) {
    RgbaImage::from_pixel(size, size, color)
        .save(path)
        .expect("Failed to save solid image");
}

/// Decode by content; Apple artwork files carry no extension.
fn open(path: &Path) -> DynamicImage {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
        .unwrap_or_else(|err| panic!("{}: {err}", path.display()))
}

fn setup() -> (TempDir, Generator, Recorder) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let recorder = Recorder::default();
    let generator = Generator::with_output(temp_dir.path().join("project"))
        .unwrap()
        .with_optimizer(recorder.clone());
    (temp_dir, generator, recorder)
}

#[test]
fn test_iphone_icons_end_to_end() {
    let (temp_dir, mut generator, recorder) = setup();
    let icon = temp_dir.path().join("icon.png");
    create_gradient(&icon, 1024, 1024);

    generator
        .set_platforms([Platform::Iphone])
        .set_orientations([Orientation::Portrait, Orientation::Landscape]);
    assert!(generator.icons(Some(&icon), None));

    let root = temp_dir.path().join("project");
    let assets = root.join("app/assets/iphone");
    let expected = [
        (root.join("iTunesConnect.png"), 1024),
        (assets.join("iTunesArtwork"), 512),
        (assets.join("iTunesArtwork@2x"), 1024),
        (assets.join("appicon-Small@2x.png"), 58),
        (assets.join("appicon-Small-40.png"), 40),
        (assets.join("appicon-Small-40@2x.png"), 80),
        (assets.join("appicon.png"), 57),
        (assets.join("appicon@2x.png"), 114),
        (assets.join("appicon-Small.png"), 29),
        (assets.join("appicon-Small@3x.png"), 87),
        (assets.join("appicon-60.png"), 60),
        (assets.join("appicon-60@2x.png"), 120),
        (assets.join("appicon-60@3x.png"), 180),
    ];

    for (path, size) in &expected {
        let image = open(path);
        assert_eq!((image.width(), image.height()), (*size, *size), "{}", path.display());
    }
    assert!(!assets.join("appicon-72.png").exists());
    assert!(!root.join("app/assets/android").exists());

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1, "optimizer runs once per operation");
    let expected_paths: Vec<PathBuf> = expected.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(calls[0].0, expected_paths);
    assert_eq!(calls[0].1, 2);
}

#[test]
fn test_rounding_uses_primary_icon_without_transparent_source() {
    let (temp_dir, mut generator, _) = setup();
    let icon = temp_dir.path().join("icon.png");
    create_solid(&icon, 256, Rgba([0, 0, 255, 255]));

    generator.set_platforms([Platform::Android]).set_radius(20).unwrap();
    let report = generator.generate_icons(Some(&icon), None).unwrap();
    assert_eq!(report.written.len(), 8);

    let assets = temp_dir.path().join("project/app/assets/android");
    let ldpi = open(&assets.join("images/res-ldpi/appicon.png")).to_rgba8();
    assert_eq!(ldpi.dimensions(), (36, 36));
    assert_eq!(ldpi.get_pixel(0, 0)[3], 0);
    assert_eq!(*ldpi.get_pixel(18, 18), Rgba([0, 0, 255, 255]));

    let store = open(&temp_dir.path().join("project/MarketplaceArtwork.png")).to_rgba8();
    assert_eq!(store.get_pixel(0, 0)[3], 0);

    // The 128px launcher icon is never rounded.
    let launcher = open(&assets.join("appicon.png")).to_rgba8();
    assert_eq!(launcher.get_pixel(0, 0)[3], 255);
}

#[test]
fn test_transparent_source_replaces_rounding() {
    let (temp_dir, mut generator, _) = setup();
    let icon = temp_dir.path().join("icon.png");
    let transparent = temp_dir.path().join("icon-transparent.png");
    create_solid(&icon, 256, Rgba([0, 0, 255, 255]));
    create_solid(&transparent, 256, Rgba([255, 0, 0, 255]));

    generator
        .set_platforms([Platform::Iphone, Platform::Android, Platform::Tizen])
        .set_radius(50)
        .unwrap();
    assert!(generator.icons(Some(&icon), Some(&transparent)));

    let root = temp_dir.path().join("project");
    let tizen = open(&root.join("app/assets/tizen/appicon.png")).to_rgba8();
    assert_eq!(*tizen.get_pixel(0, 0), Rgba([255, 0, 0, 255]));

    let xxxhdpi = open(&root.join("app/assets/android/images/res-xxxhdpi/appicon.png")).to_rgba8();
    assert_eq!(xxxhdpi.dimensions(), (192, 192));
    assert_eq!(*xxxhdpi.get_pixel(0, 0), Rgba([255, 0, 0, 255]));

    // Apple icons still come from the primary icon.
    let iphone = open(&root.join("app/assets/iphone/appicon.png")).to_rgba8();
    assert_eq!(*iphone.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
}

#[test]
fn test_no_compression_skips_optimizer() {
    let (temp_dir, mut generator, recorder) = setup();
    let icon = temp_dir.path().join("icon.png");
    create_gradient(&icon, 256, 256);

    generator
        .set_platforms([Platform::Mobileweb, Platform::Blackberry])
        .set_compression(CompressionTier::None);
    let report = generator.generate_icons(Some(&icon), None).unwrap();

    assert_eq!(report.png_batch.len(), 2);
    assert_eq!(report.optimizer_level, None);
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_splash_jpeg_entries_bypass_png_batch() {
    let (temp_dir, mut generator, recorder) = setup();
    let splash = temp_dir.path().join("splash.png");
    create_gradient(&splash, 512, 512);

    generator
        .set_platforms([Platform::Mobileweb, Platform::Blackberry])
        .set_compression(CompressionTier::High);
    let report = generator.generate_splash(Some(&splash)).unwrap();

    assert_eq!(report.written.len(), 8);
    assert_eq!(report.png_batch.len(), 5);
    assert!(report
        .png_batch
        .iter()
        .all(|p| p.extension().unwrap() == "png"));

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (report.png_batch.clone(), 3));

    let startup = temp_dir
        .path()
        .join("project/app/assets/mobileweb/apple_startup_images");
    let landscape = open(&startup.join("Default-Landscape.jpg"));
    assert_eq!((landscape.width(), landscape.height()), (748, 1024));
    let bytes = std::fs::read(startup.join("Default.jpg")).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let blackberry = open(
        &temp_dir
            .path()
            .join("project/app/assets/blackberry/splash-1024x600.png"),
    );
    assert_eq!((blackberry.width(), blackberry.height()), (1024, 600));
}

#[test]
fn test_localized_splash_goes_to_i18n() {
    let (temp_dir, mut generator, _) = setup();
    let splash = temp_dir.path().join("splash.png");
    create_gradient(&splash, 256, 256);

    generator
        .set_platforms([Platform::Iphone])
        .set_orientations([Orientation::Landscape])
        .set_language("fr")
        .unwrap();
    let report = generator.generate_splash(Some(&splash)).unwrap();

    let expected = temp_dir
        .path()
        .join("project/app/i18n/fr/Default-Landscape-736h@3x.png");
    assert_eq!(report.written, vec![expected.clone()]);
    let image = open(&expected);
    assert_eq!((image.width(), image.height()), (2208, 1242));
    assert!(!temp_dir.path().join("project/app/assets/iphone").exists());
}

#[test]
fn test_unreadable_source_fails_without_rollback() {
    let (temp_dir, mut generator, recorder) = setup();
    let icon = temp_dir.path().join("icon.png");
    let broken = temp_dir.path().join("broken.png");
    create_gradient(&icon, 128, 128);
    std::fs::write(&broken, b"not an image").unwrap();

    generator.set_platforms([Platform::Iphone, Platform::Tizen]);
    let err = generator
        .generate_icons(Some(&icon), Some(&broken))
        .unwrap_err();
    assert!(matches!(err, asset_gen::Error::SourceImage { .. }));

    // Apple icons written before the failure stay on disk.
    assert!(temp_dir
        .path()
        .join("project/app/assets/iphone/appicon.png")
        .exists());
    assert!(recorder.calls().is_empty());
    assert!(!generator.icons(None, None));
}
