//! Resizes a master image into a single catalog entry and writes it to disk.

use crate::catalog::SizeEntry;
use crate::config::CompressionTier;
use crate::error::{Error, Result};
use image::{
    codecs::jpeg::{JpegEncoder, PixelDensity},
    imageops::FilterType,
    io::Reader as ImageReader,
    ColorType, DynamicImage, ImageBuffer, ImageError, Rgba, RgbaImage,
};
use std::{
    f32::consts::PI,
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, info};

const INCHES_PER_METER: f64 = 39.370_078_7;

/// Format an entry was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Png,
    Jpeg { quality: u8 },
}

/// Decode a master image. Only pixels survive; embedded metadata is dropped.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|source| Error::SourceImage {
            path: path.to_path_buf(),
            source,
        })
}

/// Corner radius in pixels for a radius given as a percentage of `width`.
pub fn corner_radius(width: u32, percent: u8) -> u32 {
    (f64::from(width) * f64::from(percent) / 100.0).round() as u32
}

/// Write an icon entry as PNG, rounding its corners when the entry allows it
/// and `radius_percent` is non-zero.
pub fn render_icon(
    source: &DynamicImage,
    entry: &SizeEntry,
    path: &Path,
    radius_percent: u8,
) -> Result<()> {
    ensure_parent(path)?;

    let mut resized = cover(source, entry.width, entry.height);

    if entry.rounded && radius_percent > 0 {
        let radius = corner_radius(entry.width, radius_percent);
        debug!(radius, path = %path.display(), "rounding corners");
        resized = round_corners(&resized, radius);
    }

    write_png(&resized, path, entry.dpi)?;
    info!("✓ Generated {}", path.display());
    Ok(())
}

/// Write a splash entry. `.jpg` entries are encoded as JPEG at the quality of
/// `compression`; everything else becomes PNG.
pub fn render_splash(
    source: &DynamicImage,
    entry: &SizeEntry,
    path: &Path,
    compression: CompressionTier,
) -> Result<Encoding> {
    ensure_parent(path)?;

    let rotated;
    let source = match entry.rotate {
        Some(degrees) => {
            rotated = rotate(source, degrees);
            &rotated
        }
        None => source,
    };

    let resized = cover(source, entry.width, entry.height);

    let encoding = if entry.is_jpeg() {
        let quality = compression.jpeg_quality();
        write_jpeg(&resized, path, entry.dpi, quality)?;
        Encoding::Jpeg { quality }
    } else {
        write_png(&resized, path, entry.dpi)?;
        Encoding::Png
    };

    info!("✓ Generated {}", path.display());
    Ok(encoding)
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            create_dir_all(parent).map_err(|source| Error::io(parent, source))
        }
        _ => Ok(()),
    }
}

/// Scale `image` until it covers `width`×`height`, then crop the overflow
/// evenly from both sides.
pub fn cover(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    image.resize_to_fill(width, height, FilterType::Lanczos3)
}

/// Mask the corners of `image` with quarter ellipses of `radius` pixels on
/// both axes, anti-aliased over one pixel.
pub fn round_corners(image: &DynamicImage, radius: u32) -> DynamicImage {
    let mut rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let radius = radius.min(width / 2).min(height / 2) as f32;
    if radius <= 0.0 {
        return DynamicImage::ImageRgba8(rgba);
    }

    let right = width as f32 - radius;
    let bottom = height as f32 - radius;

    for (x, y, pixel) in rgba.enumerate_pixels_mut() {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;

        let cx = if px < radius {
            radius
        } else if px > right {
            right
        } else {
            continue;
        };
        let cy = if py < radius {
            radius
        } else if py > bottom {
            bottom
        } else {
            continue;
        };

        let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        pixel[3] = (pixel[3] as f32 * coverage).round() as u8;
    }

    DynamicImage::ImageRgba8(rgba)
}

/// Rotate clockwise by `degrees`. Quarter turns are exact; other angles land
/// on an enlarged canvas with a transparent background.
pub fn rotate(image: &DynamicImage, degrees: u16) -> DynamicImage {
    match degrees % 360 {
        0 => image.clone(),
        90 => image.rotate90(),
        180 => image.rotate180(),
        270 => image.rotate270(),
        other => DynamicImage::ImageRgba8(rotate_free(&image.to_rgba8(), f32::from(other))),
    }
}

fn rotate_free(source: &RgbaImage, angle_degrees: f32) -> RgbaImage {
    let angle = angle_degrees * PI / 180.0;
    let (sin, cos) = angle.sin_cos();
    let (width, height) = (source.width() as f32, source.height() as f32);

    let out_width = (width * cos.abs() + height * sin.abs()).ceil() as u32;
    let out_height = (width * sin.abs() + height * cos.abs()).ceil() as u32;
    let (out_cx, out_cy) = (out_width as f32 / 2.0, out_height as f32 / 2.0);
    let (src_cx, src_cy) = (width / 2.0, height / 2.0);

    ImageBuffer::from_fn(out_width, out_height, |x, y| {
        let dx = x as f32 + 0.5 - out_cx;
        let dy = y as f32 + 0.5 - out_cy;

        // Inverse rotation back into the source frame.
        let sx = dx * cos + dy * sin + src_cx;
        let sy = -dx * sin + dy * cos + src_cy;

        if sx >= 0.0 && sy >= 0.0 && sx < width && sy < height {
            *source.get_pixel(sx as u32, sy as u32)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn pixels_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) * INCHES_PER_METER).round() as u32
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Encode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// Encoded through the png crate directly so the pHYs chunk carries the DPI.
fn write_png(image: &DynamicImage, path: &Path, dpi: u32) -> Result<()> {
    let rgba = image.to_rgba8();
    let file = File::create(path).map_err(|source| Error::io(path, source))?;
    let mut out = BufWriter::new(file);

    let ppm = pixels_per_meter(dpi);
    let mut encoder = png::Encoder::new(&mut out, rgba.width(), rgba.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|err| encode_error(path, err))?;
    writer
        .write_image_data(rgba.as_raw())
        .map_err(|err| encode_error(path, err))?;
    writer.finish().map_err(|err| encode_error(path, err))?;

    out.flush().map_err(|source| Error::io(path, source))
}

fn write_jpeg(image: &DynamicImage, path: &Path, dpi: u32, quality: u8) -> Result<()> {
    let rgb = image.to_rgb8();
    let file = File::create(path).map_err(|source| Error::io(path, source))?;
    let mut out = BufWriter::new(file);

    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder.set_pixel_density(PixelDensity::dpi(u16::try_from(dpi).unwrap_or(u16::MAX)));
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|err| encode_error(path, err))?;

    out.flush().map_err(|source| Error::io(path, source))
}
