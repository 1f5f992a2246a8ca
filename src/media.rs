//! Media classification and crop execution for still images.

use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Unknown,
}

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "flv", "wmv", "webm", "m4v", "mpg", "mpeg", "3gp", "ogv", "ts",
    "mts", "m2ts",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "wma", "m4a", "opus", "aiff", "au", "ra", "amr", "ac3",
];

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "svg", "ico", "psd", "raw", "cr2",
    "nef", "dng",
];

impl MediaKind {
    /// Classify an extension, with or without its leading dot.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Audio
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else {
            MediaKind::Unknown
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(MediaKind::Unknown, Self::from_extension)
    }
}

/// Open a still image, refusing anything that is not classified as one.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    match MediaKind::from_path(path) {
        MediaKind::Image => Ok(image::open(path)?),
        kind => Err(Error::UnsupportedMedia(format!(
            "{} ({:?})",
            path.display(),
            kind
        ))),
    }
}

/// Drop the last row/column of an odd-sized crop. Encoders such as H.264
/// reject odd frame sizes. A one-pixel side is left alone.
pub fn even_dimensions(rect: Rect) -> Rect {
    let width = if rect.width % 2 == 1 && rect.width > 1 {
        rect.width - 1
    } else {
        rect.width
    };
    let height = if rect.height % 2 == 1 && rect.height > 1 {
        rect.height - 1
    } else {
        rect.height
    };
    Rect::new(rect.x, rect.y, width, height)
}

/// Clip a media-space rectangle to a `width` x `height` image.
pub fn clamp_to_media(rect: Rect, width: u32, height: u32) -> Result<Rect> {
    let (w, h) = (width as i64, height as i64);
    let x0 = (rect.left() as i64).clamp(0, w);
    let y0 = (rect.top() as i64).clamp(0, h);
    let x1 = (rect.right() as i64).clamp(0, w);
    let y1 = (rect.bottom() as i64).clamp(0, h);
    if x1 <= x0 || y1 <= y0 {
        return Err(Error::EmptyCrop { width, height });
    }
    Ok(Rect::new(
        x0 as i32,
        y0 as i32,
        (x1 - x0) as i32,
        (y1 - y0) as i32,
    ))
}

/// Crop `image` to a media-space rectangle, clipped to the image.
pub fn crop_image(image: &DynamicImage, rect: Rect) -> Result<DynamicImage> {
    let r = clamp_to_media(rect, image.width(), image.height())?;
    Ok(image.crop_imm(r.x as u32, r.y as u32, r.width as u32, r.height as u32))
}

/// Crop and write to `output`; the format follows the output extension.
/// Returns the rectangle actually written.
pub fn save_cropped(
    image: &DynamicImage,
    rect: Rect,
    even: bool,
    output: &Path,
) -> Result<Rect> {
    let mut r = clamp_to_media(rect, image.width(), image.height())?;
    if even {
        r = even_dimensions(r);
    }
    let cropped = image.crop_imm(r.x as u32, r.y as u32, r.width as u32, r.height as u32);
    cropped.save(output)?;
    tracing::info!(path = %output.display(), ?r, "saved cropped image");
    Ok(r)
}
