// SPDX-License-Identifier: MPL-2.0
//! Image probing and inline thumbnail encoding.
//!
//! Rendered pages embed every preview as a base64 `data:` URI so the
//! document is self-contained and needs no file server. Thumbnails are
//! bounded to a maximum box while preserving aspect ratio.

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Checks whether a file is openable as an image.
///
/// Only the header is inspected; the pixel data is not decoded. Any file
/// that cannot be read or whose format is not recognized counts as not
/// openable, never as an error.
pub fn is_openable(path: &Path) -> bool {
    ImageReader::open(path)
        .ok()
        .and_then(|reader| reader.with_guessed_format().ok())
        .map(|reader| reader.into_dimensions().is_ok())
        .unwrap_or(false)
}

/// Decodes an image, bounds it to `bound`×`bound` preserving aspect ratio,
/// and returns it as an inline `data:` URI.
pub fn thumbnail_data_uri(path: &Path, bound: u32) -> Result<String> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let thumb = img.thumbnail(bound, bound);
    let (bytes, kind) = encode_thumbnail(&thumb)?;
    Ok(format!("data:image/{};base64,{}", kind, STANDARD.encode(bytes)))
}

/// Encodes a thumbnail as JPEG, or PNG when the image carries an alpha
/// channel (JPEG cannot represent it).
fn encode_thumbnail(img: &DynamicImage) -> Result<(Vec<u8>, &'static str)> {
    let mut cursor = Cursor::new(Vec::new());
    if img.color().has_alpha() {
        img.write_to(&mut cursor, ImageFormat::Png)?;
        Ok((cursor.into_inner(), "png"))
    } else {
        img.write_to(&mut cursor, ImageFormat::Jpeg)?;
        Ok((cursor.into_inner(), "jpeg"))
    }
}
