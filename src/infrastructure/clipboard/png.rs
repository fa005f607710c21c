//! RGBA <-> PNG transcoding for clipboards that exchange raw pixels

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, RgbaImage};

use crate::application::ports::ClipboardError;

/// Raw RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaPixels {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

/// Encode RGBA pixels as PNG
pub fn encode_png(pixels: &RgbaPixels) -> Result<Vec<u8>, ClipboardError> {
    let width = u32::try_from(pixels.width)
        .map_err(|_| ClipboardError::Encoding(format!("image width {} too large", pixels.width)))?;
    let height = u32::try_from(pixels.height).map_err(|_| {
        ClipboardError::Encoding(format!("image height {} too large", pixels.height))
    })?;

    let buffer: RgbaImage = ImageBuffer::from_raw(width, height, pixels.bytes.clone())
        .ok_or_else(|| {
            ClipboardError::Encoding(format!(
                "{} bytes do not fit a {}x{} RGBA image",
                pixels.bytes.len(),
                width,
                height
            ))
        })?;

    let mut png = Vec::new();
    buffer
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ClipboardError::Encoding(e.to_string()))?;

    Ok(png)
}

/// Decode PNG bytes to RGBA pixels
pub fn decode_png(png: &[u8]) -> Result<RgbaPixels, ClipboardError> {
    let image = image::load_from_memory_with_format(png, ImageFormat::Png)
        .map_err(|e| ClipboardError::Encoding(e.to_string()))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(RgbaPixels {
        width: width as usize,
        height: height as usize,
        bytes: rgba.into_raw(),
    })
}
