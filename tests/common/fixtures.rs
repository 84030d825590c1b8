//! Test fixtures: encoded images to upload.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).expect("Failed to encode fixture");
    buf.into_inner()
}

/// PNG of a single solid color
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color))),
        ImageFormat::Png,
    )
}

/// Pure red (#FF0000) square
pub fn red_png() -> Vec<u8> {
    solid_png(100, 100, [255, 0, 0])
}

/// Fully transparent RGBA image
pub fn transparent_png() -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 0]))),
        ImageFormat::Png,
    )
}

/// Left half black, right half white
pub fn split_png() -> Vec<u8> {
    let image = RgbImage::from_fn(64, 64, |x, _| {
        if x < 32 {
            Rgb([5, 19, 29])
        } else {
            Rgb([255, 255, 255])
        }
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

/// The built-in demo gradient as PNG
pub fn demo_png() -> Vec<u8> {
    encode(mosaic_core::demo_image(), ImageFormat::Png)
}

/// Bytes that no decoder accepts
pub const GARBAGE: &[u8] = b"this is not an image at all";
