//! Built-in demo image.

use image::{DynamicImage, Rgb, RgbImage};

/// Width and height of the demo image.
pub const DEMO_SIZE: u32 = 300;

/// A 300×300 diagonal gradient: red grows left to right, green top to
/// bottom, blue fades towards the bottom-right corner.
pub fn demo_image() -> DynamicImage {
    let n = DEMO_SIZE as f64;
    let image = RgbImage::from_fn(DEMO_SIZE, DEMO_SIZE, |x, y| {
        let (x, y) = (x as f64, y as f64);
        let r = 255.0 * x / n;
        let g = 255.0 * y / n;
        let b = 255.0 * (1.0 - (x + y) / (2.0 * n));
        Rgb([r as u8, g as u8, b as u8])
    });
    DynamicImage::ImageRgb8(image)
}
