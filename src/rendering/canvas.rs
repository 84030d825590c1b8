//! Pixmap drawing primitives and PNG encoding.
//!
//! All fills are opaque and drawn without anti-aliasing on integer pixel
//! boundaries, so a filled cell covers exactly its pixels.

use std::io::Cursor;

use mosaic_core::Rgb;
use resvg::tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::error::RenderError;

/// Allocate a pixmap filled with `background`.
pub fn new_pixmap(width: u32, height: u32, background: Rgb) -> Result<Pixmap, RenderError> {
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
    pixmap.fill(resvg::tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        255,
    ));
    Ok(pixmap)
}

fn solid_paint(color: Rgb, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = anti_alias;
    paint
}

/// Fill an axis-aligned rectangle. Empty rectangles are ignored.
pub fn fill_rect(pixmap: &mut Pixmap, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
    if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
        pixmap.fill_rect(rect, &solid_paint(color, false), Transform::identity(), None);
    }
}

/// Fill a rectangle with a 1px border of `border` around a `fill` interior.
pub fn outlined_rect(
    pixmap: &mut Pixmap,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    fill: Rgb,
    border: Rgb,
) {
    fill_rect(pixmap, x, y, width, height, border);
    if width > 2 && height > 2 {
        fill_rect(pixmap, x + 1, y + 1, width - 2, height - 2, fill);
    }
}

/// Fill an anti-aliased circle.
pub fn fill_circle(pixmap: &mut Pixmap, cx: f32, cy: f32, radius: f32, color: Rgb) {
    if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
        pixmap.fill_path(
            &path,
            &solid_paint(color, true),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Read back the color at `(x, y)`.
pub fn pixel_rgb(pixmap: &Pixmap, x: u32, y: u32) -> Option<Rgb> {
    let c = pixmap.pixel(x, y)?.demultiply();
    Some(Rgb::new(c.red(), c.green(), c.blue()))
}

/// Encode a pixmap as an 8-bit RGB PNG.
///
/// Alpha is discarded; every pixmap produced here is fully opaque.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    let rgb: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue()]
        })
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
