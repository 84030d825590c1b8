//! Nearest-color matching against a palette.
//!
//! Matching is an unweighted Euclidean distance in RGB space with a plain
//! linear scan. Palettes hold at most a few hundred entries, and the scan
//! order defines the tie-break: the first entry at the minimum distance wins.

use std::sync::LazyLock;

use crate::palette::{PaletteEntry, Rgb};

static FALLBACK_ENTRY: LazyLock<PaletteEntry> =
    LazyLock::new(|| PaletteEntry::new("Black", Rgb::new(5, 19, 29)));

/// The entry returned when matching against an empty palette.
pub fn fallback_entry() -> &'static PaletteEntry {
    &FALLBACK_ENTRY
}

/// Find the palette entry closest to `color`.
///
/// Returns `(index, entry)`. For an empty palette the index is `None` and
/// the entry is the built-in black [`fallback_entry`]; callers should treat
/// that as a configuration problem to surface, not as a crash.
///
/// # Example
///
/// ```
/// use mosaic_core::{matcher, Palette, Rgb};
///
/// let palette = Palette::fallback();
/// let (idx, entry) = matcher::find_nearest(Rgb::new(250, 250, 250), palette.entries());
/// assert_eq!(idx, Some(1));
/// assert_eq!(entry.name, "White");
/// ```
pub fn find_nearest(color: Rgb, entries: &[PaletteEntry]) -> (Option<usize>, &PaletteEntry) {
    let mut best: Option<(usize, f64)> = None;

    for (i, entry) in entries.iter().enumerate() {
        let dist = color.distance(entry.rgb);
        // Strict less-than keeps the earliest entry on ties
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }

    match best {
        Some((i, _)) => (Some(i), &entries[i]),
        None => (None, fallback_entry()),
    }
}

/// Nearest palette entry for loosely typed channel values.
///
/// Non-finite or out-of-range channels make the whole triple black before
/// matching.
pub fn nearest(r: f64, g: f64, b: f64, entries: &[PaletteEntry]) -> &PaletteEntry {
    find_nearest(Rgb::from_channels(r, g, b), entries).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn entry(name: &str, r: u8, g: u8, b: u8) -> PaletteEntry {
        PaletteEntry::new(name, Rgb::new(r, g, b))
    }

    #[test]
    fn test_exact_match_has_zero_distance() {
        let palette = Palette::fallback();
        for (i, e) in palette.entries().iter().enumerate() {
            let (idx, found) = find_nearest(e.rgb, palette.entries());
            assert_eq!(idx, Some(i));
            assert_eq!(found.name, e.name);
        }
    }

    #[test]
    fn test_duplicate_colors_return_earliest() {
        let entries = vec![
            entry("Red", 200, 0, 0),
            entry("Black", 5, 19, 29),
            entry("Speckle Black-Copper", 5, 19, 29),
        ];
        let (idx, found) = find_nearest(Rgb::new(5, 19, 29), &entries);
        assert_eq!(idx, Some(1));
        assert_eq!(found.name, "Black");
    }

    #[test]
    fn test_equidistant_tie_goes_to_first() {
        // 100 is exactly between 0 and 200 on every channel
        let entries = vec![entry("Dark", 0, 0, 0), entry("Light", 200, 200, 200)];
        let found = nearest(100.0, 100.0, 100.0, &entries);
        assert_eq!(found.name, "Dark");

        let reversed = vec![entry("Light", 200, 200, 200), entry("Dark", 0, 0, 0)];
        let found = nearest(100.0, 100.0, 100.0, &reversed);
        assert_eq!(found.name, "Light");
    }

    #[test]
    fn test_empty_palette_returns_fallback() {
        let (idx, found) = find_nearest(Rgb::new(10, 10, 10), &[]);
        assert_eq!(idx, None);
        assert_eq!(found.name, "Black");
        assert_eq!(found.hex, "#05131D");
        assert_eq!(found.rgb, Rgb::new(5, 19, 29));
    }

    #[test]
    fn test_invalid_input_matches_as_black() {
        let entries = vec![entry("White", 255, 255, 255), entry("Black", 0, 0, 0)];
        assert_eq!(nearest(f64::NAN, 255.0, 255.0, &entries).name, "Black");
        assert_eq!(nearest(255.0, 255.0, 1000.0, &entries).name, "Black");
        assert_eq!(nearest(250.0, 250.0, 250.0, &entries).name, "White");
    }

    #[test]
    fn test_nearest_by_distance() {
        let palette = Palette::fallback();
        // Orange-ish red should land on Red, not Black or White
        let found = nearest(220.0, 60.0, 30.0, palette.entries());
        assert_eq!(found.name, "Red");
        let found = nearest(20.0, 100.0, 180.0, palette.entries());
        assert_eq!(found.name, "Blue");
    }
}
