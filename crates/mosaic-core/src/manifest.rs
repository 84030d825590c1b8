//! Shopping list derived from color counts.

use std::io;

use serde::Serialize;

use crate::mosaic::ColorCounts;
use crate::palette::Palette;

/// One shopping list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingEntry {
    /// Color name
    pub name: String,
    /// Number of 1×1 pieces
    pub quantity: usize,
    /// Hex color from the palette, for the swatch
    pub swatch_hex: String,
}

/// A sorted shopping list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Rows, quantity descending
    pub entries: Vec<ShoppingEntry>,
    /// Counted names that were not found in the palette
    pub skipped: Vec<String>,
}

impl Manifest {
    /// Total number of pieces.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Write as CSV with a `Color Name,Quantity` header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(CSV_HEADER)?;
        for entry in &self.entries {
            wtr.serialize(CsvRow {
                name: &entry.name,
                quantity: entry.quantity,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render as CSV with a `Color Name,Quantity` header.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

const CSV_HEADER: [&str; 2] = ["Color Name", "Quantity"];

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    quantity: usize,
}

/// Build the shopping list for `counts` against `palette`.
///
/// Rows are sorted by quantity descending. The sort is stable, so equal
/// quantities keep first-seen order. Names missing from the palette are
/// logged and listed in [`Manifest::skipped`].
pub fn build_manifest(counts: &ColorCounts, palette: &Palette) -> Manifest {
    let mut manifest = Manifest::default();

    for (name, quantity) in counts.iter() {
        match palette.find(name) {
            Some(entry) => manifest.entries.push(ShoppingEntry {
                name: name.to_string(),
                quantity,
                swatch_hex: entry.hex.clone(),
            }),
            None => {
                tracing::warn!(
                    color = name,
                    palette = palette.id(),
                    "Color not in palette, skipped from shopping list"
                );
                manifest.skipped.push(name.to_string());
            }
        }
    }

    manifest.entries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts(items: &[(&str, usize)]) -> ColorCounts {
        let mut counts = ColorCounts::new();
        for &(name, n) in items {
            for _ in 0..n {
                counts.record(name);
            }
        }
        counts
    }

    #[test]
    fn test_sorted_descending_ties_first_seen() {
        let counts = counts(&[("Blue", 3), ("Red", 5), ("White", 3), ("Black", 1)]);
        let manifest = build_manifest(&counts, &Palette::fallback());
        let rows: Vec<_> = manifest
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.quantity))
            .collect();
        assert_eq!(
            rows,
            vec![("Red", 5), ("Blue", 3), ("White", 3), ("Black", 1)]
        );
        assert_eq!(manifest.total(), 12);
        assert!(manifest.skipped.is_empty());
    }

    #[test]
    fn test_unknown_names_skipped() {
        let counts = counts(&[("Red", 2), ("Mystery Mauve", 4)]);
        let manifest = build_manifest(&counts, &Palette::fallback());
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.entries[0].swatch_hex, "#C91A09");
        assert_eq!(manifest.skipped, vec!["Mystery Mauve".to_string()]);
        assert_eq!(manifest.total(), 2);
    }

    #[test]
    fn test_csv_export() {
        let counts = counts(&[("White", 1), ("Red", 2)]);
        let manifest = build_manifest(&counts, &Palette::fallback());
        assert_eq!(
            manifest.to_csv().unwrap(),
            "Color Name,Quantity\nRed,2\nWhite,1\n"
        );
    }

    #[test]
    fn test_csv_quotes_special_names() {
        let manifest = Manifest {
            entries: vec![
                ShoppingEntry {
                    name: "Pearl Gold, Metallic".to_string(),
                    quantity: 3,
                    swatch_hex: "#AA7F2E".to_string(),
                },
                ShoppingEntry {
                    name: "6\" Red".to_string(),
                    quantity: 1,
                    swatch_hex: "#C91A09".to_string(),
                },
            ],
            skipped: Vec::new(),
        };
        assert_eq!(
            manifest.to_csv().unwrap(),
            "Color Name,Quantity\n\"Pearl Gold, Metallic\",3\n\"6\"\" Red\",1\n"
        );
    }

    #[test]
    fn test_empty_manifest_csv_is_header_only() {
        assert_eq!(
            Manifest::default().to_csv().unwrap(),
            "Color Name,Quantity\n"
        );
    }
}
