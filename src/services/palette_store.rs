use std::collections::BTreeMap;
use std::sync::Arc;

use mosaic_core::{Palette, PaletteError, PaletteRecord, PaletteWarning};

use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::rendering::PreviewStyle;

/// A loaded palette with its display settings
#[derive(Debug, Clone)]
pub struct StoredPalette {
    pub palette: Arc<Palette>,
    pub label: String,
    pub preview_style: PreviewStyle,
    /// Data-quality problems found while loading
    pub warnings: Vec<PaletteWarning>,
}

/// All palettes, loaded once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct PaletteStore {
    palettes: BTreeMap<String, StoredPalette>,
    default_id: String,
}

impl PaletteStore {
    /// Load every palette named in `config`.
    ///
    /// A file that cannot be read or parsed yields an empty palette, so
    /// builds against it fall back to the built-in palette with a warning
    /// instead of failing the whole process.
    pub fn load(config: &AppConfig, loader: &AssetLoader) -> Self {
        let mut palettes = BTreeMap::new();

        for (id, palette_config) in &config.palettes {
            let loaded = loader
                .read_palette_string(&palette_config.file)
                .map_err(|e| PaletteError::Parse {
                    name: id.clone(),
                    message: e.to_string(),
                })
                .and_then(|content| Self::parse(id, &content));

            let (palette, warnings) = match loaded {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::error!(palette = %id, error = %e, "Failed to load palette");
                    (Palette::new(id.as_str(), Vec::new()), Vec::new())
                }
            };

            for warning in &warnings {
                tracing::warn!(palette = %id, "{warning}");
            }
            tracing::info!(
                palette = %id,
                file = %palette_config.file,
                colors = palette.len(),
                warnings = warnings.len(),
                "Loaded palette"
            );

            palettes.insert(
                id.clone(),
                StoredPalette {
                    palette: Arc::new(palette),
                    label: palette_config.label.clone(),
                    preview_style: palette_config.preview_style,
                    warnings,
                },
            );
        }

        let default_id = if palettes.contains_key(&config.default_palette) {
            config.default_palette.clone()
        } else {
            let fallback = palettes.keys().next().cloned().unwrap_or_default();
            tracing::warn!(
                configured = %config.default_palette,
                using = %fallback,
                "Default palette is not configured"
            );
            fallback
        };

        Self {
            palettes,
            default_id,
        }
    }

    /// Parse a palette document: a YAML list of `[name, hex, r, g, b]`.
    pub fn parse(
        id: &str,
        content: &str,
    ) -> Result<(Palette, Vec<PaletteWarning>), PaletteError> {
        let records: Vec<PaletteRecord> =
            serde_yaml::from_str(content).map_err(|e| PaletteError::Parse {
                name: id.to_string(),
                message: e.to_string(),
            })?;
        Ok(Palette::from_records(id, records))
    }

    /// Id used when a request does not name a palette
    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn get(&self, id: &str) -> Result<&StoredPalette, PaletteError> {
        self.palettes
            .get(id)
            .ok_or_else(|| PaletteError::UnknownPalette(id.to_string()))
    }

    /// Resolve an optional id to a stored palette, using the default when absent
    pub fn resolve(&self, id: Option<&str>) -> Result<&StoredPalette, PaletteError> {
        self.get(id.unwrap_or(self.default_id.as_str()))
    }

    pub fn palette(&self, id: &str) -> Result<Arc<Palette>, PaletteError> {
        self.get(id).map(|p| p.palette.clone())
    }

    /// Palettes in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredPalette)> {
        self.palettes.iter().map(|(id, p)| (id.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaletteConfig;

    fn embedded_store() -> PaletteStore {
        PaletteStore::load(&AppConfig::default(), &AssetLoader::default())
    }

    #[test]
    fn test_embedded_palettes_load_cleanly() {
        let store = embedded_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.default_id(), "square");

        for (id, stored) in store.iter() {
            assert!(!stored.palette.is_empty(), "{id} is empty");
            assert!(stored.warnings.is_empty(), "{id}: {:?}", stored.warnings);
        }

        let all = store.get("all").unwrap();
        assert_eq!(all.palette.len(), 227);
        assert_eq!(store.get("round").unwrap().preview_style, PreviewStyle::Round);
    }

    #[test]
    fn test_all_palette_keeps_duplicate_rgb_in_order() {
        let store = embedded_store();
        let all = store.palette("all").unwrap();
        let black = all.entries().iter().position(|e| e.name == "Black").unwrap();
        let copper = all
            .entries()
            .iter()
            .position(|e| e.name == "Speckle Black-Copper")
            .unwrap();
        assert!(black < copper);
        assert_eq!(all.entries()[black].rgb, all.entries()[copper].rgb);
    }

    #[test]
    fn test_unknown_palette() {
        let store = embedded_store();
        assert!(matches!(
            store.get("mauve"),
            Err(PaletteError::UnknownPalette(id)) if id == "mauve"
        ));
        assert_eq!(store.resolve(None).unwrap().palette.id(), "square");
    }

    #[test]
    fn test_parse_reports_warnings() {
        let yaml = r##"
- ["Red", "#C91A09", 201, 26, 9]
- ["Odd", "#000000", 1, 2, 3]
- ["Red", "#C91A09", 201, 26, 9]
"##;
        let (palette, warnings) = PaletteStore::parse("p", yaml).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_parse_error() {
        let result = PaletteStore::parse("p", "{not: a list}");
        assert!(matches!(result, Err(PaletteError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_loads_empty_palette() {
        let mut config = AppConfig::default();
        config.palettes.insert(
            "ghost".to_string(),
            PaletteConfig {
                file: "ghost.yaml".to_string(),
                label: "Ghost".to_string(),
                preview_style: PreviewStyle::Square,
            },
        );
        config.default_palette = "nonexistent".to_string();

        let store = PaletteStore::load(&config, &AssetLoader::default());
        assert!(store.get("ghost").unwrap().palette.is_empty());
        // Falls back to the first id in order
        assert_eq!(store.default_id(), "all");
    }
}
