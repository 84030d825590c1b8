use crate::assets::AssetLoader;
use crate::rendering::PreviewStyle;
use mosaic_core::ResampleFilter;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Palette used when a request does not name one
    #[serde(default = "default_palette")]
    pub default_palette: String,

    /// Palette definitions keyed by id
    #[serde(default = "default_palettes")]
    pub palettes: BTreeMap<String, PaletteConfig>,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub instructions: InstructionsConfig,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Resample filters in preference order
    #[serde(default = "default_resample_filters")]
    pub resample_filters: Vec<ResampleFilter>,
}

fn default_palette() -> String {
    "square".to_string()
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_resample_filters() -> Vec<ResampleFilter> {
    ResampleFilter::PREFERENCE.to_vec()
}

fn default_palettes() -> BTreeMap<String, PaletteConfig> {
    [
        ("square", "square.yaml", "Square 1x1 plates", PreviewStyle::Square),
        ("round", "round.yaml", "Round 1x1 plates", PreviewStyle::Round),
        ("all", "all.yaml", "All colors", PreviewStyle::Square),
    ]
    .into_iter()
    .map(|(id, file, label, preview_style)| {
        (
            id.to_string(),
            PaletteConfig {
                file: file.to_string(),
                label: label.to_string(),
                preview_style,
            },
        )
    })
    .collect()
}

/// Configuration for one palette
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Data file name (relative to the palettes directory)
    pub file: String,

    /// Human-readable name
    #[serde(default)]
    pub label: String,

    /// How previews built from this palette are drawn by default
    #[serde(default)]
    pub preview_style: PreviewStyle,
}

/// Preview rendering settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PreviewConfig {
    pub default_cell: u32,
    pub min_cell: u32,
    pub max_cell: u32,
    /// Draw a thin outline around each cell
    pub outline: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_cell: 10,
            min_cell: 5,
            max_cell: 20,
            outline: false,
        }
    }
}

impl PreviewConfig {
    /// True if `cell` lies within the configured bounds.
    pub fn accepts(&self, cell: u32) -> bool {
        (self.min_cell..=self.max_cell).contains(&cell)
    }
}

/// Instruction sheet settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct InstructionsConfig {
    pub cell: u32,
    pub min_cell: u32,
    pub max_cell: u32,
}

impl Default for InstructionsConfig {
    fn default() -> Self {
        Self {
            cell: 24,
            min_cell: 8,
            max_cell: 32,
        }
    }
}

impl InstructionsConfig {
    /// True if `cell` lies within the configured bounds.
    pub fn accepts(&self, cell: u32) -> bool {
        (self.min_cell..=self.max_cell).contains(&cell)
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::from_yaml(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration, falling back to defaults on error
    pub fn from_yaml(content: &str) -> Self {
        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::info!(
                    palettes = config.palettes.len(),
                    default_palette = %config.default_palette,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_palette: default_palette(),
            palettes: default_palettes(),
            preview: PreviewConfig::default(),
            instructions: InstructionsConfig::default(),
            max_upload_bytes: default_max_upload_bytes(),
            resample_filters: default_resample_filters(),
        }
    }
}
