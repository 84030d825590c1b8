//! Asset loading with embedded fallbacks
//!
//! Palettes, the label font and the default config are compiled into the
//! binary. Each category can be overridden from the filesystem:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set and path is empty/missing: seed with embedded assets, then use filesystem
//! - If an env var IS set and path has files: use filesystem with embedded fallback

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded palette data files
#[derive(RustEmbed)]
#[folder = "palettes/"]
#[include = "*.yaml"]
struct EmbeddedPalettes;

/// Embedded font assets
#[derive(RustEmbed)]
#[folder = "fonts/"]
#[include = "*.ttf"]
struct EmbeddedFonts;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Report of seeding operations
#[derive(Debug, Default)]
pub struct SeedReport {
    pub palettes_seeded: Vec<String>,
    pub config_seeded: bool,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.palettes_seeded.is_empty() && !self.config_seeded
    }
}

/// Asset loader with merge behavior and optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External palettes directory (from PALETTES_DIR env var)
    palettes_dir: Option<PathBuf>,
    /// External fonts directory (from FONTS_DIR env var)
    fonts_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(
        palettes_dir: Option<PathBuf>,
        fonts_dir: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> Self {
        Self {
            palettes_dir,
            fonts_dir,
            config_file,
        }
    }

    /// Create a loader from `PALETTES_DIR`, `FONTS_DIR` and `CONFIG_FILE`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("PALETTES_DIR").ok().map(PathBuf::from),
            std::env::var("FONTS_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    pub fn palettes_dir(&self) -> Option<&Path> {
        self.palettes_dir.as_deref()
    }

    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read a palette data file
    ///
    /// If an external path is configured, tries filesystem first, then falls back to embedded.
    pub fn read_palette(&self, file: &str) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref dir) = self.palettes_dir {
            let full_path = dir.join(file);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading palette from filesystem");
                return Ok(Cow::Owned(fs::read(&full_path)?));
            }
        }

        EmbeddedPalettes::get(file)
            .map(|f| {
                tracing::trace!(file, "Loading palette from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("Palette not found: {file}"))
            })
    }

    /// Read a palette data file as a UTF-8 string
    pub fn read_palette_string(&self, file: &str) -> io::Result<String> {
        let bytes = self.read_palette(file)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// List all available palette files (merged view of embedded + external)
    pub fn list_palettes(&self) -> Vec<String> {
        let mut files: BTreeSet<String> =
            EmbeddedPalettes::iter().map(|s| s.to_string()).collect();

        if let Some(ref dir) = self.palettes_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        if name.ends_with(".yaml") {
                            files.insert(name.to_string());
                        }
                    }
                }
            }
        }

        files.into_iter().collect()
    }

    /// Get all font data (for loading into fontdb)
    ///
    /// Fonts in `FONTS_DIR` come first; embedded fonts with the same file
    /// name are skipped.
    pub fn get_fonts(&self) -> Vec<(String, Vec<u8>)> {
        let mut fonts = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(ref dir) = self.fonts_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if let Some(ext) = path.extension() {
                        if matches!(ext.to_str(), Some("ttf" | "otf" | "ttc")) {
                            if let Ok(data) = fs::read(&path) {
                                let name = entry.file_name().to_string_lossy().to_string();
                                tracing::trace!(font = %name, "Loading font from filesystem");
                                seen.insert(name.clone());
                                fonts.push((name, data));
                            }
                        }
                    }
                }
            }
        }

        for file in EmbeddedFonts::iter() {
            let name = file.to_string();
            if !seen.contains(&name) {
                if let Some(data) = EmbeddedFonts::get(&name) {
                    tracing::trace!(font = %name, "Loading font from embedded assets");
                    fonts.push((name, data.data.into_owned()));
                }
            }
        }

        fonts
    }

    /// List embedded font files (for display)
    pub fn list_embedded_fonts() -> Vec<String> {
        EmbeddedFonts::iter().map(|s| s.to_string()).collect()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Check if a directory exists and is empty (ignoring .gitkeep)
    fn is_empty_dir(path: &Path) -> bool {
        if !path.is_dir() {
            return false;
        }
        path.read_dir()
            .map(|mut entries| {
                entries.all(|e| {
                    e.map(|entry| entry.file_name() == ".gitkeep")
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }

    /// Seed empty/missing locations with embedded assets
    ///
    /// Only operates on paths that were configured (env var was set).
    pub fn seed_if_configured(&self) -> io::Result<SeedReport> {
        let mut report = SeedReport::default();

        if let Some(ref dir) = self.palettes_dir {
            if !dir.exists() || Self::is_empty_dir(dir) {
                fs::create_dir_all(dir)?;
                for file in EmbeddedPalettes::iter() {
                    if let Some(data) = EmbeddedPalettes::get(&file) {
                        fs::write(dir.join(file.as_ref()), &*data.data)?;
                        report.palettes_seeded.push(file.to_string());
                    }
                }
                tracing::info!(
                    dir = %dir.display(),
                    count = report.palettes_seeded.len(),
                    "Seeded palettes directory with embedded assets"
                );
            }
        }

        if let Some(ref path) = self.config_file {
            if !path.exists() {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                if let Some(data) = EmbeddedConfig::get("config.yaml") {
                    fs::write(path, &*data.data)?;
                    report.config_seeded = true;
                    tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                }
            }
        }

        Ok(report)
    }

    /// List embedded palette files (for display)
    pub fn list_embedded_palettes() -> Vec<String> {
        EmbeddedPalettes::iter().map(|s| s.to_string()).collect()
    }
}
