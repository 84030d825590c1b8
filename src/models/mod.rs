pub mod config;

pub use config::{AppConfig, InstructionsConfig, PaletteConfig, PreviewConfig};
