pub mod mosaic_service;
pub mod palette_store;
pub mod studio;

pub use mosaic_service::MosaicService;
pub use palette_store::{PaletteStore, StoredPalette};
pub use studio::{Studio, StudioError};
