pub mod canvas;
pub mod instructions;
pub mod preview;
pub mod renderer;
pub mod text;

pub use canvas::{encode_png, pixel_rgb};
pub use instructions::{legend_height, legend_items, LegendItem};
pub use preview::PreviewStyle;
pub use renderer::{MosaicRenderer, MAX_CELL, MIN_INSTRUCTION_CELL};
