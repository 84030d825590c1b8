//! Mosaic construction: sizes, grids, counts and the build pipeline.

mod builder;
mod counts;
mod error;
mod grid;
mod size;

pub use builder::{Mosaic, MosaicBuilder};
pub use counts::ColorCounts;
pub use error::{BuildError, BuildWarning};
pub use grid::MosaicGrid;
pub use size::BaseplateSize;
