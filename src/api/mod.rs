pub mod mosaic;
pub mod palettes;

pub use mosaic::{
    __path_handle_demo_image, __path_handle_instructions, __path_handle_mosaic,
    __path_handle_preview, __path_handle_shopping_list,
};
pub use mosaic::{
    handle_demo_image, handle_instructions, handle_mosaic, handle_preview, handle_shopping_list,
    InstructionsQuery, LegendEntry, MosaicQuery, MosaicResponse, PreviewQuery, ShoppingItem,
};
pub use palettes::{
    handle_palettes, CellBounds, PaletteInfo, PalettesResponse, SizeInfo, __path_handle_palettes,
};
