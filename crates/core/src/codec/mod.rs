//! Decoders for the asset kinds the caches hold.

pub mod font;
pub mod properties;
pub mod raster;

pub use font::{FontdueDecoder, FontdueProgram};
pub use properties::{StringTable, decode_text, parse_properties};
pub use raster::ImageDecoder;
