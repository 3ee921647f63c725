// Library exports for testing and reuse

pub mod cli;
pub mod drivers;
pub mod error;
pub mod georef;
pub mod io;
pub mod report;
pub mod tiling;
pub mod transform;

// Re-export commonly used types
pub use error::{RasterError, Result};
pub use georef::GeorefPolicy;
pub use io::RasterMetadata;
pub use report::{print_raster_information, read_report, RasterReport};
pub use tiling::{Tile, TileGrid};
pub use transform::{process_image, process_image_with, Identity, TileTransform, TransformOptions};
