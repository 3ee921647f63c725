use gdal::errors::GdalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalError),

    #[error("Tile shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Unknown output format: {0} (driver not registered)")]
    UnknownFormat(String),

    #[error("File {path} cannot be opened: {source}")]
    SourceOpenFailed {
        path: String,
        #[source]
        source: GdalError,
    },

    #[error("No raster bands found in {0}")]
    NoBandsFound(String),

    #[error("Failed to create output raster {path}: {source}")]
    DestinationCreateFailed {
        path: String,
        #[source]
        source: GdalError,
    },

    #[error("Invalid block size: {0} (must be positive)")]
    InvalidBlockSize(usize),

    #[error("Failed to copy georeferencing to output: {0}")]
    GeorefPropagation(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;
