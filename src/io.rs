use crate::error::{RasterError, Result};
use crate::tiling::Tile;
use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, Driver, GeoTransform};
use log::{debug, info};
use std::path::Path;

/// What GDAL reports for a dataset that carries no geotransform
pub const DEFAULT_GEOTRANSFORM: GeoTransform = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub geotransform: GeoTransform,
    pub projection: String,
}

impl RasterMetadata {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let (width, height) = dataset.raster_size();
        let band_count = dataset.raster_count() as usize;

        let geotransform = dataset.geo_transform().unwrap_or_else(|e| {
            debug!("Dataset has no geotransform ({}), using default", e);
            DEFAULT_GEOTRANSFORM
        });

        Self {
            width,
            height,
            band_count,
            geotransform,
            projection: dataset.projection(),
        }
    }
}

/// Open a raster read-only
pub fn open_source(path: &Path) -> Result<Dataset> {
    info!("Opening input raster: {}", path.display());
    Dataset::open(path).map_err(|source| RasterError::SourceOpenFailed {
        path: path.display().to_string(),
        source,
    })
}

/// Ordered band indices `1..=band_count`, as used for multi-band reads
pub fn band_map(band_count: usize) -> Vec<usize> {
    (1..=band_count).collect()
}

/// Create the single-band, 8-bit output raster with the source's extent.
pub fn create_destination(
    driver: &Driver,
    path: &Path,
    metadata: &RasterMetadata,
) -> Result<Dataset> {
    info!(
        "Creating output raster: {} ({}, {}x{}x1)",
        path.display(),
        driver.short_name(),
        metadata.width,
        metadata.height
    );

    driver
        .create_with_band_type::<u8, _>(path, metadata.width, metadata.height, 1)
        .map_err(|source| RasterError::DestinationCreateFailed {
            path: path.display().to_string(),
            source,
        })
}

/// Read every band listed in `bands` for one tile into `buffer`.
///
/// The buffer is resized to `tile.pixel_count() * bands.len()` and filled
/// band-sequentially: all rows of the first band, then the next band. GDAL
/// converts the source pixel type to `T` during the read.
pub fn read_tile<T: Copy + GdalType + Default>(
    dataset: &Dataset,
    bands: &[usize],
    tile: &Tile,
    buffer: &mut Vec<T>,
) -> Result<()> {
    let plane = tile.pixel_count();
    buffer.resize(plane * bands.len(), T::default());

    for (slot, &band_index) in bands.iter().enumerate() {
        let band = dataset.rasterband(band_index)?;
        band.read_into_slice::<T>(
            tile.window(),
            tile.window_size(),
            tile.window_size(),
            &mut buffer[slot * plane..(slot + 1) * plane],
            None,
        )?;
    }

    Ok(())
}

/// Write `data` (row-major, exactly one tile) into band 1 of `dataset`.
///
/// The vector is handed to GDAL and returned afterwards so its allocation
/// is reused for the next tile.
pub fn write_tile<T: Copy + GdalType>(
    dataset: &Dataset,
    tile: &Tile,
    data: &mut Vec<T>,
) -> Result<()> {
    debug_assert_eq!(data.len(), tile.pixel_count());

    let mut band = dataset.rasterband(1)?;
    let mut buffer = Buffer::new(tile.window_size(), std::mem::take(data));
    let written = band.write(tile.window(), tile.window_size(), &mut buffer);
    *data = buffer.into_shape_and_vec().1;
    written?;

    Ok(())
}
