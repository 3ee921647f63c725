use crate::drivers::driver_by_name;
use crate::error::{RasterError, Result};
use crate::georef::{propagate_georeference, GeorefPolicy};
use crate::io::{self, RasterMetadata};
use crate::tiling::{Tile, TileGrid};
use log::{debug, info};
use ndarray::{ArrayView3, ArrayViewMut2, Axis};
use std::path::Path;

pub const DEFAULT_BLOCK_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub block_size: usize,
    pub georef_policy: GeorefPolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            georef_policy: GeorefPolicy::default(),
        }
    }
}

/// Per-tile processing step of the block loop.
///
/// `src` holds every source band of the tile as `(band, row, col)`; `dst`
/// is the single output band as `(row, col)`. Both have the tile's clipped
/// extent. `dst` contains stale data from the previous tile and must be
/// fully overwritten.
pub trait TileTransform {
    fn apply(&mut self, tile: &Tile, src: ArrayView3<'_, u8>, dst: ArrayViewMut2<'_, u8>);
}

/// Passes band 1 through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl TileTransform for Identity {
    fn apply(&mut self, _tile: &Tile, src: ArrayView3<'_, u8>, mut dst: ArrayViewMut2<'_, u8>) {
        dst.assign(&src.index_axis(Axis(0), 0));
    }
}

/// Transform `src` into a single-band 8-bit raster at `dst` written with the
/// `format` driver, block by block, using the identity transform.
pub fn process_image(src: &Path, dst: &Path, format: &str) -> Result<()> {
    process_image_with(src, dst, format, &TransformOptions::default(), &mut Identity)
}

/// Block-wise read/process/write with explicit options and transform.
///
/// Peak memory is bounded by `block_size² × band_count` bytes regardless of
/// the raster size, and never exceeds one full-raster read. Both datasets
/// are closed on every return path.
pub fn process_image_with<T: TileTransform + ?Sized>(
    src: &Path,
    dst: &Path,
    format: &str,
    options: &TransformOptions,
    transform: &mut T,
) -> Result<()> {
    let block_size = options.block_size;
    if block_size == 0 {
        return Err(RasterError::InvalidBlockSize(block_size));
    }

    let driver = driver_by_name(format)?;
    let src_ds = io::open_source(src)?;
    let metadata = RasterMetadata::from_dataset(&src_ds);

    info!(
        "Source raster: {}x{}x{}",
        metadata.width, metadata.height, metadata.band_count
    );

    if metadata.band_count == 0 || src_ds.rasterband(1).is_err() {
        return Err(RasterError::NoBandsFound(src.display().to_string()));
    }

    let bands = io::band_map(metadata.band_count);
    let plane = tile_plane_len(block_size, metadata.width, metadata.height)?;
    let src_len = plane
        .checked_mul(bands.len())
        .ok_or(RasterError::InvalidBlockSize(block_size))?;

    let mut dst_ds = io::create_destination(&driver, dst, &metadata)?;
    propagate_georeference(&mut dst_ds, &metadata, options.georef_policy)?;

    let mut src_buf: Vec<u8> = Vec::with_capacity(src_len);
    let mut dst_buf: Vec<u8> = Vec::with_capacity(plane);

    let grid = TileGrid::new(metadata.width, metadata.height, block_size);
    info!("Processing {} tiles of up to {}x{}", grid.total_tiles, block_size, block_size);

    for tile in grid.iter() {
        debug!(
            "Tile {} at ({},{}) size {}x{}",
            tile.index, tile.x_off, tile.y_off, tile.width, tile.height
        );

        io::read_tile(&src_ds, &bands, &tile, &mut src_buf)?;
        dst_buf.resize(tile.pixel_count(), 0);

        let src_view = ArrayView3::from_shape((bands.len(), tile.height, tile.width), &src_buf)?;
        let dst_view = ArrayViewMut2::from_shape((tile.height, tile.width), &mut dst_buf)?;
        transform.apply(&tile, src_view, dst_view);

        io::write_tile(&dst_ds, &tile, &mut dst_buf)?;
    }

    dst_ds.flush_cache()?;
    info!("Wrote {}", dst.display());
    Ok(())
}

/// Pixels in the largest tile a `width`×`height` raster yields for `block_size`.
fn tile_plane_len(block_size: usize, width: usize, height: usize) -> Result<usize> {
    block_size
        .min(width)
        .checked_mul(block_size.min(height))
        .ok_or(RasterError::InvalidBlockSize(block_size))
}
