use log::debug;

/// One block of the raster grid, clipped at the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub index: usize,
    pub x_off: usize,
    pub y_off: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Window origin in the form GDAL's raster I/O expects
    pub fn window(&self) -> (isize, isize) {
        (self.x_off as isize, self.y_off as isize)
    }

    pub fn window_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Row-major partition of a raster into square blocks of `block_size`.
pub struct TileGrid {
    raster_width: usize,
    raster_height: usize,
    block_size: usize,
    pub tiles_x: usize,
    pub tiles_y: usize,
    pub total_tiles: usize,
}

impl TileGrid {
    /// `block_size` must be positive; callers validate it before building a grid.
    pub fn new(raster_width: usize, raster_height: usize, block_size: usize) -> Self {
        debug_assert!(block_size > 0);

        let tiles_x = raster_width.div_ceil(block_size);
        let tiles_y = raster_height.div_ceil(block_size);
        let total_tiles = tiles_x * tiles_y;

        debug!(
            "TileGrid: {}x{} raster, block_size={} → {}x{} tiles ({} total)",
            raster_width, raster_height, block_size, tiles_x, tiles_y, total_tiles
        );

        Self {
            raster_width,
            raster_height,
            block_size,
            tiles_x,
            tiles_y,
            total_tiles,
        }
    }

    pub fn iter(&self) -> TileIter<'_> {
        TileIter {
            grid: self,
            current_idx: 0,
        }
    }

    /// The tile at row-major position `tile_idx`, or `None` past the end.
    pub fn tile(&self, tile_idx: usize) -> Option<Tile> {
        if tile_idx >= self.total_tiles {
            return None;
        }

        let tile_y = tile_idx / self.tiles_x;
        let tile_x = tile_idx % self.tiles_x;

        let x_off = tile_x * self.block_size;
        let y_off = tile_y * self.block_size;

        Some(Tile {
            index: tile_idx,
            x_off,
            y_off,
            width: self.block_size.min(self.raster_width - x_off),
            height: self.block_size.min(self.raster_height - y_off),
        })
    }
}

pub struct TileIter<'a> {
    grid: &'a TileGrid,
    current_idx: usize,
}

impl Iterator for TileIter<'_> {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let tile = self.grid.tile(self.current_idx)?;
        self.current_idx += 1;
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.total_tiles - self.current_idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileIter<'_> {}
