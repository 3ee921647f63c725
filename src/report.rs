use crate::drivers::ensure_registered;
use crate::error::{RasterError, Result};
use crate::io::{self, RasterMetadata};
use gdal::raster::RasterBand;
use gdal::GeoTransform;
use log::{debug, error, info};
use std::fmt;
use std::path::Path;

/// Where a band's min/max came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinMaxSource {
    /// Statistics already stored with the dataset
    Cached,
    /// Full scan of the band
    Computed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    pub data_type: String,
    pub min: f64,
    pub max: f64,
    pub min_max_source: MinMaxSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterReport {
    pub driver_short_name: String,
    pub driver_long_name: String,
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub projection: Option<String>,
    pub geotransform: Option<GeoTransform>,
    pub band1: Option<BandSummary>,
}

impl fmt::Display for RasterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Driver: {}/{}", self.driver_short_name, self.driver_long_name)?;
        writeln!(f, "Size is {}x{}x{}", self.width, self.height, self.band_count)?;

        if let Some(projection) = &self.projection {
            writeln!(f, "Projection is {}", projection)?;
        }

        if let Some(gt) = &self.geotransform {
            writeln!(f, "Origin = ({:.6},{:.6})", gt[0], gt[3])?;
            writeln!(f, "PixelSize = ({:.6},{:.6})", gt[1], gt[5])?;
        }

        if let Some(band) = &self.band1 {
            writeln!(f, "{}", band.data_type)?;
            writeln!(f, "Min = {:.3}, Max = {:.3}", band.min, band.max)?;
        }

        Ok(())
    }
}

/// Open `path` read-only and collect its metadata.
///
/// The dataset is closed before this returns.
pub fn read_report(path: &Path) -> Result<RasterReport> {
    ensure_registered();
    let dataset = io::open_source(path)?;
    let metadata = RasterMetadata::from_dataset(&dataset);
    let driver = dataset.driver();

    let band1 = if metadata.band_count > 0 {
        Some(summarize_band(&dataset.rasterband(1)?)?)
    } else {
        debug!("{} has no raster bands", path.display());
        None
    };

    Ok(RasterReport {
        driver_short_name: driver.short_name(),
        driver_long_name: driver.long_name(),
        width: metadata.width,
        height: metadata.height,
        band_count: metadata.band_count,
        projection: Some(metadata.projection).filter(|p| !p.is_empty()),
        geotransform: dataset.geo_transform().ok(),
        band1,
    })
}

/// Data type and min/max of a band.
///
/// Stored statistics are used when present; otherwise the band is scanned
/// in full.
pub fn summarize_band(band: &RasterBand) -> Result<BandSummary> {
    let data_type = band.band_type().name();

    let (min, max, min_max_source) = match band.get_statistics(false, false) {
        Ok(Some(stats)) => (stats.min, stats.max, MinMaxSource::Cached),
        _ => {
            debug!("No stored statistics, computing min/max");
            let stats = band.compute_raster_min_max(false)?;
            (stats.min, stats.max, MinMaxSource::Computed)
        }
    };

    Ok(BandSummary {
        data_type,
        min,
        max,
        min_max_source,
    })
}

/// Print the metadata report for `path` to stdout.
///
/// Failures produce a diagnostic on stderr instead of an error.
pub fn print_raster_information(path: &Path) {
    match read_report(path) {
        Ok(report) => {
            info!("Read metadata for {}", path.display());
            print!("{}", report);
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", diagnostic(path, &e));
        }
    }
}

fn diagnostic(path: &Path, err: &RasterError) -> String {
    match err {
        RasterError::SourceOpenFailed { .. } => format!("File: {} cannot be opened!", path.display()),
        other => format!("File: {}: {}", path.display(), other),
    }
}
