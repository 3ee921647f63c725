use crate::error::{RasterError, Result};
use crate::io::RasterMetadata;
use gdal::Dataset;
use log::{debug, warn};

/// How to treat a destination that refuses the source georeferencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeorefPolicy {
    /// Log a warning and keep processing
    #[default]
    Warn,
    /// Abort the transform
    Strict,
}

/// Copy geotransform and projection from the source metadata onto `dst`.
///
/// The geotransform is always written, including GDAL's default for
/// sources that have none. An empty projection is not written.
pub fn propagate_georeference(
    dst: &mut Dataset,
    metadata: &RasterMetadata,
    policy: GeorefPolicy,
) -> Result<()> {
    if let Err(e) = dst.set_geo_transform(&metadata.geotransform) {
        handle_failure(policy, format!("geotransform: {}", e))?;
    }

    if metadata.projection.is_empty() {
        debug!("Source has no projection, nothing to copy");
    } else if let Err(e) = dst.set_projection(&metadata.projection) {
        handle_failure(policy, format!("projection: {}", e))?;
    }

    Ok(())
}

fn handle_failure(policy: GeorefPolicy, message: String) -> Result<()> {
    match policy {
        GeorefPolicy::Warn => {
            warn!("Output georeferencing incomplete, {}", message);
            Ok(())
        }
        GeorefPolicy::Strict => Err(RasterError::GeorefPropagation(message)),
    }
}
