use crate::error::{RasterError, Result};
use gdal::{Driver, DriverManager};
use log::debug;
use std::sync::Once;

static REGISTER: Once = Once::new();

/// Register every GDAL driver once per process.
pub fn ensure_registered() {
    REGISTER.call_once(|| {
        DriverManager::register_all();
        debug!("Registered {} GDAL drivers", DriverManager::count());
    });
}

/// Look up an output driver by its short name (e.g. "GTiff")
pub fn driver_by_name(name: &str) -> Result<Driver> {
    ensure_registered();
    DriverManager::get_driver_by_name(name).map_err(|e| {
        debug!("Driver lookup for {} failed: {}", name, e);
        RasterError::UnknownFormat(name.to_string())
    })
}
