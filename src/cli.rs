use crate::georef::GeorefPolicy;
use crate::transform::{TransformOptions, DEFAULT_BLOCK_SIZE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "block-raster")]
#[command(about = "Inspect GDAL rasters and transform them block by block")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print driver, size, georeferencing and band 1 statistics
    Info {
        /// Raster to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write a single-band 8-bit raster derived from the input, tile by tile
    Transform {
        /// Input raster (any GDAL-readable format)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output raster path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// GDAL driver short name for the output
        #[arg(short, long, value_name = "DRIVER", default_value = "GTiff")]
        format: String,

        /// Tile edge length in pixels
        #[arg(short, long, value_name = "PIXELS", default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Fail if the output driver rejects the geotransform or projection
        #[arg(long)]
        strict_georef: bool,
    },
}

impl Command {
    /// Transform options from the command line; `None` for other commands
    pub fn transform_options(&self) -> Option<TransformOptions> {
        match self {
            Command::Transform {
                block_size,
                strict_georef,
                ..
            } => Some(TransformOptions {
                block_size: *block_size,
                georef_policy: if *strict_georef {
                    GeorefPolicy::Strict
                } else {
                    GeorefPolicy::Warn
                },
            }),
            Command::Info { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_defaults() {
        let args = Args::parse_from(["block-raster", "transform", "-i", "in.tif", "-o", "out.tif"]);
        assert!(!args.verbose);
        match &args.command {
            Command::Transform { format, .. } => assert_eq!(format, "GTiff"),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.command.transform_options(), Some(TransformOptions::default()));
    }

    #[test]
    fn test_transform_flags() {
        let args = Args::parse_from([
            "block-raster", "-v", "transform", "-i", "in.tif", "-o", "out.png", "-f", "PNG",
            "--block-size", "512", "--strict-georef",
        ]);
        assert!(args.verbose);
        let options = args.command.transform_options().unwrap();
        assert_eq!(options.block_size, 512);
        assert_eq!(options.georef_policy, GeorefPolicy::Strict);
    }

    #[test]
    fn test_info() {
        let args = Args::parse_from(["block-raster", "info", "scene.tif"]);
        match args.command {
            Command::Info { ref file } => assert_eq!(file, &PathBuf::from("scene.tif")),
            ref other => panic!("unexpected command {:?}", other),
        }
        assert!(args.command.transform_options().is_none());
    }
}
