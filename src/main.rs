use block_raster::cli::{Args, Command};
use block_raster::{print_raster_information, process_image_with, Identity, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let options = args.command.transform_options();
    match args.command {
        Command::Info { file } => print_raster_information(&file),
        Command::Transform {
            input,
            output,
            format,
            ..
        } => {
            let options = options.unwrap_or_default();
            info!("=== Block transform ({}x{} tiles) ===", options.block_size, options.block_size);
            process_image_with(&input, &output, &format, &options, &mut Identity)?;
            info!("=== Done! ===");
        }
    }

    Ok(())
}
