// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Make a dirty image of a point source at each direction.

use std::{path::PathBuf, time::Instant};

use clap::Parser;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::DirtyImagerError;
use crate::{
    config::load_global,
    imaging::normalise_to_peak,
    io::{read_antennas, read_directions, write_images, write_uvws_all},
    ObsContext,
};
#[cfg(not(feature = "plotting"))]
use crate::io::PlotError;

/// Compute the baselines of an antenna layout towards each direction, then
/// make a dirty image for each direction from unit visibilities.
#[derive(Parser, Debug)]
pub struct ImageArgs {
    /// Path to the antenna coordinates (x,y,z in metres, no header).
    #[clap(short, long, default_value = "data/xyz_coordinates.csv", parse(from_os_str))]
    input: PathBuf,

    /// Path to the directions (a header, then hour angle and declination in
    /// radians).
    #[clap(short, long, default_value = "data/directions.csv", parse(from_os_str))]
    directions: PathBuf,

    /// Path to the JSON configuration (IMAGE_SIZE, PREDEFINED_MAX_UV, and
    /// optionally REFERENCE_WAVELENGTH and OVERSAMPLING).
    #[clap(short, long, default_value = "config.json", parse(from_os_str))]
    config: PathBuf,

    /// The directory to write images into.
    #[clap(long, default_value = "data/images", parse(from_os_str))]
    image_dir: PathBuf,

    /// The directory to write baselines into.
    #[clap(long, default_value = "data/uvw_coordinates", parse(from_os_str))]
    uvw_dir: PathBuf,

    /// Derive the grid's uv extent from the baselines instead of using
    /// PREDEFINED_MAX_UV.
    #[clap(long)]
    derived: bool,

    /// Divide each image by its peak value.
    #[clap(long)]
    normalise: bool,

    /// Don't write the baselines.
    #[clap(long)]
    no_save_uvw: bool,

    /// Don't write the images.
    #[clap(long)]
    no_save_images: bool,

    /// Also render each image as a grey-scale PNG (image_<k>.png, in the image
    /// directory) and each direction's uv coverage as a scatter plot
    /// (uv_coverage_<k>.png, in the uvw directory). Only available if compiled
    /// with the "plotting" feature.
    #[clap(long)]
    png: bool,
}

impl ImageArgs {
    pub fn run(self) -> Result<(), DirtyImagerError> {
        #[cfg(not(feature = "plotting"))]
        if self.png {
            return Err(PlotError::NoPlottingFeature.into());
        }

        let config = load_global(&self.config)?;
        info!(
            "Image size {}x{}, {} extent",
            config.image_size,
            config.image_size,
            if self.derived {
                "derived"
            } else {
                "predefined"
            }
        );

        let xyzs = read_antennas(&self.input)?;
        let directions = read_directions(&self.directions)?;
        info!(
            "Read {} antennas and {} directions",
            xyzs.len(),
            directions.len()
        );
        if xyzs.len() < 2 {
            warn!("Fewer than two antennas; there are no baselines to image");
        }
        let context = ObsContext::new(xyzs, directions);

        let start = Instant::now();
        let baselines = context.compute_uvw();
        info!(
            "Computed {} baselines for each direction in {:.2} ms",
            context.num_uvws(),
            start.elapsed().as_secs_f64() * 1e3
        );

        if !self.no_save_uvw {
            write_uvws_all(&self.uvw_dir, &baselines)?;
            info!("Baselines written to {}", self.uvw_dir.display());
        }

        let policy = if self.derived {
            config.derived_extent()
        } else {
            config.predefined_extent()
        };
        let vis = context.unit_visibilities();
        let start = Instant::now();
        let mut images = context.image(&baselines, &vis, config.image_size, policy)?;
        info!(
            "Made {} images in {:.2} ms",
            images.len(),
            start.elapsed().as_secs_f64() * 1e3
        );

        if self.normalise {
            debug!("Normalising images to their peaks");
            images
                .par_iter_mut()
                .for_each(|image| normalise_to_peak(image.view_mut()));
        }

        if !self.no_save_images {
            write_images(&self.image_dir, &images)?;
            info!("Images written to {}", self.image_dir.display());
        }

        #[cfg(feature = "plotting")]
        if self.png {
            use crate::io::plot::{write_images_png, write_uv_coverage_all};

            let start = Instant::now();
            write_images_png(&self.image_dir, &images)?;
            write_uv_coverage_all(&self.uvw_dir, &baselines)?;
            info!(
                "Rendered PNGs in {:.2} ms",
                start.elapsed().as_secs_f64() * 1e3
            );
        }

        Ok(())
    }
}
