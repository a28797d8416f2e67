// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turn gridded visibilities into dirty images, one direction at a time or many
//! at once.

use std::sync::Arc;

use log::{debug, trace, warn};
use ndarray::{Array2, ArrayViewMut2, Zip};
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use super::{
    fft::InverseFft2d,
    grid::{grid_visibilities_into, ExtentPolicy, GridParams},
    shift::{inverse_quadrant_shift, quadrant_shift},
    ImagingError,
};
use crate::{c64, math::max_abs};

/// Owns a grid buffer and a transform plan for a single image size, so that
/// many images can be made without reallocating.
#[derive(Debug)]
pub struct Imager {
    grid: Array2<c64>,
    fft: InverseFft2d,
}

impl Imager {
    pub fn new(image_size: usize) -> Result<Imager, ImagingError> {
        if image_size == 0 {
            return Err(ImagingError::ZeroImageSize);
        }
        Ok(Imager {
            grid: Array2::zeros((image_size, image_size)),
            fft: InverseFft2d::new(image_size),
        })
    }

    /// An imager using an existing 1D inverse transform plan, e.g. one shared
    /// by every worker thread.
    pub fn with_plan(plan: Arc<dyn Fft<f64>>) -> Result<Imager, ImagingError> {
        let fft = InverseFft2d::with_plan(plan);
        let image_size = fft.size();
        if image_size == 0 {
            return Err(ImagingError::ZeroImageSize);
        }
        Ok(Imager {
            grid: Array2::zeros((image_size, image_size)),
            fft,
        })
    }

    pub fn image_size(&self) -> usize {
        self.fft.size()
    }

    /// Make a dirty image from index-aligned visibilities and (u,v)
    /// coordinates, writing it into `image`.
    ///
    /// The stages are: grid, move the uv origin to index (0, 0), inverse
    /// transform, move index (0, 0) to the image centre, take the real part.
    pub fn image_into(
        &mut self,
        vis: &[c64],
        u: &[f64],
        v: &[f64],
        params: &GridParams,
        mut image: ArrayViewMut2<f64>,
    ) -> Result<(), ImagingError> {
        let size = self.image_size();
        if params.image_size != size {
            return Err(ImagingError::BadArrayShape {
                argument: "params".to_string(),
                function: "Imager::image_into".to_string(),
                expected: format!("image_size = {size}"),
                received: format!("image_size = {}", params.image_size),
            });
        }
        if image.dim() != (size, size) {
            return Err(ImagingError::BadArrayShape {
                argument: "image".to_string(),
                function: "Imager::image_into".to_string(),
                expected: format!("({size}, {size})"),
                received: format!("{:?}", image.dim()),
            });
        }

        grid_visibilities_into(self.grid.view_mut(), u, v, vis, params)?;
        trace!("Gridded; shifting the uv origin to (0, 0)");
        inverse_quadrant_shift(self.grid.view_mut());
        self.fft.process(self.grid.view_mut())?;
        trace!("Transformed; shifting to the image centre");
        quadrant_shift(self.grid.view_mut());

        Zip::from(&mut image)
            .and(&self.grid)
            .for_each(|pixel, cell| *pixel = cell.re);
        Ok(())
    }

    /// Make a new dirty image. See [`Imager::image_into`].
    pub fn image(
        &mut self,
        vis: &[c64],
        u: &[f64],
        v: &[f64],
        params: &GridParams,
    ) -> Result<Array2<f64>, ImagingError> {
        let size = self.image_size();
        let mut image = Array2::zeros((size, size));
        self.image_into(vis, u, v, params, image.view_mut())?;
        Ok(image)
    }
}

/// Make a single dirty image. In derived mode, the grid's half-extent comes
/// from the largest |u| in `u`.
pub fn dirty_image(
    vis: &[c64],
    u: &[f64],
    v: &[f64],
    image_size: usize,
    policy: ExtentPolicy,
) -> Result<Array2<f64>, ImagingError> {
    let params = policy.grid_params_for(u, image_size)?;
    debug!(
        "Imaging {} samples; half-extent {}, cell size {}",
        vis.len(),
        params.half_extent,
        params.cell_size
    );
    Imager::new(image_size)?.image(vis, u, v, &params)
}

fn check_family_len(argument: &str, len: usize, expected: usize) -> Result<(), ImagingError> {
    if len != expected {
        return Err(ImagingError::BadArrayShape {
            argument: argument.to_string(),
            function: "image_batch".to_string(),
            expected: format!("{expected} directions"),
            received: format!("{len} directions"),
        });
    }
    Ok(())
}

/// Make a dirty image for each direction. `visibilities`, `u` and `v` each have
/// one entry per direction, and the returned images are in the same order.
///
/// Directions are imaged in parallel. The transform is planned once and shared;
/// each worker thread reuses its own grid and scratch space. In derived mode, a
/// single half-extent is derived from the largest |u| over *all* directions,
/// and every direction is gridded with it, so every image has the same pixel
/// scale.
///
/// A direction whose inputs have mismatched lengths gets an all-zero image;
/// the rest of the batch is unaffected. If no direction has a non-zero |u| in
/// derived mode, every image is zero. An invalid image size or predefined
/// half-extent is an error for the whole batch.
pub fn image_batch<V, U>(
    visibilities: &[V],
    u: &[U],
    v: &[U],
    image_size: usize,
    policy: ExtentPolicy,
) -> Result<Vec<Array2<f64>>, ImagingError>
where
    V: AsRef<[c64]> + Sync,
    U: AsRef<[f64]> + Sync,
{
    if image_size == 0 {
        return Err(ImagingError::ZeroImageSize);
    }
    let num_directions = visibilities.len();
    check_family_len("u", u.len(), num_directions)?;
    check_family_len("v", v.len(), num_directions)?;
    if num_directions == 0 {
        return Ok(vec![]);
    }

    let params = match policy {
        ExtentPolicy::Predefined { .. } => Some(policy.grid_params(0.0, image_size)?),
        ExtentPolicy::Derived { .. } => {
            let max_u = u
                .par_iter()
                .map(|u| max_abs(u.as_ref()))
                .reduce(|| 0.0, f64::max);
            match policy.grid_params(max_u, image_size) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(
                        "No direction has a usable baseline extent ({e}); \
                         all images will be zero"
                    );
                    None
                }
            }
        }
    };
    if let Some(p) = params.as_ref() {
        debug!(
            "Imaging {num_directions} directions at {image_size}x{image_size}; \
             half-extent {}, cell size {}",
            p.half_extent, p.cell_size
        );
    }

    let plan = FftPlanner::<f64>::new().plan_fft_inverse(image_size);
    let images = (0..num_directions)
        .into_par_iter()
        .map_init(
            || Imager::with_plan(Arc::clone(&plan)),
            |imager, i_dir| {
                let zeros = || Array2::<f64>::zeros((image_size, image_size));
                let (params, imager) = match (params.as_ref(), imager) {
                    (Some(p), Ok(i)) => (p, i),
                    _ => return zeros(),
                };
                let vis = visibilities[i_dir].as_ref();
                let (u, v) = (u[i_dir].as_ref(), v[i_dir].as_ref());
                match imager.image(vis, u, v, params) {
                    Ok(image) => image,
                    Err(e) => {
                        warn!("Direction {i_dir} couldn't be imaged ({e}); its image will be zero");
                        zeros()
                    }
                }
            },
        )
        .collect();
    Ok(images)
}

/// Divide an image by its largest pixel value. Images without a positive peak
/// are left alone.
pub fn normalise_to_peak(mut image: ArrayViewMut2<f64>) {
    let peak = image.iter().fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
    if peak > 0.0 && peak.is_finite() {
        image.mapv_inplace(|x| x / peak);
    }
}
