// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Place visibilities onto a regular uv grid.
//!
//! Each visibility is added to the grid cell nearest (below) its (u,v)
//! coordinate; there is no convolutional gridding kernel. The row of a cell is
//! determined by u and the column by v. Samples falling outside the grid are
//! added to the nearest edge cell.

use itertools::izip;
use log::{trace, warn};
use ndarray::{Array2, ArrayViewMut2};
use num_traits::Zero;

use super::ImagingError;
use crate::{
    c64,
    constants::{OVERSAMPLING, REFERENCE_WAVELENGTH},
    math::max_abs,
};

/// How to choose the uv half-extent of a grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExtentPolicy {
    /// Derive the half-extent from the largest observed |u|. With pixel
    /// resolution `p = (reference_wavelength / max_u) / oversampling`, the
    /// half-extent is `1 / (2p)`.
    Derived {
        reference_wavelength: f64,
        oversampling: f64,
    },

    /// Use a fixed half-extent.
    Predefined { half_extent: f64 },
}

impl ExtentPolicy {
    /// Derived mode with the default reference wavelength and oversampling
    /// factor.
    pub fn derived() -> ExtentPolicy {
        ExtentPolicy::Derived {
            reference_wavelength: REFERENCE_WAVELENGTH,
            oversampling: OVERSAMPLING,
        }
    }

    /// Predefined mode with the given half-extent.
    pub fn predefined(half_extent: f64) -> ExtentPolicy {
        ExtentPolicy::Predefined { half_extent }
    }

    /// Get the grid parameters for an image, given the largest |u| of the
    /// baselines to be gridded. `max_u` is ignored in predefined mode.
    pub fn grid_params(&self, max_u: f64, image_size: usize) -> Result<GridParams, ImagingError> {
        match *self {
            ExtentPolicy::Derived {
                reference_wavelength,
                oversampling,
            } => {
                let pixel_resolution = (reference_wavelength / max_u) / oversampling;
                let uv_resolution = 1.0 / (image_size as f64 * pixel_resolution);
                let half_extent = uv_resolution * image_size as f64 / 2.0;
                GridParams::new(half_extent, image_size)
            }

            ExtentPolicy::Predefined { half_extent } => GridParams::new(half_extent, image_size),
        }
    }

    /// Get the grid parameters for an image of the given u coordinates.
    pub fn grid_params_for(
        &self,
        u: &[f64],
        image_size: usize,
    ) -> Result<GridParams, ImagingError> {
        self.grid_params(max_abs(u), image_size)
    }
}

/// The geometry of a uv grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    /// The side length of the (square) grid \[cells\].
    pub image_size: usize,

    /// The absolute uv value at the edge of the grid.
    pub half_extent: f64,

    /// The uv width of a single cell (`2 * half_extent / image_size`).
    pub cell_size: f64,
}

impl GridParams {
    pub fn new(half_extent: f64, image_size: usize) -> Result<GridParams, ImagingError> {
        if image_size == 0 {
            return Err(ImagingError::ZeroImageSize);
        }
        if !(half_extent > 0.0 && half_extent.is_finite()) {
            return Err(ImagingError::DegenerateExtent { half_extent });
        }
        Ok(GridParams {
            image_size,
            half_extent,
            cell_size: 2.0 * half_extent / image_size as f64,
        })
    }

    /// Quantise a single u or v coordinate into a cell index. The second
    /// element of the returned tuple is `true` if the coordinate was outside
    /// the grid (or not a number) and had to be clamped.
    #[inline]
    pub fn quantise(&self, x: f64) -> (usize, bool) {
        let index = ((x + self.half_extent) / self.cell_size).floor();
        let last = self.image_size - 1;
        if index.is_nan() || index < 0.0 {
            (0, true)
        } else if index > last as f64 {
            (last, true)
        } else {
            (index as usize, false)
        }
    }

    /// Get the (row, column) of the cell for a (u,v) coordinate, and whether
    /// it was clamped.
    #[inline]
    pub fn cell(&self, u: f64, v: f64) -> ((usize, usize), bool) {
        let (i, clamped_i) = self.quantise(u);
        let (j, clamped_j) = self.quantise(v);
        ((i, j), clamped_i || clamped_j)
    }
}

fn check_lengths(u: &[f64], v: &[f64], vis: &[c64], function: &str) -> Result<(), ImagingError> {
    for (argument, len) in [("v", v.len()), ("visibilities", vis.len())] {
        if len != u.len() {
            return Err(ImagingError::BadArrayShape {
                argument: argument.to_string(),
                function: function.to_string(),
                expected: format!("({},)", u.len()),
                received: format!("({len},)"),
            });
        }
    }
    Ok(())
}

/// Zero `grid` and accumulate the visibilities into it. The grid must be
/// `params.image_size` square. Returns the number of samples that were
/// clamped onto the edge of the grid.
pub fn grid_visibilities_into(
    mut grid: ArrayViewMut2<c64>,
    u: &[f64],
    v: &[f64],
    vis: &[c64],
    params: &GridParams,
) -> Result<usize, ImagingError> {
    check_lengths(u, v, vis, "grid_visibilities_into")?;
    let size = params.image_size;
    if grid.dim() != (size, size) {
        return Err(ImagingError::BadArrayShape {
            argument: "grid".to_string(),
            function: "grid_visibilities_into".to_string(),
            expected: format!("({size}, {size})"),
            received: format!("{:?}", grid.dim()),
        });
    }

    grid.fill(c64::zero());
    let mut num_clamped = 0;
    for (&u, &v, &vis) in izip!(u, v, vis) {
        let (cell, clamped) = params.cell(u, v);
        if clamped {
            num_clamped += 1;
        }
        grid[cell] += vis;
    }

    if num_clamped > 0 {
        warn!(
            "{num_clamped} of {} samples were outside ±{} and were clamped to the grid edge",
            u.len(),
            params.half_extent
        );
    }
    trace!(
        "Gridded {} samples with cell size {}",
        u.len(),
        params.cell_size
    );
    Ok(num_clamped)
}

/// Make a new grid from index-aligned u, v and visibilities. The grid
/// parameters are chosen by `policy`; in derived mode, the half-extent comes
/// from the largest |u| in `u`.
pub fn grid_visibilities(
    u: &[f64],
    v: &[f64],
    vis: &[c64],
    image_size: usize,
    policy: ExtentPolicy,
) -> Result<(Array2<c64>, GridParams), ImagingError> {
    check_lengths(u, v, vis, "grid_visibilities")?;
    let params = policy.grid_params_for(u, image_size)?;
    let mut grid = Array2::zeros((image_size, image_size));
    grid_visibilities_into(grid.view_mut(), u, v, vis, &params)?;
    Ok((grid, params))
}
