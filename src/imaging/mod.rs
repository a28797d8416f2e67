// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dirty imaging: grid visibilities, shift, inverse transform, shift, take the
//! real part.

mod error;
pub mod fft;
pub mod grid;
pub mod pipeline;
pub mod shift;

pub use error::ImagingError;
pub use fft::InverseFft2d;
pub use grid::{grid_visibilities, grid_visibilities_into, ExtentPolicy, GridParams};
pub use pipeline::{dirty_image, image_batch, normalise_to_peak, Imager};
pub use shift::{inverse_quadrant_shift, quadrant_shift};
