// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Interferometric baselines and dirty images.
//!
//! An antenna layout ([XyzGeodetic]s) and a set of directions ([HADec]s) give
//! a [BaselineSet] per direction ([compute_uvw]). Visibilities on those
//! baselines are gridded, inverse Fourier transformed and centred to make a
//! dirty image per direction ([imaging::image_batch]).

#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;

pub mod config;
pub mod constants;
pub mod context;
pub mod imaging;
pub mod io;
pub mod math;
pub mod pos;
pub mod synth;

cfg_if::cfg_if! {
    if #[cfg(feature = "cli")] {
        mod cli;
        pub use cli::{DirtyImager, DirtyImagerError};
    }
}

// Re-exports.
pub use config::{ConfigError, ImagingConfig};
pub use context::{compute_uvw, BaselineSet, ObsContext};
pub use imaging::{dirty_image, image_batch, ExtentPolicy, ImagingError};
pub use pos::{hadec::HADec, uvw::UVW, xyz::XyzGeodetic};

pub use ndarray;
pub use num_complex;
pub use num_complex::Complex;
pub use rayon;
