// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.

/// The reference wavelength used when deriving the pixel resolution from the
/// observed baseline extent \[same units as the baselines\]. The pixel
/// resolution is `(REFERENCE_WAVELENGTH / max_uv) / OVERSAMPLING`.
pub const REFERENCE_WAVELENGTH: f64 = 0.20;

/// How many pixels sample the synthesised beam when deriving the pixel
/// resolution from the observed baseline extent.
pub const OVERSAMPLING: f64 = 3.0;

/// The image size \[pixels\] used when nothing else is specified.
pub const DEFAULT_IMAGE_SIZE: usize = 512;

/// The uv half-extent used in predefined mode when nothing else is specified.
pub const DEFAULT_PREDEFINED_MAX_UV: f64 = 3000.0;

/// The name of the image files written for each direction, without the index
/// and extension.
pub const IMAGE_FILE_STEM: &str = "image_data_gpu";

/// The name of the uvw files written for each direction, without the index and
/// extension.
pub const UVW_FILE_STEM: &str = "uvw_coordinates";
