// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading antenna layouts and directions, and writing baselines and images.
//! Everything is CSV, apart from the optional PNG renderings.

pub mod error;
#[cfg(feature = "plotting")]
pub mod plot;
pub mod read;
pub mod write;

pub use error::{PlotError, ReadError, WriteError};
pub use read::{read_antennas, read_directions};
pub use write::{
    image_path, uvw_path, write_antennas, write_directions, write_image, write_images,
    write_uvws, write_uvws_all,
};
