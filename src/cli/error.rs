// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type for all dirty-imager errors. This should be the *only* error
//! enum surfaced by the binary.

use thiserror::Error;

use crate::{
    config::ConfigError,
    imaging::ImagingError,
    io::{PlotError, ReadError, WriteError},
};

#[derive(Error, Debug)]
pub enum DirtyImagerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Plot(#[from] PlotError),
}
