// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Couldn't open {}: {err}", file.display())]
    Open { file: PathBuf, err: std::io::Error },

    #[error("Error reading {}: {err}", file.display())]
    Csv { file: PathBuf, err: csv::Error },
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Couldn't create directory {}: {err}", dir.display())]
    CreateDir { dir: PathBuf, err: std::io::Error },

    #[error("Error writing {}: {err}", file.display())]
    Csv { file: PathBuf, err: csv::Error },

    #[error("Error writing {}: {err}", file.display())]
    IO { file: PathBuf, err: std::io::Error },
}

#[derive(Error, Debug)]
pub enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("dirty_imager was not compiled with the \"plotting\" feature.\nRebuild with `--features plotting` to write PNGs.")]
    NoPlottingFeature,

    #[error("Couldn't create directory {}: {err}", dir.display())]
    CreateDir { dir: PathBuf, err: std::io::Error },

    #[error("While drawing {}: {err}", file.display())]
    Draw { file: PathBuf, err: String },
}
