// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::create_dir_all, path::PathBuf};

use clap::Parser;
use log::info;

use super::DirtyImagerError;
use crate::{
    io::{write_antennas, write_directions, WriteError},
    synth::{synthesise, DEFAULT_SEED},
};

/// Generate a random antenna layout and random directions.
#[derive(Parser, Debug)]
pub struct SynthArgs {
    /// The number of antennas.
    #[clap(short = 'n', long, default_value = "25")]
    num_antennas: usize,

    /// The number of directions.
    #[clap(short = 'k', long, default_value = "1")]
    num_directions: usize,

    /// The random seed.
    #[clap(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// The directory to write xyz_coordinates.csv and directions.csv into.
    #[clap(short, long, default_value = "data", parse(from_os_str))]
    output_dir: PathBuf,
}

impl SynthArgs {
    pub fn run(self) -> Result<(), DirtyImagerError> {
        create_dir_all(&self.output_dir).map_err(|err| WriteError::CreateDir {
            dir: self.output_dir.clone(),
            err,
        })?;
        let (xyzs, directions) = synthesise(self.num_antennas, self.num_directions, self.seed);

        let xyz_file = self.output_dir.join("xyz_coordinates.csv");
        write_antennas(&xyz_file, &xyzs)?;
        info!("Wrote {} antennas to {}", xyzs.len(), xyz_file.display());

        let directions_file = self.output_dir.join("directions.csv");
        write_directions(&directions_file, &directions)?;
        info!(
            "Wrote {} directions to {}",
            directions.len(),
            directions_file.display()
        );
        Ok(())
    }
}
