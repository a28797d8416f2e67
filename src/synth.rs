// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Random antenna layouts and directions for testing and benchmarking.

use std::f64::consts::{FRAC_PI_2, PI};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{HADec, XyzGeodetic};

/// The default seed of [`synthesise`].
pub const DEFAULT_SEED: u64 = 42;

/// Antenna x and y are drawn from `[-MAX_HORIZONTAL, MAX_HORIZONTAL]` \[metres\].
const MAX_HORIZONTAL: f64 = 1000.0;

/// Antenna z is drawn from `[-MAX_VERTICAL, MAX_VERTICAL]` \[metres\].
const MAX_VERTICAL: f64 = 10.0;

/// A roughly-flat antenna layout: x and y uniform in ±1 km, z uniform in ±10 m.
pub fn generate_layout<R: Rng>(num_antennas: usize, rng: &mut R) -> Vec<XyzGeodetic> {
    (0..num_antennas)
        .map(|_| XyzGeodetic {
            x: rng.random_range(-MAX_HORIZONTAL..=MAX_HORIZONTAL),
            y: rng.random_range(-MAX_HORIZONTAL..=MAX_HORIZONTAL),
            z: rng.random_range(-MAX_VERTICAL..=MAX_VERTICAL),
        })
        .collect()
}

/// Directions with the hour angle uniform in [-π, π] and the declination
/// uniform in [-π/2, π/2].
pub fn generate_directions<R: Rng>(num_directions: usize, rng: &mut R) -> Vec<HADec> {
    (0..num_directions)
        .map(|_| {
            HADec::from_radians(
                rng.random_range(-PI..=PI),
                rng.random_range(-FRAC_PI_2..=FRAC_PI_2),
            )
        })
        .collect()
}

/// A reproducible layout and set of directions.
pub fn synthesise(
    num_antennas: usize,
    num_directions: usize,
    seed: u64,
) -> (Vec<XyzGeodetic>, Vec<HADec>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let xyzs = generate_layout(num_antennas, &mut rng);
    let directions = generate_directions(num_directions, &mut rng);
    (xyzs, directions)
}
