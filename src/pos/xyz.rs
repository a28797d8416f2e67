// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle geodetic (x,y,z) coordinates of an antenna (a.k.a. tile or station),
//! and turn them into baselines.
//!
//! This coordinate system is discussed at length in Interferometry and
//! Synthesis in Radio Astronomy, Third Edition, Section 4: Geometrical
//! Relationships, Polarimetry, and the Measurement Equation.

use rayon::prelude::*;

use crate::{math::cross_correlation_baseline_to_tiles, HADec, UVW};

/// The geodetic (x,y,z) coordinates of an antenna (a.k.a. tile or station). All
/// units are in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct XyzGeodetic {
    /// x-coordinate \[meters\]
    pub x: f64,
    /// y-coordinate \[meters\]
    pub y: f64,
    /// z-coordinate \[meters\]
    pub z: f64,
}

impl From<[f64; 3]> for XyzGeodetic {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl std::ops::Sub<XyzGeodetic> for XyzGeodetic {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        XyzGeodetic {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// The number of (u,v,w) points emitted for `num_tiles` antennas; every
/// cross-correlation baseline is emitted along with its conjugate.
pub fn num_conjugate_uvws(num_tiles: usize) -> usize {
    num_tiles * num_tiles.saturating_sub(1)
}

/// Convert [XyzGeodetic] tile coordinates to [UVW] baseline coordinates for
/// every cross-correlation baseline, with each baseline immediately followed
/// by its conjugate (the negated [UVW]).
///
/// For tiles `i < j`, the baseline is `xyzs[j] - xyzs[i]`. The ordering is
/// tile-pair major, so visibilities can be prepared index-aligned with the
/// output. Fewer than two tiles gives an empty [Vec].
pub fn xyzs_to_conjugate_uvws(xyzs: &[XyzGeodetic], phase_centre: HADec) -> Vec<UVW> {
    let (s_ha, c_ha, s_dec, c_dec) = phase_centre.sin_cos();
    let num_tiles = xyzs.len();
    let mut bl_uvws = Vec::with_capacity(num_conjugate_uvws(num_tiles));
    for (i, &xyz_i) in xyzs.iter().enumerate() {
        for &xyz_j in &xyzs[i + 1..] {
            let uvw = UVW::from_xyz_inner(xyz_j - xyz_i, s_ha, c_ha, s_dec, c_dec);
            bl_uvws.push(uvw);
            bl_uvws.push(-uvw);
        }
    }
    bl_uvws
}

/// Convert [XyzGeodetic] tile coordinates to [UVW] baseline coordinates for
/// every cross-correlation baseline, with conjugates. This function performs
/// calculations in parallel, but its output is identical to
/// [xyzs_to_conjugate_uvws].
pub fn xyzs_to_conjugate_uvws_parallel(xyzs: &[XyzGeodetic], phase_centre: HADec) -> Vec<UVW> {
    let (s_ha, c_ha, s_dec, c_dec) = phase_centre.sin_cos();
    let num_tiles = xyzs.len();
    if num_tiles < 2 {
        return vec![];
    }
    let num_baselines = (num_tiles * (num_tiles - 1)) / 2;
    (0..num_baselines)
        .into_par_iter()
        .flat_map_iter(|i_bl| {
            let (i, j) = cross_correlation_baseline_to_tiles(num_tiles, i_bl);
            let uvw = UVW::from_xyz_inner(xyzs[j] - xyzs[i], s_ha, c_ha, s_dec, c_dec);
            [uvw, -uvw]
        })
        .collect()
}
