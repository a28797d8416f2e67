// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The shared inputs of a multi-direction imaging run.

use ndarray::Array2;
use rayon::prelude::*;

use crate::{
    c64,
    imaging::{image_batch, ExtentPolicy, ImagingError},
    pos::xyz::{num_conjugate_uvws, xyzs_to_conjugate_uvws, xyzs_to_conjugate_uvws_parallel},
    HADec, XyzGeodetic, UVW,
};

/// The (u,v,w) coordinates of every baseline (and its conjugate) for a single
/// direction, as parallel sequences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BaselineSet {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
    pub w: Vec<f64>,
}

impl BaselineSet {
    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// Iterate over the baselines as [UVW]s.
    pub fn iter(&self) -> impl Iterator<Item = UVW> + '_ {
        self.u
            .iter()
            .zip(self.v.iter())
            .zip(self.w.iter())
            .map(|((&u, &v), &w)| UVW { u, v, w })
    }
}

impl From<&[UVW]> for BaselineSet {
    fn from(uvws: &[UVW]) -> Self {
        let mut set = BaselineSet {
            u: Vec::with_capacity(uvws.len()),
            v: Vec::with_capacity(uvws.len()),
            w: Vec::with_capacity(uvws.len()),
        };
        for uvw in uvws {
            set.u.push(uvw.u);
            set.v.push(uvw.v);
            set.w.push(uvw.w);
        }
        set
    }
}

/// Get the baselines of an antenna layout for each direction, in direction
/// order. With at least as many directions as worker threads, directions are
/// handled in parallel; otherwise the baselines of each direction are.
pub fn compute_uvw(xyzs: &[XyzGeodetic], directions: &[HADec]) -> Vec<BaselineSet> {
    if directions.len() < rayon::current_num_threads() {
        directions
            .iter()
            .map(|&direction| {
                BaselineSet::from(xyzs_to_conjugate_uvws_parallel(xyzs, direction).as_slice())
            })
            .collect()
    } else {
        directions
            .par_iter()
            .map(|&direction| BaselineSet::from(xyzs_to_conjugate_uvws(xyzs, direction).as_slice()))
            .collect()
    }
}

/// An antenna layout and the directions to image with it. Neither changes
/// once the context is made.
#[derive(Clone, Debug, Default)]
pub struct ObsContext {
    /// The geodetic position of each antenna.
    pub ant_positions: Vec<XyzGeodetic>,

    /// The directions to image.
    pub directions: Vec<HADec>,
}

impl ObsContext {
    pub fn new(ant_positions: Vec<XyzGeodetic>, directions: Vec<HADec>) -> Self {
        Self {
            ant_positions,
            directions,
        }
    }

    pub fn num_ants(&self) -> usize {
        self.ant_positions.len()
    }

    pub fn num_directions(&self) -> usize {
        self.directions.len()
    }

    /// The number of (u,v,w) points per direction, counting conjugates.
    pub fn num_uvws(&self) -> usize {
        num_conjugate_uvws(self.num_ants())
    }

    /// Get the baselines for each direction.
    pub fn compute_uvw(&self) -> Vec<BaselineSet> {
        compute_uvw(&self.ant_positions, &self.directions)
    }

    /// Visibilities of 1 for every baseline of every direction, i.e. a point
    /// source at each phase centre.
    pub fn unit_visibilities(&self) -> Vec<Vec<c64>> {
        vec![vec![c64::new(1.0, 0.0); self.num_uvws()]; self.num_directions()]
    }

    /// Make a dirty image for each direction from previously-computed
    /// baselines. See [`image_batch`].
    pub fn image(
        &self,
        baselines: &[BaselineSet],
        visibilities: &[Vec<c64>],
        image_size: usize,
        policy: ExtentPolicy,
    ) -> Result<Vec<Array2<f64>>, ImagingError> {
        // No antennas or directions means no images.
        if self.num_ants() == 0 || self.num_directions() == 0 {
            return Ok(vec![]);
        }
        let u: Vec<&[f64]> = baselines.iter().map(|b| b.u.as_slice()).collect();
        let v: Vec<&[f64]> = baselines.iter().map(|b| b.v.as_slice()).collect();
        image_batch(visibilities, &u, &v, image_size, policy)
    }
}
