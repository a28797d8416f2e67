// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two-dimensional inverse discrete Fourier transform.
//!
//! The transform is normalised by `1 / (rows * cols)`, i.e. the same
//! convention as numpy's `ifft2`. Any size works; `rustfft` picks an
//! appropriate algorithm for sizes that aren't powers of two.

use std::sync::Arc;

use ndarray::ArrayViewMut2;
use num_traits::Zero;
use rustfft::{Fft, FftPlanner, Length};

use super::ImagingError;
use crate::c64;

/// A reusable plan for square inverse 2D transforms of a single size. The plan
/// owns its scratch space, so each thread should have its own.
pub struct InverseFft2d {
    size: usize,
    plan: Arc<dyn Fft<f64>>,
    scratch: Vec<c64>,
    column: Vec<c64>,
}

impl std::fmt::Debug for InverseFft2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InverseFft2d")
            .field("size", &self.size)
            .finish()
    }
}

impl InverseFft2d {
    pub fn new(size: usize) -> InverseFft2d {
        let mut planner = FftPlanner::new();
        InverseFft2d::with_plan(planner.plan_fft_inverse(size))
    }

    /// Use an existing 1D inverse plan. Plans are immutable and can be shared
    /// between threads; the square size is the plan's length.
    pub fn with_plan(plan: Arc<dyn Fft<f64>>) -> InverseFft2d {
        let size = plan.len();
        let scratch = vec![c64::zero(); plan.get_inplace_scratch_len()];
        InverseFft2d {
            size,
            plan,
            scratch,
            column: vec![c64::zero(); size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `array` in place. `array` must be `size` square.
    pub fn process(&mut self, mut array: ArrayViewMut2<c64>) -> Result<(), ImagingError> {
        let size = self.size;
        if array.dim() != (size, size) {
            return Err(ImagingError::BadArrayShape {
                argument: "array".to_string(),
                function: "InverseFft2d::process".to_string(),
                expected: format!("({size}, {size})"),
                received: format!("{:?}", array.dim()),
            });
        }
        if size == 0 {
            return Ok(());
        }

        // Rows. A standard-layout array can be done in one call.
        match array.as_slice_mut() {
            Some(slice) => self.plan.process_with_scratch(slice, &mut self.scratch),
            None => {
                for mut row in array.outer_iter_mut() {
                    for (c, &x) in self.column.iter_mut().zip(row.iter()) {
                        *c = x;
                    }
                    self.plan.process_with_scratch(&mut self.column, &mut self.scratch);
                    for (x, &c) in row.iter_mut().zip(self.column.iter()) {
                        *x = c;
                    }
                }
            }
        }

        // Columns, with the normalisation folded in.
        let norm = 1.0 / (size * size) as f64;
        for mut col in array.columns_mut() {
            for (c, &x) in self.column.iter_mut().zip(col.iter()) {
                *c = x;
            }
            self.plan.process_with_scratch(&mut self.column, &mut self.scratch);
            for (x, &c) in col.iter_mut().zip(self.column.iter()) {
                *x = c * norm;
            }
        }

        Ok(())
    }
}
