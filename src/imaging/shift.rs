// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Move the zero-frequency element of a 2D array between the origin and the
//! centre.
//!
//! [`quadrant_shift`] moves element (i, j) to ((i + rows/2) % rows, (j +
//! cols/2) % cols). When both dimensions are even, this swaps the quadrants
//! diagonally and is its own inverse. [`inverse_quadrant_shift`] undoes
//! [`quadrant_shift`] for any dimensions; for even dimensions the two are
//! identical.

use ndarray::ArrayViewMut2;

/// Cyclically shift `array` by (`row_shift`, `col_shift`) in place.
fn roll<T: Clone>(mut array: ArrayViewMut2<T>, row_shift: usize, col_shift: usize) {
    let (rows, cols) = array.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    if rows % 2 == 0 && cols % 2 == 0 && row_shift == rows / 2 && col_shift == cols / 2 {
        // Every element in the top half swaps with exactly one element in the
        // bottom half.
        for i in 0..row_shift {
            for j in 0..cols {
                array.swap((i, j), (i + row_shift, (j + col_shift) % cols));
            }
        }
    } else {
        let original = array.to_owned();
        for ((i, j), value) in original.indexed_iter() {
            array[((i + row_shift) % rows, (j + col_shift) % cols)] = value.clone();
        }
    }
}

/// Move the element at the origin to the centre, in place.
pub fn quadrant_shift<T: Clone>(array: ArrayViewMut2<T>) {
    let (rows, cols) = array.dim();
    roll(array, rows / 2, cols / 2);
}

/// Move the element at the centre to the origin, in place. This is the inverse
/// of [`quadrant_shift`].
pub fn inverse_quadrant_shift<T: Clone>(array: ArrayViewMut2<T>) {
    let (rows, cols) = array.dim();
    roll(array, rows - rows / 2, cols - cols / 2);
}
