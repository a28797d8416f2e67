// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.

/// Convert a _cross-correlation_ baseline index into its constituent tile
/// indices. Baseline 0 _is not_ between tile 0 and tile 0; it is between tile 0
/// and tile 1.
// Courtesy Brian Crosse.
#[inline]
pub fn cross_correlation_baseline_to_tiles(
    total_num_tiles: usize,
    baseline: usize,
) -> (usize, usize) {
    let n = (total_num_tiles - 1) as f64;
    let bl = baseline as f64;
    let tile1 = (-0.5 * (4.0 * n * (n + 1.0) - 8.0 * bl + 1.0).sqrt() + n + 0.5).floor();
    let tile2 = bl - tile1 * (n - (tile1 + 1.0) / 2.0) + 1.0;
    (tile1 as usize, tile2 as usize)
}

/// The largest absolute value in a slice. An empty slice gives 0. NaNs are
/// ignored.
#[inline]
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, &x| acc.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_correlation_baseline_to_tiles() {
        // Let's pretend we have 128 tiles, therefore 8128 baselines. Check that
        // our function does the right thing.
        for n in [2, 3, 25, 128] {
            let mut bl_index = 0;
            for tile1 in 0..n {
                for tile2 in tile1 + 1..n {
                    let (t1, t2) = cross_correlation_baseline_to_tiles(n, bl_index);
                    assert_eq!(
                        tile1, t1,
                        "Expected tile1 = {tile1}, got {t1}. bl = {bl_index}"
                    );
                    assert_eq!(
                        tile2, t2,
                        "Expected tile2 = {tile2}, got {t2}. bl = {bl_index}"
                    );
                    bl_index += 1;
                }
            }
        }
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs(&[]), 0.0);
        assert_eq!(max_abs(&[-200.0, 100.0, 3.0]), 200.0);
        assert_eq!(max_abs(&[0.5, f64::NAN, -0.25]), 0.5);
    }
}
