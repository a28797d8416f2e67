// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Handle (hour angle, declination) coordinates.

/// A struct containing an Hour Angle and Declination. All units are in radians.
///
/// Each of these is a "direction" that we image; a list of them is imaged
/// against a single antenna layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub struct HADec {
    /// Hour angle \[radians\]
    pub ha: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl HADec {
    /// Make a new [`HADec`] struct from values in radians.
    pub fn from_radians(ha: f64, dec: f64) -> HADec {
        Self { ha, dec }
    }

    /// Make a new [`HADec`] struct from values in degrees.
    pub fn from_degrees(ha: f64, dec: f64) -> HADec {
        Self {
            ha: ha.to_radians(),
            dec: dec.to_radians(),
        }
    }

    /// Get the `sin` and `cos` of the hour angle and declination, in the order
    /// `(s_ha, c_ha, s_dec, c_dec)`. Handy for tight loops over baselines.
    pub fn sin_cos(self) -> (f64, f64, f64, f64) {
        let (s_ha, c_ha) = self.ha.sin_cos();
        let (s_dec, c_dec) = self.dec.sin_cos();
        (s_ha, c_ha, s_dec, c_dec)
    }
}

impl std::fmt::Display for HADec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}°, {}°)", self.ha.to_degrees(), self.dec.to_degrees())
    }
}

#[cfg(any(test, feature = "approx"))]
impl approx::AbsDiffEq for HADec {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::abs_diff_eq(&self.ha, &other.ha, epsilon)
            && f64::abs_diff_eq(&self.dec, &other.dec, epsilon)
    }
}
