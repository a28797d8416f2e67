// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Imaging configuration.
//!
//! An [`ImagingConfig`] is normally read from a JSON file like:
//!
//! ```json
//! {
//!     "IMAGE_SIZE": 256,
//!     "PREDEFINED_MAX_UV": 3000.0
//! }
//! ```
//!
//! `REFERENCE_WAVELENGTH` and `OVERSAMPLING` may also be given; they control
//! the pixel resolution in derived mode (see [`crate::imaging::ExtentPolicy`]).
//!
//! The imaging functions take their parameters explicitly. For callers that
//! would rather have a process-wide configuration, [`set_global`] and
//! [`global`] hold a copy of a validated record.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::RwLock,
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    constants::{DEFAULT_IMAGE_SIZE, DEFAULT_PREDEFINED_MAX_UV, OVERSAMPLING, REFERENCE_WAVELENGTH},
    imaging::ExtentPolicy,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read config file {}: {err}", file.display())]
    IO {
        file: PathBuf,
        err: std::io::Error,
    },

    #[error("Couldn't decode json structure from {}: {err}", file.display())]
    Json {
        file: PathBuf,
        err: serde_json::Error,
    },

    #[error("IMAGE_SIZE must be a positive integer, but got {0}")]
    NonPositiveImageSize(i64),

    #[error("PREDEFINED_MAX_UV must be positive and finite, but got {0}")]
    NonPositiveMaxUv(f64),

    #[error("{name} must be positive and finite, but got {value}")]
    BadParameter { name: &'static str, value: f64 },
}

/// The numbers needed to make images. Only made from a validated file or
/// string, or by hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagingConfig {
    /// The side length of every (square) grid and image \[pixels\].
    pub image_size: usize,

    /// The uv half-extent of the grid when not deriving it from the data.
    pub predefined_max_uv: f64,

    /// The numerator of the derived pixel resolution.
    pub reference_wavelength: f64,

    /// The denominator of the derived pixel resolution.
    pub oversampling: f64,
}

fn default_reference_wavelength() -> f64 {
    REFERENCE_WAVELENGTH
}

fn default_oversampling() -> f64 {
    OVERSAMPLING
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            predefined_max_uv: DEFAULT_PREDEFINED_MAX_UV,
            reference_wavelength: REFERENCE_WAVELENGTH,
            oversampling: OVERSAMPLING,
        }
    }
}

/// What's actually in the file. The image size is signed here so that
/// negative values give a useful error rather than a serde one.
#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawConfig {
    image_size: i64,
    predefined_max_uv: f64,
    #[serde(default = "default_reference_wavelength")]
    reference_wavelength: f64,
    #[serde(default = "default_oversampling")]
    oversampling: f64,
}

impl ImagingConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(file: P) -> Result<ImagingConfig, ConfigError> {
        let file = file.as_ref();
        debug!("Attempting to parse config file {}", file.display());
        let fh = File::open(file).map_err(|err| ConfigError::IO {
            file: file.to_path_buf(),
            err,
        })?;
        let raw: RawConfig =
            serde_json::from_reader(BufReader::new(fh)).map_err(|err| ConfigError::Json {
                file: file.to_path_buf(),
                err,
            })?;
        Self::from_raw(raw)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(s: &str) -> Result<ImagingConfig, ConfigError> {
        let raw: RawConfig = serde_json::from_str(s).map_err(|err| ConfigError::Json {
            file: PathBuf::from("<string>"),
            err,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<ImagingConfig, ConfigError> {
        if raw.image_size <= 0 {
            return Err(ConfigError::NonPositiveImageSize(raw.image_size));
        }
        let config = ImagingConfig {
            image_size: raw.image_size as usize,
            predefined_max_uv: raw.predefined_max_uv,
            reference_wavelength: raw.reference_wavelength,
            oversampling: raw.oversampling,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that all numbers are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_size == 0 {
            return Err(ConfigError::NonPositiveImageSize(0));
        }
        if !(self.predefined_max_uv > 0.0 && self.predefined_max_uv.is_finite()) {
            return Err(ConfigError::NonPositiveMaxUv(self.predefined_max_uv));
        }
        for (name, value) in [
            ("REFERENCE_WAVELENGTH", self.reference_wavelength),
            ("OVERSAMPLING", self.oversampling),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::BadParameter { name, value });
            }
        }
        Ok(())
    }

    /// The extent policy that uses the configured `PREDEFINED_MAX_UV`.
    pub fn predefined_extent(&self) -> ExtentPolicy {
        ExtentPolicy::Predefined {
            half_extent: self.predefined_max_uv,
        }
    }

    /// The extent policy that derives the half-extent from the data with the
    /// configured reference wavelength and oversampling.
    pub fn derived_extent(&self) -> ExtentPolicy {
        ExtentPolicy::Derived {
            reference_wavelength: self.reference_wavelength,
            oversampling: self.oversampling,
        }
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_CONFIG: RwLock<Option<ImagingConfig>> = RwLock::new(None);
}

/// Validate a configuration and make it the process-wide one.
pub fn set_global(config: ImagingConfig) -> Result<(), ConfigError> {
    config.validate()?;
    let mut guard = GLOBAL_CONFIG.write().unwrap_or_else(|e| e.into_inner());
    *guard = Some(config);
    Ok(())
}

/// Load a JSON configuration file and make it the process-wide one.
pub fn load_global<P: AsRef<Path>>(file: P) -> Result<ImagingConfig, ConfigError> {
    let config = ImagingConfig::from_json_file(file)?;
    set_global(config)?;
    Ok(config)
}

/// Get the process-wide configuration. If nothing has been set, the defaults
/// are returned.
pub fn global() -> ImagingConfig {
    let config = *GLOBAL_CONFIG.read().unwrap_or_else(|e| e.into_inner());
    config.unwrap_or_default()
}

/// Forget the process-wide configuration.
pub fn clear_global() {
    let mut guard = GLOBAL_CONFIG.write().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}
