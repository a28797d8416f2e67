// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render dirty images and uv coverage as PNGs.

use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use log::debug;
use ndarray::Array2;
use plotters::prelude::*;
use rayon::prelude::*;

use super::PlotError;
use crate::{context::BaselineSet, math::max_abs};

/// The side length of uv coverage plots \[pixels\].
const UV_PIXELS: u32 = 800;

lazy_static::lazy_static! {
    static ref BACKGROUND: RGBColor = WHITE;

    static ref SAMPLE: RGBAColor = BLUE.mix(0.8);
}

/// The PNG that the image of direction `index` is rendered to.
pub fn image_png_path<P: AsRef<Path>>(dir: P, index: usize) -> PathBuf {
    dir.as_ref().join(format!("image_{index}.png"))
}

/// The PNG that the uv coverage of direction `index` is rendered to.
pub fn uv_coverage_png_path<P: AsRef<Path>>(dir: P, index: usize) -> PathBuf {
    dir.as_ref().join(format!("uv_coverage_{index}.png"))
}

fn make_dir(dir: &Path) -> Result<(), PlotError> {
    create_dir_all(dir).map_err(|err| PlotError::CreateDir {
        dir: dir.to_path_buf(),
        err,
    })
}

/// The grey level of a pixel value; values are clamped to [0, 1].
fn grey(value: f64) -> RGBColor {
    // NaN clamps to NaN, and NaN as u8 is 0.
    let level = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(level, level, level)
}

/// Render the image of direction `index` into `dir` in grey-scale, one PNG
/// pixel per image pixel. Rows run down the PNG. Values at or below 0 are
/// black and values at or above 1 are white.
pub fn write_image_png<P: AsRef<Path>>(
    dir: P,
    index: usize,
    image: &Array2<f64>,
) -> Result<PathBuf, PlotError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    let file = image_png_path(dir, index);
    let draw_err = |e: &dyn std::fmt::Display| PlotError::Draw {
        file: file.clone(),
        err: e.to_string(),
    };

    let (rows, cols) = image.dim();
    let root = BitMapBackend::new(&file, (cols as u32, rows as u32)).into_drawing_area();
    for ((row, col), &value) in image.indexed_iter() {
        root.draw_pixel((col as i32, row as i32), &grey(value))
            .map_err(|e| draw_err(&e))?;
    }
    root.present().map_err(|e| draw_err(&e))?;
    drop(root);
    Ok(file)
}

/// Render every image into `dir`, one PNG per direction, in parallel.
pub fn write_images_png<P: AsRef<Path>>(dir: P, images: &[Array2<f64>]) -> Result<(), PlotError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    images
        .par_iter()
        .enumerate()
        .try_for_each(|(i, image)| write_image_png(dir, i, image).map(|_| ()))?;
    debug!("Rendered {} images to {}", images.len(), dir.display());
    Ok(())
}

/// Scatter the (u,v) samples of direction `index` into `dir`. u runs left to
/// right and v bottom to top; the plot spans ±(largest |u| or |v|).
pub fn write_uv_coverage_png<P: AsRef<Path>>(
    dir: P,
    index: usize,
    baselines: &BaselineSet,
) -> Result<PathBuf, PlotError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    let file = uv_coverage_png_path(dir, index);
    let draw_err = |e: &dyn std::fmt::Display| PlotError::Draw {
        file: file.clone(),
        err: e.to_string(),
    };

    let root = BitMapBackend::new(&file, (UV_PIXELS, UV_PIXELS)).into_drawing_area();
    root.fill(&*BACKGROUND).map_err(|e| draw_err(&e))?;

    let extent = max_abs(&baselines.u).max(max_abs(&baselines.v));
    if extent > 0.0 {
        let last = f64::from(UV_PIXELS - 1);
        let to_pixel = |x: f64| ((x / extent + 1.0) / 2.0 * last).round() as i32;
        for (&u, &v) in baselines.u.iter().zip(baselines.v.iter()) {
            if !(u.is_finite() && v.is_finite()) {
                continue;
            }
            let centre = (to_pixel(u), UV_PIXELS as i32 - 1 - to_pixel(v));
            root.draw(&Circle::new(centre, 1, SAMPLE.filled()))
                .map_err(|e| draw_err(&e))?;
        }
    }
    root.present().map_err(|e| draw_err(&e))?;
    drop(root);
    Ok(file)
}

/// Scatter the uv coverage of every direction into `dir`, in parallel.
pub fn write_uv_coverage_all<P: AsRef<Path>>(
    dir: P,
    baselines: &[BaselineSet],
) -> Result<(), PlotError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    baselines
        .par_iter()
        .enumerate()
        .try_for_each(|(i, set)| write_uv_coverage_png(dir, i, set).map(|_| ()))?;
    debug!(
        "Rendered {} uv coverage plots to {}",
        baselines.len(),
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::{read, File};

    use ndarray::array;

    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn is_png(file: &Path) -> bool {
        read(file).map(|b| b.starts_with(&PNG_MAGIC)).unwrap_or(false)
    }

    #[test]
    fn grey_levels_are_clamped() {
        assert_eq!(grey(-3.0), RGBColor(0, 0, 0));
        assert_eq!(grey(0.0), RGBColor(0, 0, 0));
        assert_eq!(grey(0.5), RGBColor(128, 128, 128));
        assert_eq!(grey(1.0), RGBColor(255, 255, 255));
        assert_eq!(grey(7.5), RGBColor(255, 255, 255));
        assert_eq!(grey(f64::NAN), RGBColor(0, 0, 0));
    }

    #[test]
    fn images_are_written_as_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let image = array![[0.0, 0.25, 1.0], [2.0, -1.0, 0.5]];
        let file = write_image_png(dir.path(), 4, &image).unwrap();
        assert_eq!(file, dir.path().join("image_4.png"));
        assert!(is_png(&file));

        let images = vec![Array2::zeros((8, 8)); 3];
        write_images_png(dir.path().join("pngs"), &images).unwrap();
        for i in 0..3 {
            assert!(is_png(&image_png_path(dir.path().join("pngs"), i)));
        }
        assert!(!image_png_path(dir.path().join("pngs"), 3).exists());
    }

    #[test]
    fn uv_coverage_is_written_as_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let sets = vec![
            BaselineSet {
                u: vec![100.0, -100.0, f64::NAN],
                v: vec![30.0, -30.0, 0.0],
                w: vec![0.0; 3],
            },
            // Nothing to draw.
            BaselineSet::default(),
        ];
        write_uv_coverage_all(dir.path(), &sets).unwrap();
        assert!(is_png(&uv_coverage_png_path(dir.path(), 0)));
        assert!(is_png(&uv_coverage_png_path(dir.path(), 1)));
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        File::create(&blocker).unwrap();
        let result = write_image_png(&blocker, 0, &Array2::zeros((1, 1)));
        assert!(matches!(result, Err(PlotError::CreateDir { .. })));
    }
}
