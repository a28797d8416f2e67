// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write baselines, images and synthetic inputs as CSV.

use std::{
    fs::{create_dir_all, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use csv::{Writer, WriterBuilder};
use log::debug;
use ndarray::Array2;
use rayon::prelude::*;

use super::WriteError;
use crate::{
    constants::{IMAGE_FILE_STEM, UVW_FILE_STEM},
    context::BaselineSet,
    HADec, XyzGeodetic,
};

/// The file that the baselines of direction `index` are written to.
pub fn uvw_path<P: AsRef<Path>>(dir: P, index: usize) -> PathBuf {
    dir.as_ref().join(format!("{UVW_FILE_STEM}_{index}.csv"))
}

/// The file that the image of direction `index` is written to.
pub fn image_path<P: AsRef<Path>>(dir: P, index: usize) -> PathBuf {
    dir.as_ref().join(format!("{IMAGE_FILE_STEM}_{index}.csv"))
}

fn make_dir(dir: &Path) -> Result<(), WriteError> {
    create_dir_all(dir).map_err(|err| WriteError::CreateDir {
        dir: dir.to_path_buf(),
        err,
    })
}

fn csv_writer(file: &Path) -> Result<Writer<BufWriter<File>>, WriteError> {
    let fh = File::create(file).map_err(|err| WriteError::IO {
        file: file.to_path_buf(),
        err,
    })?;
    Ok(WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(fh)))
}

/// Write a CSV file; `f` fills the writer.
fn write_csv<F>(file: &Path, f: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut Writer<BufWriter<File>>) -> Result<(), csv::Error>,
{
    let mut writer = csv_writer(file)?;
    f(&mut writer).map_err(|err| WriteError::Csv {
        file: file.to_path_buf(),
        err,
    })?;
    writer.flush().map_err(|err| WriteError::IO {
        file: file.to_path_buf(),
        err,
    })
}

/// Write the baselines of direction `index` into `dir` with a `u,v,w` header.
/// `dir` is created if necessary.
pub fn write_uvws<P: AsRef<Path>>(
    dir: P,
    index: usize,
    baselines: &BaselineSet,
) -> Result<PathBuf, WriteError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    let file = uvw_path(dir, index);
    write_csv(&file, |w| {
        w.write_record(["u", "v", "w"])?;
        for uvw in baselines.iter() {
            w.write_record([uvw.u.to_string(), uvw.v.to_string(), uvw.w.to_string()])?;
        }
        Ok(())
    })?;
    Ok(file)
}

/// Write the baselines of every direction into `dir`, one file per direction.
pub fn write_uvws_all<P: AsRef<Path>>(
    dir: P,
    baselines: &[BaselineSet],
) -> Result<(), WriteError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    baselines
        .par_iter()
        .enumerate()
        .try_for_each(|(i, set)| write_uvws(dir, i, set).map(|_| ()))?;
    debug!("Wrote {} uvw files to {}", baselines.len(), dir.display());
    Ok(())
}

/// Write the image of direction `index` into `dir` as rows of comma-separated
/// pixel values, without a header. `dir` is created if necessary.
pub fn write_image<P: AsRef<Path>>(
    dir: P,
    index: usize,
    image: &Array2<f64>,
) -> Result<PathBuf, WriteError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    let file = image_path(dir, index);
    write_csv(&file, |w| {
        for row in image.outer_iter() {
            w.write_record(row.iter().map(|x| x.to_string()))?;
        }
        Ok(())
    })?;
    Ok(file)
}

/// Write every image into `dir`, one file per direction, in parallel.
pub fn write_images<P: AsRef<Path>>(dir: P, images: &[Array2<f64>]) -> Result<(), WriteError> {
    let dir = dir.as_ref();
    make_dir(dir)?;
    images
        .par_iter()
        .enumerate()
        .try_for_each(|(i, image)| write_image(dir, i, image).map(|_| ()))?;
    debug!("Wrote {} images to {}", images.len(), dir.display());
    Ok(())
}

/// Write antenna positions without a header, in the form that
/// [`super::read_antennas`] reads.
pub fn write_antennas<P: AsRef<Path>>(file: P, xyzs: &[XyzGeodetic]) -> Result<(), WriteError> {
    let file = file.as_ref();
    write_csv(file, |w| {
        for xyz in xyzs {
            w.write_record([xyz.x.to_string(), xyz.y.to_string(), xyz.z.to_string()])?;
        }
        Ok(())
    })
}

/// Write directions with a `HA,Dec` header, in the form that
/// [`super::read_directions`] reads.
pub fn write_directions<P: AsRef<Path>>(file: P, directions: &[HADec]) -> Result<(), WriteError> {
    let file = file.as_ref();
    write_csv(file, |w| {
        w.write_record(["HA", "Dec"])?;
        for d in directions {
            w.write_record([d.ha.to_string(), d.dec.to_string()])?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use ndarray::array;

    use super::*;
    use crate::io::{read_antennas, read_directions};

    #[test]
    fn paths() {
        assert_eq!(
            uvw_path("out", 3),
            PathBuf::from("out/uvw_coordinates_3.csv")
        );
        assert_eq!(
            image_path("out", 12),
            PathBuf::from("out/image_data_gpu_12.csv")
        );
    }

    #[test]
    fn uvw_file_has_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let set = BaselineSet {
            u: vec![1.5, -1.5],
            v: vec![0.0, -0.0],
            w: vec![-2.0, 2.0],
        };
        let file = write_uvws(dir.path().join("uvws"), 0, &set).unwrap();
        let contents = read_to_string(file).unwrap();
        assert_eq!(contents, "u,v,w\n1.5,0,-2\n-1.5,-0,2\n");
    }

    #[test]
    fn image_file_has_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let image = array![[0.25, -1.0, 0.0], [3.0, 0.5, 1e-20], [0.0, 0.0, 2.0]];
        let file = write_image(dir.path(), 7, &image).unwrap();
        assert_eq!(file, dir.path().join("image_data_gpu_7.csv"));
        let contents = read_to_string(file).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0.25,-1,0");
        let parsed: Vec<Vec<f64>> = lines
            .iter()
            .map(|l| l.split(',').map(|x| x.parse().unwrap()).collect())
            .collect();
        for (row, parsed_row) in image.outer_iter().zip(parsed.iter()) {
            assert_eq!(row.to_vec(), *parsed_row);
        }
    }

    #[test]
    fn many_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let images: Vec<Array2<f64>> = (0..5)
            .map(|i| Array2::from_elem((2, 2), i as f64))
            .collect();
        write_images(dir.path().join("images"), &images).unwrap();
        for i in 0..5 {
            let contents = read_to_string(image_path(dir.path().join("images"), i)).unwrap();
            assert_eq!(contents, format!("{i},{i}\n{i},{i}\n"));
        }

        let sets = vec![BaselineSet::default(); 3];
        write_uvws_all(dir.path(), &sets).unwrap();
        for i in 0..3 {
            assert_eq!(read_to_string(uvw_path(dir.path(), i)).unwrap(), "u,v,w\n");
        }
    }

    #[test]
    fn inputs_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let xyzs = vec![
            XyzGeodetic::from([1.0, -2.5, 0.125]),
            XyzGeodetic::from([-999.75, 12.0, 9.5]),
        ];
        let directions = vec![
            HADec::from_radians(-3.0, 1.25),
            HADec::from_radians(0.0, -0.5),
        ];
        let xyz_file = dir.path().join("xyz_coordinates.csv");
        let dir_file = dir.path().join("directions.csv");
        write_antennas(&xyz_file, &xyzs).unwrap();
        write_directions(&dir_file, &directions).unwrap();
        assert_eq!(read_antennas(&xyz_file).unwrap(), xyzs);
        assert_eq!(read_directions(&dir_file).unwrap(), directions);
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the directory should be.
        let blocker = dir.path().join("blocker");
        File::create(&blocker).unwrap();
        let result = write_image(&blocker, 0, &Array2::zeros((1, 1)));
        assert!(matches!(result, Err(WriteError::CreateDir { .. })));
    }
}
