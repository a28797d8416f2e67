// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Library-level tests that go through files.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use super::*;
use dirty_imager::{
    dirty_image,
    io::{image_path, read_antennas, read_directions, write_images, write_uvws_all},
    ExtentPolicy, HADec, ImagingConfig, ObsContext,
};

#[test]
fn hand_written_inputs_to_images() {
    let tmp = TempDir::new().unwrap();
    let xyz_file = make_file_in_dir(
        "xyz.csv",
        tmp.path(),
        "0,0,0\n100,0,0\nthis line is junk\n0,100,0\n",
    );
    let directions_file = make_file_in_dir(
        "directions.csv",
        tmp.path(),
        "HA,Dec\n0.0,1.5707963267948966\n0.5,-0.5\n",
    );
    let config_file = make_file_in_dir(
        "config.json",
        tmp.path(),
        r#"{"IMAGE_SIZE": 16, "PREDEFINED_MAX_UV": 250.0}"#,
    );

    let config = ImagingConfig::from_json_file(config_file).unwrap();
    let context = ObsContext::new(
        read_antennas(xyz_file).unwrap(),
        read_directions(directions_file).unwrap(),
    );
    assert_eq!(context.num_ants(), 3);
    assert_eq!(context.num_directions(), 2);

    let baselines = context.compute_uvw();
    write_uvws_all(tmp.path().join("uvws"), &baselines).unwrap();
    let images = context
        .image(
            &baselines,
            &context.unit_visibilities(),
            config.image_size,
            config.predefined_extent(),
        )
        .unwrap();
    write_images(tmp.path().join("images"), &images).unwrap();

    for (k, image) in images.iter().enumerate() {
        let read = read_image_csv(image_path(tmp.path().join("images"), k));
        for (row, read_row) in image.outer_iter().zip(read.iter()) {
            assert_eq!(row.to_vec(), *read_row);
        }
        assert_abs_diff_eq!(image[(8, 8)], 6.0 / 256.0, epsilon = 1e-12);
    }
}

#[test]
fn derived_extent_is_shared_between_directions() {
    // At the zenith the first direction's baselines have |u| up to 100 m; at a
    // different hour angle the second direction's are shorter in u.
    let context = ObsContext::new(
        vec![
            [0.0, 0.0, 0.0].into(),
            [0.0, 100.0, 0.0].into(),
            [0.0, 0.0, 50.0].into(),
        ],
        vec![
            HADec::from_radians(0.0, 0.0),
            HADec::from_radians(1.2, 0.3),
        ],
    );
    let baselines = context.compute_uvw();
    let vis = context.unit_visibilities();
    let batch = context
        .image(&baselines, &vis, 16, ExtentPolicy::derived())
        .unwrap();

    // Imaging the second direction on its own derives a different extent.
    let alone = dirty_image(
        &vis[1],
        &baselines[1].u,
        &baselines[1].v,
        16,
        ExtentPolicy::derived(),
    )
    .unwrap();
    assert_ne!(batch[1], alone);
}
