// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the binary.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use super::*;
use dirty_imager::io::{image_path, read_antennas, read_directions, uvw_path};

const NUM_ANTENNAS: usize = 5;
const NUM_DIRECTIONS: usize = 3;
const IMAGE_SIZE: usize = 32;

/// Synthesise inputs and write a config into a temporary directory.
fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let cmd = dirty_imager_bin()
        .arg("synth")
        .arg("--num-antennas")
        .arg(NUM_ANTENNAS.to_string())
        .arg("--num-directions")
        .arg(NUM_DIRECTIONS.to_string())
        .arg("--output-dir")
        .arg(tmp.path())
        .ok();
    assert!(cmd.is_ok(), "synth failed: {:?}", get_cmd_output(cmd));
    make_file_in_dir(
        "config.json",
        tmp.path(),
        &format!(r#"{{"IMAGE_SIZE": {IMAGE_SIZE}, "PREDEFINED_MAX_UV": 3000.0}}"#),
    );
    tmp
}

fn image_cmd(tmp: &TempDir) -> assert_cmd::Command {
    let mut cmd = dirty_imager_bin();
    cmd.arg("image")
        .arg("--input")
        .arg(tmp.path().join("xyz_coordinates.csv"))
        .arg("--directions")
        .arg(tmp.path().join("directions.csv"))
        .arg("--config")
        .arg(tmp.path().join("config.json"))
        .arg("--image-dir")
        .arg(tmp.path().join("images"))
        .arg("--uvw-dir")
        .arg(tmp.path().join("uvws"));
    cmd
}

#[test]
fn synth_writes_readable_inputs() {
    let tmp = setup();
    let xyzs = read_antennas(tmp.path().join("xyz_coordinates.csv")).unwrap();
    let directions = read_directions(tmp.path().join("directions.csv")).unwrap();
    assert_eq!(xyzs.len(), NUM_ANTENNAS);
    assert_eq!(directions.len(), NUM_DIRECTIONS);
}

#[test]
fn image_writes_everything() {
    let tmp = setup();
    let cmd = image_cmd(&tmp).ok();
    assert!(cmd.is_ok(), "image failed: {:?}", get_cmd_output(cmd));

    let num_uvws = NUM_ANTENNAS * (NUM_ANTENNAS - 1);
    for k in 0..NUM_DIRECTIONS {
        let uvws = read_to_string(uvw_path(tmp.path().join("uvws"), k)).unwrap();
        let mut lines = uvws.lines();
        assert_eq!(lines.next(), Some("u,v,w"));
        assert_eq!(lines.count(), num_uvws);

        let image = read_image_csv(image_path(tmp.path().join("images"), k));
        assert_eq!(image.len(), IMAGE_SIZE);
        assert!(image.iter().all(|row| row.len() == IMAGE_SIZE));
        // Unit visibilities: the centre is the number of samples / S^2.
        assert_abs_diff_eq!(
            image[IMAGE_SIZE / 2][IMAGE_SIZE / 2],
            num_uvws as f64 / (IMAGE_SIZE * IMAGE_SIZE) as f64,
            epsilon = 1e-12
        );
    }
    assert!(!image_path(tmp.path().join("images"), NUM_DIRECTIONS).exists());
}

#[test]
fn image_normalised_and_derived() {
    let tmp = setup();
    let cmd = image_cmd(&tmp)
        .args(["--derived", "--normalise", "--no-save-uvw"])
        .ok();
    assert!(cmd.is_ok(), "image failed: {:?}", get_cmd_output(cmd));
    assert!(!tmp.path().join("uvws").exists());

    for k in 0..NUM_DIRECTIONS {
        let image = read_image_csv(image_path(tmp.path().join("images"), k));
        let peak = image
            .iter()
            .flatten()
            .fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
        assert_abs_diff_eq!(peak, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(image[IMAGE_SIZE / 2][IMAGE_SIZE / 2], 1.0, epsilon = 1e-12);
    }
}

#[test]
fn image_without_saving_images() {
    let tmp = setup();
    let cmd = image_cmd(&tmp).arg("--no-save-images").ok();
    assert!(cmd.is_ok(), "image failed: {:?}", get_cmd_output(cmd));
    assert!(!tmp.path().join("images").exists());
    assert!(uvw_path(tmp.path().join("uvws"), 0).exists());
}

#[test]
fn missing_input_fails() {
    let tmp = setup();
    std::fs::remove_file(tmp.path().join("xyz_coordinates.csv")).unwrap();
    let cmd = image_cmd(&tmp).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("xyz_coordinates.csv"), "{stderr}");
}

#[test]
fn missing_directions_fails() {
    let tmp = setup();
    std::fs::remove_file(tmp.path().join("directions.csv")).unwrap();
    assert!(image_cmd(&tmp).ok().is_err());
}

#[test]
fn bad_config_fails() {
    let tmp = setup();
    make_file_in_dir("config.json", tmp.path(), r#"{"IMAGE_SIZE": 32"#);
    assert!(image_cmd(&tmp).ok().is_err());

    make_file_in_dir(
        "config.json",
        tmp.path(),
        r#"{"IMAGE_SIZE": -1, "PREDEFINED_MAX_UV": 3000.0}"#,
    );
    let cmd = image_cmd(&tmp).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("IMAGE_SIZE"), "{stderr}");

    std::fs::remove_file(tmp.path().join("config.json")).unwrap();
    assert!(image_cmd(&tmp).ok().is_err());
}

#[test]
fn no_subcommand_fails() {
    assert!(dirty_imager_bin().ok().is_err());
}

#[cfg(feature = "plotting")]
#[test]
fn image_renders_pngs() {
    use dirty_imager::io::plot::{image_png_path, uv_coverage_png_path};

    let tmp = setup();
    let cmd = image_cmd(&tmp).args(["--png", "--normalise"]).ok();
    assert!(cmd.is_ok(), "image failed: {:?}", get_cmd_output(cmd));
    for k in 0..NUM_DIRECTIONS {
        let png = std::fs::read(image_png_path(tmp.path().join("images"), k)).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        assert!(uv_coverage_png_path(tmp.path().join("uvws"), k).exists());
        // The CSVs are still written.
        assert!(image_path(tmp.path().join("images"), k).exists());
    }
}

#[cfg(not(feature = "plotting"))]
#[test]
fn png_needs_the_plotting_feature() {
    let tmp = setup();
    let cmd = image_cmd(&tmp).arg("--png").ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("plotting"), "{stderr}");
    // Nothing was imaged.
    assert!(!tmp.path().join("images").exists());
}
