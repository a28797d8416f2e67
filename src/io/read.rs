// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Read antenna layouts and directions from CSV files.
//!
//! Antenna files have no header and one `x,y,z` triple \[metres\] per line.
//! Direction files have a header line followed by one `HA,Dec` pair
//! \[radians\] per line. In both, lines that don't parse are skipped (with a
//! warning) rather than treated as errors; only a missing or unreadable file is
//! an error.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};

use super::ReadError;
use crate::{HADec, XyzGeodetic};

/// Parse the first `N` fields of a record as floats.
fn parse_fields<const N: usize>(record: &StringRecord) -> Option<[f64; N]> {
    if record.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (o, field) in out.iter_mut().zip(record.iter()) {
        *o = field.parse().ok()?;
    }
    Some(out)
}

/// Read records from `reader`, keeping those that `parse` accepts.
fn read_records<R, T, F>(
    reader: R,
    has_header: bool,
    description: &str,
    parse: F,
) -> Result<Vec<T>, csv::Error>
where
    R: Read,
    F: Fn(&StringRecord) -> Option<T>,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut out = vec![];
    let mut num_skipped = 0;
    for result in csv_reader.records() {
        let record = match result {
            Ok(r) => r,
            // A line that isn't valid UTF-8 is just a bad line.
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                debug!("Skipping unreadable {description} line: {e}");
                num_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        match parse(&record) {
            Some(t) => out.push(t),
            None => {
                debug!(
                    "Skipping unparsable {description} line {}: {:?}",
                    record.position().map(|p| p.line()).unwrap_or(0),
                    record
                );
                num_skipped += 1;
            }
        }
    }
    if num_skipped > 0 {
        warn!("Skipped {num_skipped} unparsable {description} lines");
    }
    Ok(out)
}

/// Read antenna positions from anything readable.
pub fn read_antennas_from<R: Read>(reader: R) -> Result<Vec<XyzGeodetic>, csv::Error> {
    read_records(reader, false, "antenna", |r| {
        parse_fields::<3>(r).map(XyzGeodetic::from)
    })
}

/// Read directions from anything readable. The first line is a header.
pub fn read_directions_from<R: Read>(reader: R) -> Result<Vec<HADec>, csv::Error> {
    read_records(reader, true, "direction", |r| {
        parse_fields::<2>(r).map(|[ha, dec]| HADec::from_radians(ha, dec))
    })
}

/// Read antenna positions from a CSV file.
pub fn read_antennas<P: AsRef<Path>>(file: P) -> Result<Vec<XyzGeodetic>, ReadError> {
    let file = file.as_ref();
    let fh = File::open(file).map_err(|err| ReadError::Open {
        file: file.to_path_buf(),
        err,
    })?;
    let xyzs = read_antennas_from(fh).map_err(|err| ReadError::Csv {
        file: file.to_path_buf(),
        err,
    })?;
    debug!("Read {} antennas from {}", xyzs.len(), file.display());
    Ok(xyzs)
}

/// Read directions from a CSV file with a header line.
pub fn read_directions<P: AsRef<Path>>(file: P) -> Result<Vec<HADec>, ReadError> {
    let file = file.as_ref();
    let fh = File::open(file).map_err(|err| ReadError::Open {
        file: file.to_path_buf(),
        err,
    })?;
    let directions = read_directions_from(fh).map_err(|err| ReadError::Csv {
        file: file.to_path_buf(),
        err,
    })?;
    debug!(
        "Read {} directions from {}",
        directions.len(),
        file.display()
    );
    Ok(directions)
}
