// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The dirty_imager binary.

use clap::Parser;

use dirty_imager::DirtyImager;

fn main() {
    if let Err(e) = DirtyImager::parse().run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
