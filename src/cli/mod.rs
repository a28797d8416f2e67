// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code.
//!
//! Only 3 things should be public in this module: `DirtyImager`,
//! `DirtyImager::run`, and `DirtyImagerError`.

mod error;
mod image;
mod synth;

pub use error::DirtyImagerError;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
mod built_info {
    #![allow(dead_code)]
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "Make dirty images of an interferometer's point-source response"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
pub struct DirtyImager {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    Image(image::ImageArgs),

    Synth(synth::SynthArgs),
}

impl DirtyImager {
    pub fn run(self) -> Result<(), DirtyImagerError> {
        let GlobalArgs { verbosity } = self.global_opts;
        // A logger may already be set, e.g. when run from tests.
        if setup_logging(verbosity).is_err() {
            log::debug!("Logging was already initialised");
        }

        let sub_command = match &self.command {
            Command::Image(_) => "image",
            Command::Synth(_) => "synth",
        };
        info!(
            "dirty_imager {} {}",
            sub_command,
            env!("CARGO_PKG_VERSION")
        );
        display_build_info();

        match self.command {
            Command::Image(args) => args.run()?,
            Command::Synth(args) => args.run()?,
        }

        info!("dirty_imager {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// printed at the highest verbosity.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write info-level log lines of how this executable was compiled.
fn display_build_info() {
    use built_info::*;

    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => info!("Compiled on git commit hash: {hash}{dirty}"),
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {hr}");
    }
    info!("            {BUILT_TIME_UTC}");
    info!("         with compiler {RUSTC_VERSION}");
}
