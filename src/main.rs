//! # ipasc
//!
//! Command-line tool for IPASC photoacoustic data files.
//!
//! ## Usage
//!
//! ```bash
//! # Write a synthetic recording
//! ipasc demo demo.ipasc
//!
//! # Dump metadata and tensor layout
//! ipasc inspect demo.ipasc
//!
//! # Structural and metadata validation
//! ipasc validate demo.ipasc
//!
//! # Completeness and consistency report
//! ipasc check demo.ipasc
//!
//! # Rewrite a legacy four-axis file in the current layout
//! ipasc migrate old.ipasc new.ipasc
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
