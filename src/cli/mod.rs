//! Command-line interface for igv-tool.
//!
//! ## Usage
//!
//! ```text
//! # Serve a reference with its index and a BED track
//! igv-tool --input genome.fa --index genome.fa.fai \
//!     --tracks-path peaks.bed --tracks-type annotation --tracks-format bed
//!
//! # Start from an existing igv.js session
//! igv-tool --input genome.fa --igv-session session.json --port 8080 --open
//!
//! # Write the session file only (Galaxy)
//! igv-tool --gxit --input genome.fa --dump-session session.json --run-it
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::core::types::TrackType;

pub mod launch;

#[derive(Parser, Debug)]
#[command(name = "igv-tool")]
#[command(author = "Fabio Cumbo")]
#[command(version)]
#[command(about = "Web server rendering genome files with igv.js")]
#[command(
    long_about = "igv-tool stages a reference genome and its tracks in a served directory and opens them in an igv.js viewer.\n\nTrack types and formats are checked before anything is linked or served, and the resulting igv.js session can be written to a file instead of starting the server."
)]
pub struct Cli {
    /// Webserver host address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Webserver port number
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Path to the input fasta file
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Path to the input fasta index file
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Path to the input cytoband file
    #[arg(long)]
    pub cytoband: Option<PathBuf>,

    /// Path to one or more input track files
    #[arg(long = "tracks-path", num_args = 1.., value_name = "PATH")]
    pub tracks_path: Vec<PathBuf>,

    /// Type of input track files, one per track
    #[arg(long = "tracks-type", num_args = 1.., value_enum, value_name = "TYPE")]
    pub tracks_type: Option<Vec<TrackType>>,

    /// Format of input track files, one per track
    #[arg(long = "tracks-format", num_args = 1.., value_name = "FORMAT")]
    pub tracks_format: Option<Vec<String>>,

    /// Path to the json igv session file
    #[arg(long = "igv-session", value_name = "PATH")]
    pub igv_session: Option<PathBuf>,

    /// Run the webserver with debug logging
    #[arg(long)]
    pub debug: bool,

    /// The webserver has been started from Galaxy
    #[arg(long, visible_alias = "galaxy-interactive-tool")]
    pub gxit: bool,

    /// Dump the IGV session to a json file
    #[arg(long = "dump-session", value_name = "PATH")]
    pub dump_session: Option<PathBuf>,

    /// Generate the session file and exit without starting the webserver
    #[arg(long = "run-it", requires = "dump_session", requires = "input")]
    pub run_it: bool,

    /// Directory the input files are linked into and served from
    #[arg(long = "static-dir", default_value = "static", value_name = "DIR")]
    pub static_dir: PathBuf,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}
