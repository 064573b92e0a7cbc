//! # igv-tool
//!
//! A launcher for the [igv.js](https://github.com/igvteam/igv.js) genome viewer.
//!
//! Given a reference FASTA and optional index, cytoband and track files,
//! `igv-tool` checks that every file exists and that each track's declared type
//! and format are a combination igv.js understands. It then links the files into
//! a served directory, builds the igv.js session describing them, and starts a
//! web server hosting the viewer. Alternatively the session can be written to a
//! file without starting the server, which is how Galaxy uses the tool.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use igv_tool::{SessionDocument, TrackType};
//! use igv_tool::utils::validation::validate_tracks;
//!
//! let tracks = validate_tracks(
//!     &[Path::new("peaks.bed").to_path_buf()],
//!     Some(&[TrackType::Annotation]),
//!     Some(&["bed".to_string()]),
//! )
//! .unwrap();
//!
//! let session = SessionDocument::build(Path::new("genome.fa"), None, None, &tracks);
//! println!("{}", session.to_json().unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Track types, track descriptors and the session document
//! - [`utils`]: Input validation and staging of files into the served directory
//! - [`parsing`]: FASTA index reader
//! - [`cli`]: Command-line interface and startup sequence
//! - [`web`]: Web server for the viewer

pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::session::SessionDocument;
pub use core::track::TrackDescriptor;
pub use core::types::{TrackType, IGV_VERSION};
pub use utils::staging::StagingError;
pub use utils::validation::ValidationError;
