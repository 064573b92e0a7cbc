//! Web server hosting the igv.js viewer and the staged files.
//!
//! ## Endpoints
//!
//! - `GET /` - Viewer page with the configuration embedded
//! - `GET /api/config` - Viewer configuration as JSON
//! - `GET /api/session` - Session the viewer starts from
//! - `POST /api/session` - Save the viewer session (Galaxy with `--dump-session` only)
//! - `GET /<file>` - Any file staged in the serving directory, with range support

pub mod config;
pub mod server;
