//! Startup sequence: validate inputs, then either write the session file and
//! exit, or stage the inputs and start the web server.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::core::session::{write_session, SessionDocument};
use crate::core::track::TrackDescriptor;
use crate::parsing::fai::{is_fai_path, summarize_fai_file};
use crate::utils::staging::{prepare_root, stage_file};
use crate::utils::validation::{
    load_session_file, require_optional_file, validate_tracks, ValidationError,
};
use crate::web::config::ViewerConfig;
use crate::web::server::{self, AppState, ServeOptions};

/// Command-line inputs after every check has passed
#[derive(Debug, Clone)]
pub struct ValidatedInputs {
    pub reference: Option<PathBuf>,
    pub index: Option<PathBuf>,
    pub cytoband: Option<PathBuf>,
    pub tracks: Vec<TrackDescriptor>,

    /// Content of `--igv-session`, already checked to be JSON
    pub igv_session: Option<serde_json::Value>,
}

impl ValidatedInputs {
    /// Check every file given on the command line.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn from_cli(cli: &Cli) -> Result<Self, ValidationError> {
        require_optional_file(cli.input.as_deref())?;
        require_optional_file(cli.index.as_deref())?;
        require_optional_file(cli.cytoband.as_deref())?;

        let tracks = validate_tracks(
            &cli.tracks_path,
            cli.tracks_type.as_deref(),
            cli.tracks_format.as_deref(),
        )?;

        let igv_session = cli
            .igv_session
            .as_deref()
            .map(load_session_file)
            .transpose()?;

        Ok(Self {
            reference: cli.input.clone(),
            index: cli.index.clone(),
            cytoband: cli.cytoband.clone(),
            tracks,
            igv_session,
        })
    }

    /// Session for the reference and its companion files, if a reference was given
    #[must_use]
    pub fn build_session(&self) -> Option<SessionDocument> {
        self.reference.as_deref().map(|reference| {
            SessionDocument::build(
                reference,
                self.index.as_deref(),
                self.cytoband.as_deref(),
                &self.tracks,
            )
        })
    }

    /// Every file that has to be reachable from the viewer, in staging order
    fn staged_paths(&self) -> Vec<&Path> {
        self.reference
            .iter()
            .chain(self.index.iter())
            .chain(self.cytoband.iter())
            .map(PathBuf::as_path)
            .chain(self.tracks.iter().map(|t| t.source_path.as_path()))
            .collect()
    }
}

/// Run igv-tool
///
/// # Errors
///
/// Returns an error if validation, staging, writing the session, or the server fails.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let inputs = ValidatedInputs::from_cli(&cli)?;

    if let Some(dump_path) = &cli.dump_session {
        if dump_path.exists() {
            tracing::warn!(
                "The output IGV session file already exists and will be overwritten: {}",
                dump_path.display()
            );
        }
    }

    if cli.run_it {
        return dump_session(&inputs, cli.dump_session.as_deref());
    }

    log_index_summary(inputs.index.as_deref());

    if inputs.reference.is_none() && !inputs.staged_paths().is_empty() {
        tracing::warn!("No --input reference given, staged files are not added to the session");
    }

    prepare_root(&cli.static_dir)?;
    for path in inputs.staged_paths() {
        stage_file(path, &cli.static_dir)?;
    }

    let config = viewer_config(&cli, &inputs)?;
    let state = AppState::new(config, cli.static_dir.clone())?;

    server::run(
        state,
        ServeOptions {
            host: cli.host,
            port: cli.port,
            open: cli.open,
        },
    )
}

/// Write the session built from the inputs and stop, without staging or serving
fn dump_session(inputs: &ValidatedInputs, dump_path: Option<&Path>) -> anyhow::Result<()> {
    let (Some(session), Some(dump_path)) = (inputs.build_session(), dump_path) else {
        anyhow::bail!("--run-it needs both --input and --dump-session");
    };

    write_session(&session, dump_path)?;
    tracing::info!("Wrote IGV session to {}", dump_path.display());

    Ok(())
}

/// Configuration for the viewer page.
///
/// A `--igv-session` file takes precedence over the session built from the inputs.
fn viewer_config(cli: &Cli, inputs: &ValidatedInputs) -> anyhow::Result<ViewerConfig> {
    let mut config = ViewerConfig::new();

    if let Some(session) = &inputs.igv_session {
        config = config.with_session(session.clone());
    } else if let Some(session) = inputs.build_session() {
        config = config.with_built_session(&session)?;
    }

    if cli.gxit {
        config = config.with_gxit(cli.dump_session.clone());
    } else if cli.dump_session.is_some() {
        tracing::warn!("--dump-session is only used together with --gxit");
    }

    Ok(config)
}

fn log_index_summary(index: Option<&Path>) {
    let Some(index) = index.filter(|p| is_fai_path(p)) else {
        return;
    };

    match summarize_fai_file(index) {
        Ok(summary) => tracing::info!(
            "Reference index lists {} sequences, {} bp in total",
            summary.contig_count(),
            summary.total_length
        ),
        Err(e) => tracing::warn!(
            "Could not read FASTA index {}, igv.js may fail to load it: {}",
            index.display(),
            e
        ),
    }
}
