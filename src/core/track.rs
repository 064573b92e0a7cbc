use std::path::{Path, PathBuf};

use crate::core::types::TrackType;

/// A track file requested on the command line along with its declared metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// Path to the track file
    pub source_path: PathBuf,

    /// Track type from `--tracks-type`, if any
    pub declared_type: Option<TrackType>,

    /// Track format from `--tracks-format`, if any
    pub declared_format: Option<String>,
}

impl TrackDescriptor {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            declared_type: None,
            declared_format: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, track_type: TrackType) -> Self {
        self.declared_type = Some(track_type);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.declared_format = Some(format.into());
        self
    }

    /// Name under which the track is exposed by the server
    #[must_use]
    pub fn base_name(&self) -> String {
        base_name(&self.source_path)
    }
}

/// Final path component as a string, e.g. `/data/genome.fa` -> `genome.fa`
#[must_use]
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Base name with its last extension removed, e.g. `/data/genome.fa` -> `genome`
#[must_use]
pub fn base_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
