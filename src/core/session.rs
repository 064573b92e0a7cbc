use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::track::{base_name, base_stem, TrackDescriptor};
use crate::core::types::{TrackType, IGV_VERSION};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode session: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reference genome entry of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReference {
    pub id: String,
    pub name: String,

    #[serde(rename = "fastaURL")]
    pub fasta_url: String,

    #[serde(rename = "indexURL", default, skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,

    /// Present (and false) only when no index was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

/// One track of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTrack {
    pub name: String,
    pub url: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub track_type: Option<TrackType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl From<&TrackDescriptor> for SessionTrack {
    fn from(track: &TrackDescriptor) -> Self {
        let name = track.base_name();
        Self {
            url: name.clone(),
            name,
            track_type: track.declared_type,
            format: track.declared_format.clone(),
        }
    }
}

/// An igv.js session: the reference, its optional index and cytoband, and tracks.
///
/// All URLs are base names, resolved by the browser relative to the serving root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDocument {
    pub version: String,

    pub reference: SessionReference,

    #[serde(rename = "cytobandURL", default, skip_serializing_if = "Option::is_none")]
    pub cytoband_url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<SessionTrack>,

    pub whole_genome_view: bool,
}

impl SessionDocument {
    /// Build a session for a reference file and its companion files.
    ///
    /// Only path names are used, the files themselves are not touched.
    #[must_use]
    pub fn build(
        reference: &Path,
        index: Option<&Path>,
        cytoband: Option<&Path>,
        tracks: &[TrackDescriptor],
    ) -> Self {
        let stem = base_stem(reference);
        let index_url = index.map(base_name);

        Self {
            version: IGV_VERSION.to_string(),
            reference: SessionReference {
                id: stem.clone(),
                name: stem,
                fasta_url: base_name(reference),
                indexed: if index_url.is_some() { None } else { Some(false) },
                index_url,
            },
            cytoband_url: cytoband.map(base_name),
            tracks: tracks.iter().map(SessionTrack::from).collect(),
            whole_genome_view: true,
        }
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write a session to `path`, replacing any existing file
///
/// # Errors
///
/// Returns `SessionError::Io` if the file cannot be written.
pub fn write_session(session: &SessionDocument, path: &Path) -> Result<(), SessionError> {
    let json = session.to_json()?;
    std::fs::write(path, json).map_err(|source| SessionError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read a session previously written by [`write_session`]
///
/// # Errors
///
/// Returns `SessionError::Io` if the file cannot be read or
/// `SessionError::Json` if it is not a valid session.
pub fn read_session(path: &Path) -> Result<SessionDocument, SessionError> {
    let content = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_only() {
        let session = SessionDocument::build(Path::new("/data/genome.fa"), None, None, &[]);

        assert_eq!(session.reference.id, "genome");
        assert_eq!(session.reference.name, "genome");
        assert_eq!(session.reference.fasta_url, "genome.fa");
        assert_eq!(session.reference.indexed, Some(false));
        assert!(session.reference.index_url.is_none());
        assert!(session.whole_genome_view);

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            json!({
                "version": IGV_VERSION,
                "reference": {
                    "id": "genome",
                    "name": "genome",
                    "fastaURL": "genome.fa",
                    "indexed": false
                },
                "wholeGenomeView": true
            })
        );
    }

    #[test]
    fn test_with_index_and_cytoband() {
        let session = SessionDocument::build(
            Path::new("/data/hg38.fa"),
            Some(Path::new("/idx/hg38.fa.fai")),
            Some(Path::new("/other/cytoBandIdeo.txt")),
            &[],
        );

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["reference"]["indexURL"], "hg38.fa.fai");
        assert!(value["reference"].get("indexed").is_none());
        assert_eq!(value["cytobandURL"], "cytoBandIdeo.txt");
        assert!(value.get("tracks").is_none());
    }

    #[test]
    fn test_tracks_keep_order_and_optional_fields() {
        let tracks = vec![
            TrackDescriptor::new("/a/peaks.bed")
                .with_type(TrackType::Annotation)
                .with_format("bed"),
            TrackDescriptor::new("/b/reads.bam"),
            TrackDescriptor::new("/c/calls.vcf").with_type(TrackType::Variant),
        ];
        let session = SessionDocument::build(Path::new("genome.fa"), None, None, &tracks);

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value["tracks"],
            json!([
                {"name": "peaks.bed", "url": "peaks.bed", "type": "annotation", "format": "bed"},
                {"name": "reads.bam", "url": "reads.bam"},
                {"name": "calls.vcf", "url": "calls.vcf", "type": "variant"}
            ])
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let tracks = vec![TrackDescriptor::new("peaks.bed").with_format("bed")];
        let first = SessionDocument::build(
            Path::new("genome.fa"),
            Some(Path::new("genome.fa.fai")),
            None,
            &tracks,
        );
        let second = SessionDocument::build(
            Path::new("genome.fa"),
            Some(Path::new("genome.fa.fai")),
            None,
            &tracks,
        );
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_write_and_read_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let tracks = vec![TrackDescriptor::new("peaks.bed")
            .with_type(TrackType::Annotation)
            .with_format("bed")];
        let session = SessionDocument::build(
            Path::new("genome.fa"),
            Some(Path::new("genome.fa.fai")),
            Some(Path::new("cytoband.txt")),
            &tracks,
        );

        write_session(&session, &path).unwrap();
        assert_eq!(read_session(&path).unwrap(), session);
    }

    #[test]
    fn test_read_session_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_session(&missing),
            Err(SessionError::Io { .. })
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"version\": ").unwrap();
        assert!(matches!(read_session(&broken), Err(SessionError::Json(_))));
    }
}
