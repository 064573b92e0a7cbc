//! Startup validation of the files and track metadata given on the command line.

use std::path::{Path, PathBuf};

use crate::core::track::TrackDescriptor;
use crate::core::types::TrackType;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No such file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Unspecified track type: {types} track types given for {tracks} tracks")]
    UnspecifiedTrackType { tracks: usize, types: usize },

    #[error("Unspecified track format: {formats} track formats given for {tracks} tracks")]
    UnspecifiedTrackFormat { tracks: usize, formats: usize },

    #[error("[{}]: Unsupported format \"{format}\" for track type \"{track_type}\" (expected one of: {})",
        .path.display(), .track_type.allowed_formats().join(", "))]
    UnsupportedFormat {
        path: PathBuf,
        format: String,
        track_type: TrackType,
    },

    #[error("Invalid IGV session file {}: {source}", .path.display())]
    InvalidSessionFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Check that `path` refers to an existing regular file.
///
/// # Errors
///
/// Returns `ValidationError::MissingFile` if it does not.
pub fn require_file(path: &Path) -> Result<(), ValidationError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ValidationError::MissingFile(path.to_path_buf()))
    }
}

/// Check an optional path, see [`require_file`].
///
/// # Errors
///
/// Returns `ValidationError::MissingFile` if the path is given but is not a file.
pub fn require_optional_file(path: Option<&Path>) -> Result<(), ValidationError> {
    path.map_or(Ok(()), require_file)
}

/// Validate track files against their declared types and formats.
///
/// `types` and `formats` are parallel to `paths` when given. Length mismatches
/// are reported before any file is looked at; after that each track is checked
/// in order for existence and then for type/format compatibility.
///
/// # Errors
///
/// Returns `ValidationError::UnspecifiedTrackType` or
/// `ValidationError::UnspecifiedTrackFormat` on a length mismatch,
/// `ValidationError::MissingFile` if a track file does not exist, or
/// `ValidationError::UnsupportedFormat` if a declared format is not valid
/// for the declared type.
pub fn validate_tracks(
    paths: &[PathBuf],
    types: Option<&[TrackType]>,
    formats: Option<&[String]>,
) -> Result<Vec<TrackDescriptor>, ValidationError> {
    if let Some(types) = types {
        if types.len() != paths.len() {
            return Err(ValidationError::UnspecifiedTrackType {
                tracks: paths.len(),
                types: types.len(),
            });
        }
    }

    if let Some(formats) = formats {
        if formats.len() != paths.len() {
            return Err(ValidationError::UnspecifiedTrackFormat {
                tracks: paths.len(),
                formats: formats.len(),
            });
        }
    }

    let mut tracks = Vec::with_capacity(paths.len());

    for (pos, path) in paths.iter().enumerate() {
        require_file(path)?;

        let declared_type = types.map(|t| t[pos]);
        let declared_format = formats.map(|f| f[pos].clone());

        if let (Some(track_type), Some(format)) = (declared_type, declared_format.as_deref()) {
            if !track_type.supports(format) {
                return Err(ValidationError::UnsupportedFormat {
                    path: path.clone(),
                    format: format.to_string(),
                    track_type,
                });
            }
        }

        tracks.push(TrackDescriptor {
            source_path: path.clone(),
            declared_type,
            declared_format,
        });
    }

    Ok(tracks)
}

/// Load a user supplied igv.js session file, checking that it is valid JSON.
///
/// The content is kept as an opaque JSON value and handed to the viewer as is.
///
/// # Errors
///
/// Returns `ValidationError::MissingFile` if the file does not exist or cannot
/// be read, or `ValidationError::InvalidSessionFile` if it is not valid JSON.
pub fn load_session_file(path: &Path) -> Result<serde_json::Value, ValidationError> {
    require_file(path)?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        tracing::debug!("Failed to read {}: {}", path.display(), e);
        ValidationError::MissingFile(path.to_path_buf())
    })?;

    serde_json::from_str(&content).map_err(|source| ValidationError::InvalidSessionFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, "chr1\t0\t100\n").unwrap();
        path
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_require_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(&dir, "genome.fa");

        assert!(require_file(&path).is_ok());
        assert!(matches!(
            require_file(&dir.path().join("nope.fa")),
            Err(ValidationError::MissingFile(_))
        ));
        // Directories are not regular files
        assert!(matches!(
            require_file(dir.path()),
            Err(ValidationError::MissingFile(_))
        ));
        assert!(require_optional_file(None).is_ok());
    }

    #[test]
    fn test_annotation_bed_track() {
        let dir = tempfile::tempdir().unwrap();
        let peaks = touch(&dir, "peaks.bed");

        let tracks = validate_tracks(
            &[peaks.clone()],
            Some(&[TrackType::Annotation]),
            Some(strings(&["bed"]).as_slice()),
        )
        .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].source_path, peaks);
        assert_eq!(tracks[0].declared_type, Some(TrackType::Annotation));
        assert_eq!(tracks[0].declared_format.as_deref(), Some("bed"));
    }

    #[test]
    fn test_variant_bed_track_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let peaks = touch(&dir, "peaks.bed");

        let err = validate_tracks(
            &[peaks],
            Some(&[TrackType::Variant]),
            Some(strings(&["bed"]).as_slice()),
        )
        .unwrap_err();

        match &err {
            ValidationError::UnsupportedFormat {
                format, track_type, ..
            } => {
                assert_eq!(format, "bed");
                assert_eq!(*track_type, TrackType::Variant);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("peaks.bed"));
        assert!(message.contains("vcf"));
    }

    #[test]
    fn test_all_table_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let track = touch(&dir, "track.dat");
        let all_formats: Vec<&str> = TrackType::ALL
            .iter()
            .flat_map(|t| t.allowed_formats().iter().copied())
            .collect();

        for track_type in TrackType::ALL {
            for format in &all_formats {
                let result = validate_tracks(
                    &[track.clone()],
                    Some(&[track_type]),
                    Some(strings(&[format]).as_slice()),
                );
                if track_type.supports(format) {
                    assert!(result.is_ok(), "{track_type}/{format} should pass");
                } else {
                    assert!(
                        matches!(result, Err(ValidationError::UnsupportedFormat { .. })),
                        "{track_type}/{format} should fail"
                    );
                }
            }
        }
    }

    #[test]
    fn test_length_mismatches() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(&dir, "a.bed");
        let b = touch(&dir, "b.bed");
        let paths = vec![a, b];

        assert!(matches!(
            validate_tracks(&paths, Some(&[TrackType::Annotation]), None),
            Err(ValidationError::UnspecifiedTrackType {
                tracks: 2,
                types: 1
            })
        ));

        assert!(matches!(
            validate_tracks(&paths, None, Some(strings(&["bed", "bed", "bed"]).as_slice())),
            Err(ValidationError::UnspecifiedTrackFormat {
                tracks: 2,
                formats: 3
            })
        ));

        // Types without any track paths are a mismatch as well
        assert!(matches!(
            validate_tracks(&[], Some(&[TrackType::Wig]), None),
            Err(ValidationError::UnspecifiedTrackType { .. })
        ));
    }

    #[test]
    fn test_length_checked_before_existence() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bed");

        assert!(matches!(
            validate_tracks(&[missing], Some(&[]), None),
            Err(ValidationError::UnspecifiedTrackType { .. })
        ));
    }

    #[test]
    fn test_missing_track() {
        let dir = tempfile::tempdir().unwrap();
        let present = touch(&dir, "present.bed");
        let missing = dir.path().join("missing.bed");

        let err = validate_tracks(&[present, missing.clone()], None, None).unwrap_err();
        match err {
            ValidationError::MissingFile(path) => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_or_format_alone() {
        let dir = tempfile::tempdir().unwrap();
        let track = touch(&dir, "reads.bam");

        let tracks = validate_tracks(&[track.clone()], Some(&[TrackType::Variant]), None).unwrap();
        assert_eq!(tracks[0].declared_format, None);

        let tracks = validate_tracks(&[track], None, Some(strings(&["whatever"]).as_slice())).unwrap();
        assert_eq!(tracks[0].declared_type, None);
    }

    #[test]
    fn test_load_session_file() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("session.json");
        std::fs::write(&good, r#"{"genome": "hg38", "tracks": []}"#).unwrap();
        let value = load_session_file(&good).unwrap();
        assert_eq!(value["genome"], "hg38");

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(
            load_session_file(&bad),
            Err(ValidationError::InvalidSessionFile { .. })
        ));

        assert!(matches!(
            load_session_file(&dir.path().join("missing.json")),
            Err(ValidationError::MissingFile(_))
        ));
    }
}
