//! Symlinking input files into the directory served by the web server.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("Failed to create serving directory {}: {source}", .root.display())]
    Root {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to link {} into {}: {source}", .source_path.display(), .destination.display())]
    Link {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Create the serving directory if it does not exist yet.
///
/// # Errors
///
/// Returns `StagingError::Root` if the directory cannot be created.
pub fn prepare_root(root: &Path) -> Result<(), StagingError> {
    std::fs::create_dir_all(root).map_err(|source| StagingError::Root {
        root: root.to_path_buf(),
        source,
    })
}

/// Make `source` reachable under `root` through a symlink named after its base name.
///
/// Returns the path of the link. If something already exists at that path it
/// is left untouched; a link pointing somewhere else is only reported.
///
/// # Errors
///
/// Returns `StagingError::Link` if the source cannot be resolved or the link
/// cannot be created.
pub fn stage_file(source: &Path, root: &Path) -> Result<PathBuf, StagingError> {
    let link_error = |destination: &Path, e: std::io::Error| StagingError::Link {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source: e,
    };

    let Some(file_name) = source.file_name() else {
        return Err(link_error(
            root,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };
    let destination = root.join(file_name);

    // symlink_metadata so that a dangling link also counts as present
    if destination.symlink_metadata().is_ok() {
        if let Ok(existing) = std::fs::read_link(&destination) {
            let wanted = source.canonicalize().unwrap_or_else(|_| source.to_path_buf());
            if existing != wanted {
                tracing::warn!(
                    "{} already links to {}, not {}",
                    destination.display(),
                    existing.display(),
                    wanted.display()
                );
            }
        }
        tracing::debug!("{} is already staged", destination.display());
        return Ok(destination);
    }

    let target = source
        .canonicalize()
        .map_err(|e| link_error(&destination, e))?;

    symlink(&target, &destination).map_err(|e| link_error(&destination, e))?;
    tracing::debug!("Linked {} -> {}", destination.display(), target.display());

    Ok(destination)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
