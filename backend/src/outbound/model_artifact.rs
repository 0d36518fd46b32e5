//! Loader for the prediction model artifact.
//!
//! The artifact is a JSON random-forest export (see
//! [`crate::domain::prediction`]) read once at startup through `cap_std`.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::info;

use crate::domain::ForestModel;

/// Errors raised while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelArtifactError {
    /// The file could not be opened or read.
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        /// Artifact location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The contents are not a valid forest.
    #[error("model artifact {path} is not a valid forest: {source}")]
    Decode {
        /// Artifact location.
        path: PathBuf,
        /// Parse or validation failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Read and validate the forest stored at `path`.
///
/// # Errors
///
/// Returns [`ModelArtifactError::Read`] when the file is unreadable and
/// [`ModelArtifactError::Decode`] when it does not hold a valid forest.
pub fn load_forest(path: &Path) -> Result<ForestModel, ModelArtifactError> {
    let contents = read_to_string(path).map_err(|source| ModelArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let model: ForestModel =
        serde_json::from_str(&contents).map_err(|source| ModelArtifactError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), trees = model.len(), "loaded prediction model");
    Ok(model)
}

fn read_to_string(path: &Path) -> io::Result<String> {
    let (parent, file_name) = parent_and_file_name(path)?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read_to_string(Path::new(&file_name))
}

fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "model path must name a file",
        )
    })?;
    Ok((parent, file_name.to_os_string()))
}
