//! File persistence for acquisition settings
//!
//! Thin wrapper around the codec for keeping protocol files on disk. The
//! codec itself never touches storage; these helpers own the I/O and its
//! error mapping.

use std::path::Path;

use log::debug;

use crate::codec;
use crate::error::{Error, Result};
use crate::settings::AcquisitionSettings;

/// Read and decode a settings file.
///
/// # Errors
///
/// Returns a file error when the path cannot be read, or
/// [`Error::MalformedInput`] when its content does not decode.
pub fn load(path: &Path) -> Result<AcquisitionSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings = codec::from_json(&content)?;
    debug!("Loaded acquisition settings from {}", path.display());
    Ok(settings)
}

/// Encode settings and write them to a file.
///
/// Uses atomic write: writes to a temp file then renames to prevent
/// corruption. Parent directories are created as needed.
///
/// # Errors
///
/// Returns a file error when the path cannot be written.
pub fn save(path: &Path, settings: &AcquisitionSettings) -> Result<()> {
    let content = codec::to_json(settings)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Append .tmp to preserve the original filename fully
    let file_name = path.file_name().ok_or_else(|| Error::FileWrite {
        path: path.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path must have a filename",
        ),
    })?;
    let mut temp_filename = file_name.to_os_string();
    temp_filename.push(".tmp");
    let temp_path = path.with_file_name(temp_filename);

    std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Saved acquisition settings to {}", path.display());
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
