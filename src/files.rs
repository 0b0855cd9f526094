use std::path::Path;

use tracing::info;

use crate::error::GeneratorError;

pub fn load_schema(path: &Path) -> Result<String, GeneratorError> {
    let sql = std::fs::read_to_string(path).map_err(|source| GeneratorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "schema loaded");
    Ok(sql)
}

/// Overwrites `path` with `contents`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), GeneratorError> {
    let write_error = |source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    std::fs::write(path, contents).map_err(write_error)?;
    info!(path = %path.display(), bytes = contents.len(), "file saved");
    Ok(())
}
