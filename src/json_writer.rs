use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::WriteError;
use crate::method_extractor::MethodRecord;

pub const OUTPUT_FILE_NAME: &str = "methods.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Serializes records as an indented JSON array followed by a newline.
///
/// serde_json only applies standard string escaping, so `<`, `>` and `&` stay literal.
pub fn render_methods(records: &[MethodRecord], indent: usize) -> Result<Vec<u8>, WriteError> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    records.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Writes `<dest_dir>/methods.json`, replacing any previous file.
///
/// The document goes to a temporary file in `dest_dir` first and is renamed
/// into place, so readers see either the old file or the complete new one.
pub fn write_methods(
    records: &[MethodRecord],
    dest_dir: &Path,
    options: &WriteOptions,
) -> Result<PathBuf, WriteError> {
    let output_path = dest_dir.join(OUTPUT_FILE_NAME);
    let document = render_methods(records, options.indent)?;

    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| WriteError::Io { path, source }
    };

    let mut temp = NamedTempFile::new_in(dest_dir).map_err(io_error(dest_dir))?;
    temp.write_all(&document).map_err(io_error(temp.path()))?;
    temp.as_file().sync_all().map_err(io_error(temp.path()))?;
    temp.persist(&output_path).map_err(|source| WriteError::Persist {
        path: output_path.clone(),
        source,
    })?;

    info!("Wrote {} methods to {}", records.len(), output_path.display());
    Ok(output_path)
}

/// Reads a previously written methods file.
pub fn read_methods(path: &Path) -> Result<Vec<MethodRecord>, WriteError> {
    let content = fs::read(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&content)?)
}
