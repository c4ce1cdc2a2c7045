//! Source file discovery under a project root.
//!
//! Build-output and dependency directories are pruned with
//! `WalkDir::filter_entry`, so their subtrees are never visited.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ExtractorConfig;
use crate::errors::ScanError;

/// Directories pruned by default (Maven, Gradle, IDE and VCS conventions).
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "target",
    "build",
    "out",
    "bin",
    "node_modules",
    ".git",
    ".gradle",
    ".idea",
    ".mvn",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extensions without the leading dot
    pub extensions: Vec<String>,
    /// Extra directory names pruned on top of [`DEFAULT_EXCLUDED_DIRS`]
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["java".to_string()],
            exclude_dirs: Vec::new(),
        }
    }
}

impl From<&ExtractorConfig> for ScanOptions {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }
}

/// Checks that `path` is an existing directory and returns its canonical form.
pub fn validate_root(path: &Path) -> Result<PathBuf, ScanError> {
    let invalid = |reason: String| ScanError::InvalidRoot {
        path: path.to_path_buf(),
        reason,
    };
    if !path.exists() {
        return Err(invalid("does not exist".to_string()));
    }
    if !path.is_dir() {
        return Err(invalid("is not a directory".to_string()));
    }
    path.canonicalize()
        .map_err(|e| invalid(format!("cannot be resolved: {}", e)))
}

#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Lists source files under `root`, sorted by path.
///
/// Entries that cannot be read are logged and skipped; discovery itself never fails.
pub fn discover_sources(root: &Path, options: &ScanOptions) -> Vec<PathBuf> {
    let excludes: HashSet<&str> = DEFAULT_EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(options.exclude_dirs.iter().map(String::as_str))
        .collect();

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
        .filter_map(|entry| match entry {
            Ok(e) => {
                if e.file_type().is_file() && has_source_extension(e.path(), &options.extensions) {
                    Some(e.into_path())
                } else {
                    None
                }
            }
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        })
        .collect();

    files.sort();
    debug!("Discovered {} source files under {}", files.len(), root.display());
    files
}

/// Reads one source file as UTF-8 text, dropping a leading byte order mark.
pub fn load_source(path: &Path) -> Result<String, ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match content.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "class X {}").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_discovers_sorted_java_files_and_prunes_build_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "src/main/java/b/B.java");
        touch(root, "src/main/java/a/A.java");
        touch(root, "src/main/resources/app.properties");
        touch(root, "target/generated/Gen.java");
        touch(root, "build/tmp/Tmp.java");
        touch(root, ".git/hooks/Hook.java");
        touch(root, "Root.java");

        let files = discover_sources(root, &ScanOptions::default());
        assert_eq!(
            relative(root, &files),
            vec!["Root.java", "src/main/java/a/A.java", "src/main/java/b/B.java"]
        );
    }

    #[test]
    fn test_custom_excludes_and_extensions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "generated/G.java");
        touch(root, "src/A.java");
        touch(root, "src/B.jav");

        let options = ScanOptions {
            extensions: vec!["java".to_string(), "jav".to_string()],
            exclude_dirs: vec!["generated".to_string()],
        };
        let files = discover_sources(root, &options);
        assert_eq!(relative(root, &files), vec!["src/A.java", "src/B.jav"]);
    }

    #[test]
    fn test_root_named_like_excluded_dir_is_still_scanned() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("build");
        touch(&root, "A.java");
        let files = discover_sources(&root, &ScanOptions::default());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_validate_root() {
        let dir = TempDir::new().unwrap();
        assert!(validate_root(dir.path()).is_ok());

        let missing = dir.path().join("missing");
        assert!(matches!(
            validate_root(&missing),
            Err(ScanError::InvalidRoot { ref reason, .. }) if reason == "does not exist"
        ));

        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            validate_root(&file),
            Err(ScanError::InvalidRoot { ref reason, .. }) if reason == "is not a directory"
        ));
    }

    #[test]
    fn test_load_source_strips_byte_order_mark() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bom.java");
        fs::write(&path, "\u{feff}class Bom {}").unwrap();
        assert_eq!(load_source(&path).unwrap(), "class Bom {}");
    }

    #[test]
    fn test_load_source_reports_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Binary.java");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(load_source(&path), Err(ScanError::UnreadableFile { .. })));
    }
}
