// src/pipeline.rs
//
// Scanner -> extractor -> writer. Per-file failures are logged and skipped;
// only root validation, parser setup and the final write abort a run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::ExtractorConfig;
use crate::errors::AppError;
use crate::json_writer::{WriteOptions, write_methods};
use crate::method_extractor::{ExtractOptions, MethodExtractor, MethodRecord};
use crate::source_scanner::{ScanOptions, discover_sources, load_source, validate_root};

/// Outcome of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_discovered: usize,
    pub files_extracted: usize,
    pub files_skipped: usize,
    pub methods_written: usize,
    pub output_path: PathBuf,
}

/// Records gathered from a project, before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub records: Vec<MethodRecord>,
    pub files_discovered: usize,
    pub files_skipped: usize,
}

fn extract_file(extractor: &MethodExtractor, path: &Path) -> Option<Vec<MethodRecord>> {
    let source = match load_source(path) {
        Ok(source) => source,
        Err(e) => {
            warn!("Skipping file: {}", e);
            return None;
        }
    };
    match extractor.extract(&source) {
        Ok(records) => {
            debug!("{}: {} methods", path.display(), records.len());
            Some(records)
        }
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Scans `root` and extracts every method, in file order then declaration order.
pub fn collect_methods(root: &Path, config: &ExtractorConfig) -> Result<Collected, AppError> {
    let root = validate_root(root)?;
    let files = discover_sources(&root, &ScanOptions::from(config));
    info!("Found {} source files under {}", files.len(), root.display());

    let extractor = MethodExtractor::new(config.parser, ExtractOptions::from(config))?;

    // Indexed collect keeps discovery order regardless of which worker finishes first.
    let per_file: Vec<Option<Vec<MethodRecord>>> = if config.parallel {
        files.par_iter().map(|path| extract_file(&extractor, path)).collect()
    } else {
        files.iter().map(|path| extract_file(&extractor, path)).collect()
    };

    let files_skipped = per_file.iter().filter(|outcome| outcome.is_none()).count();
    let records = per_file.into_iter().flatten().flatten().collect();
    Ok(Collected {
        records,
        files_discovered: files.len(),
        files_skipped,
    })
}

/// Runs the full pipeline and writes `methods.json` into `output_dir`, or into the root.
pub fn run(
    root: &Path,
    output_dir: Option<&Path>,
    config: &ExtractorConfig,
) -> Result<RunSummary, AppError> {
    let start_time = Instant::now();
    let collected = collect_methods(root, config)?;

    let dest = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => validate_root(root)?,
    };
    let output_path = write_methods(
        &collected.records,
        &dest,
        &WriteOptions {
            indent: config.indent,
        },
    )?;

    if collected.files_skipped > 0 {
        warn!(
            "{} of {} files were skipped",
            collected.files_skipped, collected.files_discovered
        );
    }
    info!("Extraction finished in {:?}", start_time.elapsed());

    Ok(RunSummary {
        files_discovered: collected.files_discovered,
        files_extracted: collected.files_discovered - collected.files_skipped,
        files_skipped: collected.files_skipped,
        methods_written: collected.records.len(),
        output_path,
    })
}
