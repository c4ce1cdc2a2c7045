use std::path::PathBuf;

use clap::Parser;

use crate::config::{ExtractorConfig, ParserKind};

/// Extracts every method declared in a Java project into `methods.json`.
#[derive(Parser, Debug, Clone)]
#[clap(version, about = "Extract Java methods and their bodies into methods.json", long_about = None, name = "jmex")]
pub struct JmexArgs {
    /// Project root to scan
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Directory that receives methods.json (defaults to the project root)
    #[clap(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file to use instead of the user config
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Parser used to read Java sources
    #[clap(long, value_enum)]
    pub parser: Option<ParserKind>,

    /// Also emit constructors, named after their type
    #[clap(long)]
    pub constructors: bool,

    /// Extra directory name to skip (repeatable)
    #[clap(long = "exclude")]
    pub exclude: Vec<String>,

    /// Additional source file extension (repeatable)
    #[clap(long = "ext")]
    pub extensions: Vec<String>,

    /// JSON indent width in spaces
    #[clap(long)]
    pub indent: Option<usize>,

    /// Extract files one at a time instead of on the thread pool
    #[clap(long)]
    pub sequential: bool,

    /// Log debug output to stderr
    #[clap(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[clap(short, long)]
    pub quiet: bool,
}

impl JmexArgs {
    /// Overlays command-line choices onto a loaded configuration.
    pub fn apply_to(&self, config: &mut ExtractorConfig) {
        if let Some(parser) = self.parser {
            config.parser = parser;
        }
        if self.constructors {
            config.include_constructors = true;
        }
        config.exclude_dirs.extend(self.exclude.iter().cloned());
        for ext in &self.extensions {
            let ext = ext.trim_start_matches('.');
            if !config.extensions.iter().any(|known| known == ext) {
                config.extensions.push(ext.to_string());
            }
        }
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}
