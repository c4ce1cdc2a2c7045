use crate::errors::ConfigError;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

const USER_CONFIG_DIR: &str = "jmex";
const USER_CONFIG_FILE_NAME: &str = "config.toml";
const MAX_INDENT: usize = 8;

/// Which parser turns Java text into the syntax model.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ParserKind {
    /// Grammar-based parser (tree-sitter-java)
    #[default]
    TreeSitter,
    /// Lightweight token and brace scanner
    Scanner,
}

// 提取器配置
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub parser: ParserKind,

    /// Emit constructors as methods, named after their type
    #[serde(default)]
    pub include_constructors: bool,

    /// Extract files on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// JSON indent width in spaces
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// File extensions treated as Java sources, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names pruned in addition to the built-in build/dependency dirs
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            parser: ParserKind::default(),
            include_constructors: false,
            parallel: default_parallel(),
            indent: default_indent(),
            extensions: default_extensions(),
            exclude_dirs: Vec::new(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

impl ExtractorConfig {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, the user config file
    /// (`<config dir>/jmex/config.toml`) is used when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_config_from_file(path),
            None => match Self::user_config_path() {
                Some(path) if path.is_file() => Self::load_config_from_file(&path),
                _ => {
                    debug!("未找到用户配置文件，使用默认配置");
                    Ok(Self::default())
                }
            },
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE_NAME))
    }

    fn load_config_from_file(config_path: &Path) -> Result<Self, ConfigError> {
        info!("正在读取配置文件: {:?}", config_path);
        let config_content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::FileRead(config_path.to_string_lossy().to_string(), e))?;
        Self::from_toml_str(&config_content)
            .map_err(|e| match e {
                ConfigError::TomlParse(_, inner) => {
                    ConfigError::TomlParse(config_path.to_string_lossy().to_string(), inner)
                }
                other => other,
            })
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::TomlParse("<inline>".to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent == 0 || self.indent > MAX_INDENT {
            return Err(ConfigError::InvalidValue(format!(
                "indent must be between 1 and {}, got {}",
                MAX_INDENT, self.indent
            )));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue(
                "extensions must list at least one file extension".to_string(),
            ));
        }
        if let Some(bad) = self.extensions.iter().find(|ext| ext.is_empty() || ext.contains('.')) {
            return Err(ConfigError::InvalidValue(format!(
                "extension '{}' must be non-empty and given without a dot",
                bad
            )));
        }
        Ok(())
    }
}
