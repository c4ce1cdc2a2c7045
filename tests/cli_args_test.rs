use std::path::PathBuf;

use clap::Parser;
use jmex::cli::JmexArgs;
use jmex::config::{ExtractorConfig, ParserKind};

#[test]
fn test_defaults() {
    let args = JmexArgs::try_parse_from(["jmex"]).unwrap();
    assert_eq!(args.path, PathBuf::from("."));
    assert!(args.output_dir.is_none());
    assert!(args.parser.is_none());
    assert!(!args.constructors);
    assert!(!args.sequential);

    // Without flags the loaded configuration is left untouched
    let mut config = ExtractorConfig::default();
    args.apply_to(&mut config);
    assert_eq!(config, ExtractorConfig::default());
}

#[test]
fn test_flags_override_config() {
    let args = JmexArgs::try_parse_from([
        "jmex",
        "project",
        "--output-dir",
        "out",
        "--parser",
        "scanner",
        "--constructors",
        "--exclude",
        "generated",
        "--exclude",
        "vendor",
        "--ext",
        ".java",
        "--ext",
        "jav",
        "--indent",
        "4",
        "--sequential",
    ])
    .unwrap();
    assert_eq!(args.path, PathBuf::from("project"));
    assert_eq!(args.output_dir, Some(PathBuf::from("out")));

    let mut config = ExtractorConfig {
        exclude_dirs: vec!["legacy".to_string()],
        ..ExtractorConfig::default()
    };
    args.apply_to(&mut config);
    assert_eq!(config.parser, ParserKind::Scanner);
    assert!(config.include_constructors);
    assert_eq!(config.exclude_dirs, vec!["legacy", "generated", "vendor"]);
    assert_eq!(config.extensions, vec!["java", "jav"]);
    assert_eq!(config.indent, 4);
    assert!(!config.parallel);
}

#[test]
fn test_parser_values() {
    let args = JmexArgs::try_parse_from(["jmex", "--parser", "tree-sitter"]).unwrap();
    assert_eq!(args.parser, Some(ParserKind::TreeSitter));

    assert!(JmexArgs::try_parse_from(["jmex", "--parser", "javac"]).is_err());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    assert!(JmexArgs::try_parse_from(["jmex", "-v"]).unwrap().verbose);
    assert!(JmexArgs::try_parse_from(["jmex", "-q"]).unwrap().quiet);
    assert!(JmexArgs::try_parse_from(["jmex", "-v", "-q"]).is_err());
}

#[test]
fn test_invalid_indent_is_rejected_by_validation() {
    let args = JmexArgs::try_parse_from(["jmex", "--indent", "0"]).unwrap();
    let mut config = ExtractorConfig::default();
    args.apply_to(&mut config);
    assert!(config.validate().is_err());
}

#[test]
fn test_path_after_repeatable_flags_stays_positional() {
    let args = JmexArgs::try_parse_from(["jmex", "--exclude", "generated", "/proj"]).unwrap();
    assert_eq!(args.path, PathBuf::from("/proj"));
    assert_eq!(args.exclude, vec!["generated"]);

    let args = JmexArgs::try_parse_from(["jmex", "--ext", "jav", "/proj"]).unwrap();
    assert_eq!(args.path, PathBuf::from("/proj"));
    assert_eq!(args.extensions, vec!["jav"]);
}
