// src/method_extractor/analyzer.rs
use tracing::debug;

use crate::config::{ExtractorConfig, ParserKind};
use crate::errors::ExtractError;
use super::core::{MethodRecord, SourceParser};
use super::java::TreeSitterJavaParser;
use super::scanner::BraceScanner;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub include_constructors: bool,
}

impl From<&ExtractorConfig> for ExtractOptions {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            include_constructors: config.include_constructors,
        }
    }
}

/// Stateless facade: one parser plus extraction options.
///
/// Shared by reference across worker threads; every call parses from scratch.
pub struct MethodExtractor {
    parser: Box<dyn SourceParser>,
    options: ExtractOptions,
}

impl MethodExtractor {
    pub fn new(kind: ParserKind, options: ExtractOptions) -> Result<Self, ExtractError> {
        let parser: Box<dyn SourceParser> = match kind {
            ParserKind::TreeSitter => Box::new(TreeSitterJavaParser::new()?),
            ParserKind::Scanner => Box::new(BraceScanner),
        };
        Ok(Self::with_parser(parser, options))
    }

    pub fn with_parser(parser: Box<dyn SourceParser>, options: ExtractOptions) -> Self {
        debug!("Using {} parser, constructors included: {}", parser.name(), options.include_constructors);
        Self { parser, options }
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Parses `source` and returns its method records in declaration order.
    pub fn extract(&self, source: &str) -> Result<Vec<MethodRecord>, ExtractError> {
        let unit = self.parser.parse(source)?;
        Ok(unit.method_records(self.options.include_constructors))
    }
}

/// Extracts with the default tree-sitter parser, constructors excluded.
pub fn extract_methods(source: &str) -> Result<Vec<MethodRecord>, ExtractError> {
    MethodExtractor::new(ParserKind::TreeSitter, ExtractOptions::default())?.extract(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method_extractor::core::CompilationUnit;

    struct FixedParser(CompilationUnit);

    impl SourceParser for FixedParser {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn parse(&self, _source: &str) -> Result<CompilationUnit, ExtractError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_custom_parser_plugs_in() {
        let extractor = MethodExtractor::with_parser(
            Box::new(FixedParser(CompilationUnit::default())),
            ExtractOptions::default(),
        );
        assert_eq!(extractor.parser_name(), "fixed");
        assert!(extractor.extract("anything").unwrap().is_empty());
    }

    #[test]
    fn test_both_parsers_agree_on_simple_source() {
        let source = r#"
public class Greeter {
    private final String name;

    public Greeter(String name) { this.name = name; }

    public String greet() {
        return "Hello, " + name + "!";
    }

    protected abstract void onGreet();

    static class Helper {
        static int twice(int x) { return x * 2; }
    }
}
"#;
        let options = ExtractOptions {
            include_constructors: true,
        };
        let tree_sitter = MethodExtractor::new(ParserKind::TreeSitter, options).unwrap();
        let scanner = MethodExtractor::new(ParserKind::Scanner, options).unwrap();
        let expected = tree_sitter.extract(source).unwrap();
        assert_eq!(expected.len(), 4);
        assert_eq!(expected[0], MethodRecord::new("Greeter", Some("{ this.name = name; }")));
        assert_eq!(scanner.extract(source).unwrap(), expected);
    }

    #[test]
    fn test_extract_methods_default() {
        let records = extract_methods("interface Api { void call(); }").unwrap();
        assert_eq!(records, vec![MethodRecord::new("call", None::<String>)]);
    }
}
