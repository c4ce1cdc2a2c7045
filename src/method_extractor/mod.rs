// src/method_extractor/mod.rs
pub mod analyzer;
pub mod core;
pub mod java;
pub mod scanner;

// Re-export key items for easier access from outside this module.
pub use self::analyzer::{ExtractOptions, MethodExtractor, extract_methods};
pub use self::core::{CompilationUnit, Member, MethodDecl, MethodRecord, SourceParser, TypeDecl, TypeKind};
pub use self::java::TreeSitterJavaParser;
pub use self::scanner::BraceScanner;
