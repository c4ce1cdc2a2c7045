// This lib.rs file exposes modules for the binary and integration tests

pub mod cli;
pub mod config;
pub mod errors;
pub mod json_writer;
pub mod method_extractor;
pub mod pipeline;
pub mod source_scanner;

pub use method_extractor::{MethodRecord, extract_methods};
pub use pipeline::{RunSummary, run};
