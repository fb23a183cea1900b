//! IDE layer tests
//!
//! Tests for editor features through `AnalysisHost`:
//! - Completion candidates per section
//! - Go-to-definition
//! - Find references
//! - Run markers

pub mod tests_completion;
pub mod tests_goto;
pub mod tests_references;
