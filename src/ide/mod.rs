//! IDE features: high-level APIs for editor integrations.
//!
//! This module sits between the symbol model (HIR) and an LSP server or IDE
//! plugin. Each function corresponds to one editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use robot::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("/p/suite.robot", "*** Test Cases ***\nT\n    Log    hi\n");
//!
//! let analysis = host.analysis();
//! let file = analysis.get_file_id("/p/suite.robot").unwrap();
//! let markers = analysis.run_markers(file);
//! ```

mod analysis;
mod completion;
mod goto;
mod references;
mod run_markers;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, TailKind, completions};
pub use goto::{GotoKind, GotoResult, GotoTarget, goto_definition};
pub use references::{Reference, ReferenceResult, find_keyword_references};
pub use run_markers::{RunMarker, run_marker_at, run_markers};
