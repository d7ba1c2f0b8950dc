#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod knowledge;
pub mod logs;
pub mod outcome;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use knowledge::loader::load_catalog;
pub use knowledge::{
    Catalog, ErrorEntry, ErrorKnowledgeBase, ProgramErrorTable, ProgramNames, SharedCatalog,
    well_known_program_name,
};
pub use logs::{ErrorCode, LogLine, ProgramFailure, classify_line, interpret, parse_error_code};
pub use outcome::classifier::{OutcomeClassifier, classify};
pub use outcome::{
    AnalysisResult, AnalysisStatus, FoundError, SuccessReport, UnknownError, UnparsedFailure,
};
pub use types::RawTransactionRecord;
