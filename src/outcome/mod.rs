pub mod classifier;

use serde::{Deserialize, Serialize};

use crate::logs::ErrorCode;

pub const SUCCESS_MESSAGE: &str = "This transaction completed successfully. No errors were found.";
pub const UNPARSED_MESSAGE: &str = "The transaction failed, but no custom program error code was \
     found in the transaction logs. The error may be a system-level failure (e.g. insufficient \
     SOL for fees, account not found).";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisStatus {
    Success,
    ErrorFound,
    ErrorUnknown,
    ErrorUnparsed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessReport {
    pub message: String,
}

/// Failure resolved against the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundError {
    pub program_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    pub error_code: ErrorCode,
    pub name: String,
    pub message: String,
    /// Log line the code was extracted from.
    pub raw_log: String,
}

/// Failure with a (program, code) pair nobody has catalogued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownError {
    pub program_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    pub error_code: ErrorCode,
    pub raw_log: String,
}

/// Failure with no extractable custom error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnparsedFailure {
    /// The complete input log, untouched.
    pub raw_logs: Vec<String>,
    pub message: String,
}

/// Diagnosis of one transaction. Serializes with a `status` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success(SuccessReport),
    ErrorFound(FoundError),
    ErrorUnknown(UnknownError),
    ErrorUnparsed(UnparsedFailure),
}

impl AnalysisResult {
    pub fn status(&self) -> AnalysisStatus {
        match self {
            Self::Success(_) => AnalysisStatus::Success,
            Self::ErrorFound(_) => AnalysisStatus::ErrorFound,
            Self::ErrorUnknown(_) => AnalysisStatus::ErrorUnknown,
            Self::ErrorUnparsed(_) => AnalysisStatus::ErrorUnparsed,
        }
    }

    pub fn program_id(&self) -> Option<&str> {
        match self {
            Self::ErrorFound(found) => Some(found.program_id.as_str()),
            Self::ErrorUnknown(unknown) => Some(unknown.program_id.as_str()),
            Self::Success(_) | Self::ErrorUnparsed(_) => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::ErrorFound(found) => Some(found.error_code),
            Self::ErrorUnknown(unknown) => Some(unknown.error_code),
            Self::Success(_) | Self::ErrorUnparsed(_) => None,
        }
    }

    /// Code in the `0x…` form the runtime logs it with.
    pub fn error_code_hex(&self) -> Option<String> {
        self.error_code().map(|code| format!("{code:#x}"))
    }

    /// One-paragraph explanation for an end user.
    pub fn summary(&self) -> String {
        match self {
            Self::Success(report) => report.message.clone(),
            Self::ErrorFound(found) => format!(
                "{} failed with {} (error code {} / {:#x}): {}",
                program_label(&found.program_id, found.program_name.as_deref()),
                found.name,
                found.error_code,
                found.error_code,
                found.message
            ),
            Self::ErrorUnknown(unknown) => format!(
                "The transaction failed with error code {} ({:#x}) from {}, but this code is \
                 not yet in the error database.",
                unknown.error_code,
                unknown.error_code,
                program_label(&unknown.program_id, unknown.program_name.as_deref())
            ),
            Self::ErrorUnparsed(unparsed) => unparsed.message.clone(),
        }
    }
}

fn program_label(program_id: &str, program_name: Option<&str>) -> String {
    match program_name {
        Some(name) => format!("{name} ({program_id})"),
        None => format!("program {program_id}"),
    }
}
