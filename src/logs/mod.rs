//! Execution-log line interpretation.
//!
//! Solana runtime log lines follow a handful of fixed shapes:
//!
//! ```text
//! Program <id> invoke [<depth>]
//! Program <id> success
//! Program <id> failed: custom program error: 0x1772
//! Program <id> failed: <runtime reason>
//! Program log: <program output>
//! ```
//!
//! Only the `custom program error` shape carries a resolvable code. Everything
//! else is context for a human reader.

/// Canonical integer form of a custom program error code.
pub type ErrorCode = u64;

const PROGRAM_PREFIX: &str = "Program ";
const INVOKE_PREFIX: &str = "invoke [";
const FAILED_PREFIX: &str = "failed: ";
const SUCCESS_WORD: &str = "success";
const CUSTOM_ERROR_MARKER: &str = "custom program error: ";

/// A program that failed with a custom, program-defined error code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramFailure {
    pub program_id: String,
    pub code: ErrorCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Invoke { program_id: String, depth: u32 },
    Success { program_id: String },
    CustomError(ProgramFailure),
    /// Runtime failure without a custom code, or a custom code that did not parse.
    Failed { program_id: String, reason: String },
    Other,
}

/// Parse a custom error code written either as a `0x` hex literal or in decimal.
///
/// Returns `None` for empty, signed, non-numeric or overflowing text so a single
/// malformed line never aborts a scan.
pub fn parse_error_code(text: &str) -> Option<ErrorCode> {
    let text = text.trim();
    if let Some(hex) = strip_prefix_ignore_case(text, "0x") {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return ErrorCode::from_str_radix(hex, 16).ok();
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Classify a single log line.
pub fn classify_line(line: &str) -> LogLine {
    let Some(rest) = strip_prefix_ignore_case(line.trim_start(), PROGRAM_PREFIX) else {
        return LogLine::Other;
    };
    let Some((program_id, tail)) = rest.split_once(' ') else {
        return LogLine::Other;
    };
    // `Program log:`, `Program data:`, `Program return:` carry program output, not a subject.
    if program_id.is_empty() || program_id.ends_with(':') {
        return LogLine::Other;
    }

    if let Some(reason) = strip_prefix_ignore_case(tail, FAILED_PREFIX) {
        return classify_failure(program_id, reason);
    }

    if let Some(depth) = strip_prefix_ignore_case(tail, INVOKE_PREFIX)
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(|depth| depth.parse::<u32>().ok())
    {
        return LogLine::Invoke {
            program_id: program_id.to_string(),
            depth,
        };
    }

    if tail.trim_end().eq_ignore_ascii_case(SUCCESS_WORD) {
        return LogLine::Success {
            program_id: program_id.to_string(),
        };
    }

    LogLine::Other
}

/// Extract a custom program failure from a log line, if the line is one.
pub fn interpret(line: &str) -> Option<ProgramFailure> {
    match classify_line(line) {
        LogLine::CustomError(failure) => Some(failure),
        _ => None,
    }
}

fn classify_failure(program_id: &str, reason: &str) -> LogLine {
    let code = find_ignore_case(reason, CUSTOM_ERROR_MARKER)
        .and_then(|at| reason.get(at + CUSTOM_ERROR_MARKER.len()..))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(parse_error_code);

    match code {
        Some(code) => LogLine::CustomError(ProgramFailure {
            program_id: program_id.to_string(),
            code,
        }),
        None => LogLine::Failed {
            program_id: program_id.to_string(),
            reason: reason.trim().to_string(),
        },
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}

/// `needle` must be lowercase ASCII.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(needle)
}
