use tracing::{debug, trace};

use crate::knowledge::{Catalog, ErrorKnowledgeBase, ProgramNames};
use crate::logs::{LogLine, ProgramFailure, classify_line};
use crate::outcome::{
    AnalysisResult, FoundError, SUCCESS_MESSAGE, SuccessReport, UNPARSED_MESSAGE, UnknownError,
    UnparsedFailure,
};
use crate::types::RawTransactionRecord;

/// Turns a transaction's success flag and log into an [`AnalysisResult`].
///
/// Stateless; holds only borrowed, read-only lookup tables, so one classifier
/// can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeClassifier<'a> {
    errors: &'a ErrorKnowledgeBase,
    names: &'a ProgramNames,
}

/// What a single pass over the log found.
#[derive(Default)]
struct LogScan<'l> {
    /// Last custom error marker and the line it came from.
    custom: Option<(ProgramFailure, &'l str)>,
    /// Last generic runtime failure, as `(program_id, reason)`.
    generic: Option<(String, String)>,
}

impl<'a> OutcomeClassifier<'a> {
    pub fn new(errors: &'a ErrorKnowledgeBase, names: &'a ProgramNames) -> Self {
        Self { errors, names }
    }

    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        Self::new(&catalog.errors, &catalog.names)
    }

    pub fn classify(&self, record: &RawTransactionRecord) -> AnalysisResult {
        self.classify_logs(record.succeeded, &record.logs)
    }

    /// Successful transactions are never inspected: their logs may still contain
    /// benign lines mentioning failures.
    pub fn classify_logs(&self, succeeded: bool, logs: &[String]) -> AnalysisResult {
        if succeeded {
            debug!(lines = logs.len(), "transaction succeeded");
            return AnalysisResult::Success(SuccessReport {
                message: SUCCESS_MESSAGE.to_string(),
            });
        }

        let scan = scan_logs(logs);
        let result = match scan.custom {
            Some((failure, raw_log)) => self.resolve(failure, raw_log),
            None => self.unparsed(logs, scan.generic),
        };

        debug!(
            status = %result.status(),
            program_id = ?result.program_id(),
            error_code = ?result.error_code(),
            lines = logs.len(),
            "classified failed transaction"
        );
        result
    }

    /// Classify a record whose fields may be missing.
    ///
    /// A missing success flag, or a failed transaction without logs, is reported as
    /// unparsed with an empty log rather than rejected.
    pub fn classify_partial(
        &self,
        succeeded: Option<bool>,
        logs: Option<&[String]>,
    ) -> AnalysisResult {
        match (succeeded, logs) {
            (Some(true), logs) => self.classify_logs(true, logs.unwrap_or_default()),
            (Some(false), Some(logs)) => self.classify_logs(false, logs),
            (Some(false), None) | (None, _) => {
                debug!(
                    has_flag = succeeded.is_some(),
                    has_logs = logs.is_some(),
                    "incomplete transaction record"
                );
                self.unparsed(&[], None)
            }
        }
    }

    fn resolve(&self, failure: ProgramFailure, raw_log: &str) -> AnalysisResult {
        let ProgramFailure { program_id, code } = failure;
        let program_name = self.names.get(&program_id).map(String::from);

        match self.errors.lookup(&program_id, code) {
            Some(entry) => AnalysisResult::ErrorFound(FoundError {
                program_id,
                program_name,
                error_code: code,
                name: entry.name.clone(),
                message: entry.message.clone(),
                raw_log: raw_log.to_string(),
            }),
            None => AnalysisResult::ErrorUnknown(UnknownError {
                program_id,
                program_name,
                error_code: code,
                raw_log: raw_log.to_string(),
            }),
        }
    }

    fn unparsed(&self, logs: &[String], generic: Option<(String, String)>) -> AnalysisResult {
        let message = match generic {
            Some((program_id, reason)) => {
                let label = match self.names.get(&program_id) {
                    Some(name) => format!("{name} ({program_id})"),
                    None => program_id,
                };
                format!("{UNPARSED_MESSAGE} The last failing program, {label}, reported: {reason}")
            }
            None => UNPARSED_MESSAGE.to_string(),
        };

        AnalysisResult::ErrorUnparsed(UnparsedFailure {
            raw_logs: logs.to_vec(),
            message,
        })
    }
}

/// Single linear pass; later markers replace earlier ones.
fn scan_logs(logs: &[String]) -> LogScan<'_> {
    let mut scan = LogScan::default();

    for (index, line) in logs.iter().enumerate() {
        match classify_line(line) {
            LogLine::CustomError(failure) => {
                trace!(
                    index,
                    program_id = %failure.program_id,
                    code = failure.code,
                    "custom error marker"
                );
                scan.custom = Some((failure, line.as_str()));
            }
            LogLine::Failed { program_id, reason } => {
                trace!(index, %program_id, %reason, "runtime failure marker");
                scan.generic = Some((program_id, reason));
            }
            LogLine::Invoke { .. } | LogLine::Success { .. } | LogLine::Other => {}
        }
    }

    scan
}

/// Classify `record` against a loaded catalog.
pub fn classify(record: &RawTransactionRecord, catalog: &Catalog) -> AnalysisResult {
    OutcomeClassifier::from_catalog(catalog).classify(record)
}
