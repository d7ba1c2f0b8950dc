use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::Error;
use crate::knowledge::{Catalog, ErrorEntry, ErrorKnowledgeBase, ProgramErrorTable, ProgramNames};
use crate::logs::parse_error_code;

#[derive(serde::Deserialize)]
struct ProgramRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, EntryRecord>,
}

#[derive(serde::Deserialize)]
struct EntryRecord {
    name: String,
    message: String,
}

/// Load a catalog from the `errors.json` shape:
///
/// ```json
/// {
///   "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4": {
///     "name": "Jupiter Aggregator v6",
///     "errors": {
///       "0x1771": { "name": "SlippageToleranceExceeded", "message": "..." }
///     }
///   }
/// }
/// ```
///
/// Code keys may be hex or decimal. Catalog names are layered over
/// [`ProgramNames::well_known`]. Program ids are opaque keys: with the `native`
/// feature an id that is not a base-58 pubkey is logged and still loaded.
pub fn load_catalog(json: &str) -> Result<Catalog, Error> {
    let raw: BTreeMap<String, ProgramRecord> = serde_json::from_str(json)?;

    let mut programs = HashMap::with_capacity(raw.len());
    let mut names = ProgramNames::well_known();

    for (program_id, record) in raw {
        validate_program_id(&program_id)?;
        let table = build_table(&program_id, record.errors)?;

        match record.name {
            Some(name) if !name.trim().is_empty() => names.insert(program_id.clone(), name),
            Some(_) => warn!(%program_id, "ignoring blank program name"),
            None => {}
        }

        programs.insert(program_id, table);
    }

    let errors = ErrorKnowledgeBase::new(programs);
    debug!(
        programs = errors.program_count(),
        entries = errors.entry_count(),
        names = names.len(),
        "loaded error catalog"
    );

    Ok(Catalog { errors, names })
}

fn build_table(
    program_id: &str,
    records: BTreeMap<String, EntryRecord>,
) -> Result<ProgramErrorTable, Error> {
    let mut table = ProgramErrorTable::with_capacity(records.len());
    let mut seen_names = HashSet::with_capacity(records.len());

    for (key, EntryRecord { name, message }) in records {
        let code = parse_error_code(&key).ok_or_else(|| Error::KnowledgeBase {
            reason: format!("program {program_id}: invalid error code key {key:?}"),
        })?;
        if name.trim().is_empty() {
            return Err(Error::KnowledgeBase {
                reason: format!("program {program_id}: error {key} has an empty name"),
            });
        }
        if message.trim().is_empty() {
            return Err(Error::KnowledgeBase {
                reason: format!("program {program_id}: error {key} has an empty message"),
            });
        }
        if !seen_names.insert(name.clone()) {
            return Err(Error::KnowledgeBase {
                reason: format!("program {program_id}: error name {name} is listed twice"),
            });
        }
        if table.insert(code, ErrorEntry { name, message }).is_some() {
            return Err(Error::KnowledgeBase {
                reason: format!("program {program_id}: error code {code} is listed twice"),
            });
        }
    }

    if table.is_empty() {
        debug!(%program_id, "program has no catalogued errors");
    }

    Ok(table)
}

fn validate_program_id(program_id: &str) -> Result<(), Error> {
    if program_id.trim().is_empty() || program_id.contains(char::is_whitespace) {
        return Err(Error::KnowledgeBase {
            reason: format!("invalid program id {program_id:?}"),
        });
    }
    #[cfg(feature = "native")]
    {
        use std::str::FromStr;

        if let Err(e) = solana_pubkey::Pubkey::from_str(program_id) {
            warn!(%program_id, error = %e, "program id is not a base-58 pubkey");
        }
    }
    Ok(())
}
