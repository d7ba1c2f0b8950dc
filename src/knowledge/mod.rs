pub mod loader;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::logs::ErrorCode;

pub const SYSTEM_PROGRAM_ID: &str = "11111111111111111111111111111111";
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";
pub const COMPUTE_BUDGET_PROGRAM_ID: &str = "ComputeBudget111111111111111111111111111111";
pub const MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";
pub const JUPITER_V6_PROGRAM_ID: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
pub const JUPITER_DCA_PROGRAM_ID: &str = "DCA265Vj8a9CEuX1eb1LWRnDT7uK6q1xMipnNyatn23M";
pub const JUPITER_LIMIT_ORDER_PROGRAM_ID: &str = "jupoNjAxXgZ4rjzxzPMP4oxduvQsQtZzyknqvzYNrNu";
pub const JUPITER_LIMIT_ORDER_2_PROGRAM_ID: &str = "j1o2qRpjcyUwEvwtcfhEQefh773ZgjxcVRry7LDqg5X";
pub const KAMINO_LIMIT_ORDER_PROGRAM_ID: &str = "LiMoM9rMhrdYrfzUCxQppvxCSG1FcrUK9G8uLq4A1GF";
pub const RAYDIUM_AMM_V4_PROGRAM_ID: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";
pub const ORCA_WHIRLPOOL_PROGRAM_ID: &str = "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc";

/// Friendly name for programs that are recognisable without a catalog.
pub fn well_known_program_name(program_id: &str) -> Option<&'static str> {
    match program_id {
        SYSTEM_PROGRAM_ID => Some("System Program"),
        TOKEN_PROGRAM_ID => Some("Token Program"),
        TOKEN_2022_PROGRAM_ID => Some("Token-2022 Program"),
        ASSOCIATED_TOKEN_PROGRAM_ID => Some("Associated Token Account Program"),
        COMPUTE_BUDGET_PROGRAM_ID => Some("Compute Budget Program"),
        MEMO_PROGRAM_ID => Some("Memo Program"),
        JUPITER_V6_PROGRAM_ID => Some("Jupiter Aggregator v6"),
        JUPITER_DCA_PROGRAM_ID => Some("Jupiter DCA"),
        JUPITER_LIMIT_ORDER_PROGRAM_ID => Some("Jupiter Limit Order"),
        JUPITER_LIMIT_ORDER_2_PROGRAM_ID => Some("Jupiter Limit Order v2"),
        KAMINO_LIMIT_ORDER_PROGRAM_ID => Some("Kamino Limit Order"),
        RAYDIUM_AMM_V4_PROGRAM_ID => Some("Raydium AMM v4"),
        ORCA_WHIRLPOOL_PROGRAM_ID => Some("Orca Whirlpool"),
        _ => None,
    }
}

pub fn well_known_program_ids() -> &'static [&'static str] {
    &[
        SYSTEM_PROGRAM_ID,
        TOKEN_PROGRAM_ID,
        TOKEN_2022_PROGRAM_ID,
        ASSOCIATED_TOKEN_PROGRAM_ID,
        COMPUTE_BUDGET_PROGRAM_ID,
        MEMO_PROGRAM_ID,
        JUPITER_V6_PROGRAM_ID,
        JUPITER_DCA_PROGRAM_ID,
        JUPITER_LIMIT_ORDER_PROGRAM_ID,
        JUPITER_LIMIT_ORDER_2_PROGRAM_ID,
        KAMINO_LIMIT_ORDER_PROGRAM_ID,
        RAYDIUM_AMM_V4_PROGRAM_ID,
        ORCA_WHIRLPOOL_PROGRAM_ID,
    ]
}

/// One known custom error of a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Symbolic name, e.g. `SlippageExceeded`.
    pub name: String,
    /// Human-readable explanation.
    pub message: String,
}

impl ErrorEntry {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type ProgramErrorTable = HashMap<ErrorCode, ErrorEntry>;

/// Program id -> custom error code -> [`ErrorEntry`].
///
/// Built once, then only read. Share it by reference or wrap it in a
/// [`SharedCatalog`] when it has to be replaced at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorKnowledgeBase {
    programs: HashMap<String, ProgramErrorTable>,
}

impl ErrorKnowledgeBase {
    pub fn new(programs: HashMap<String, ProgramErrorTable>) -> Self {
        Self { programs }
    }

    /// Builder used to assemble small synthetic knowledge bases.
    pub fn with_entry(
        mut self,
        program_id: impl Into<String>,
        code: ErrorCode,
        entry: ErrorEntry,
    ) -> Self {
        self.programs
            .entry(program_id.into())
            .or_default()
            .insert(code, entry);
        self
    }

    /// `None` is the normal answer for codes nobody has catalogued yet.
    pub fn lookup(&self, program_id: &str, code: ErrorCode) -> Option<&ErrorEntry> {
        self.programs.get(program_id)?.get(&code)
    }

    pub fn program_table(&self, program_id: &str) -> Option<&ProgramErrorTable> {
        self.programs.get(program_id)
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn entry_count(&self) -> usize {
        self.programs.values().map(HashMap::len).sum()
    }
}

/// Program id -> friendly display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramNames {
    names: HashMap<String, String>,
}

impl ProgramNames {
    pub fn well_known() -> Self {
        let names = well_known_program_ids()
            .iter()
            .filter_map(|id| {
                well_known_program_name(id).map(|name| ((*id).to_string(), name.to_string()))
            })
            .collect();
        Self { names }
    }

    pub fn with_name(mut self, program_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert(program_id.into(), name.into());
        self
    }

    pub(crate) fn insert(&mut self, program_id: String, name: String) {
        self.names.insert(program_id, name);
    }

    pub fn get(&self, program_id: &str) -> Option<&str> {
        self.names.get(program_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything the classifier consults, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub errors: ErrorKnowledgeBase,
    pub names: ProgramNames,
}

/// Atomically replaceable [`Catalog`].
///
/// Readers take an `Arc` snapshot and keep using it for the whole request;
/// `publish` swaps the pointer and never mutates a catalog in place.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the catalog, returning the retired snapshot.
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}
