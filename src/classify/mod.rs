//! HTTP status classification
//!
//! Maps response status codes to consumer-registered error kinds. The base
//! table is seeded at construction; per-call skip/push overrides adjust a
//! working copy that lives for exactly one dispatch.

use indexmap::IndexMap;

/// Mapping from HTTP status code to an error-kind identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionTable {
    entries: IndexMap<u16, String>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, status: u16, kind: impl Into<String>) {
        self.entries.insert(status, kind.into());
    }

    pub fn remove(&mut self, status: u16) -> Option<String> {
        self.entries.shift_remove(&status)
    }

    pub fn get(&self, status: u16) -> Option<&str> {
        self.entries.get(&status).map(String::as_str)
    }

    pub fn contains(&self, status: u16) -> bool {
        self.entries.contains_key(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(u16, String)> for ExceptionTable {
    fn from_iter<I: IntoIterator<Item = (u16, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Per-call adjustments to the base exception table. Reset after every
/// dispatch together with the parameter accumulator.
#[derive(Debug, Clone, Default)]
pub struct TableOverrides {
    skip_all: bool,
    skipped: Vec<u16>,
    pushed: IndexMap<u16, String>,
}

impl TableOverrides {
    /// Disable classification wholesale for the next dispatch
    pub fn skip_all(&mut self) {
        self.skip_all = true;
    }

    /// Remove individual status codes from the next dispatch's working table
    pub fn skip_codes(&mut self, codes: &[u16]) {
        self.skipped.extend_from_slice(codes);
    }

    /// Add a status-to-kind entry for the next dispatch only
    pub fn push(&mut self, status: u16, kind: impl Into<String>) {
        self.pushed.insert(status, kind.into());
    }

    /// Working table for the next dispatch; `None` means classification is
    /// disabled for this call.
    pub fn apply(&self, base: &ExceptionTable) -> Option<ExceptionTable> {
        if self.skip_all {
            return None;
        }
        let mut table = base.clone();
        for code in &self.skipped {
            table.remove(*code);
        }
        for (status, kind) in &self.pushed {
            table.insert(*status, kind.clone());
        }
        Some(table)
    }
}

/// Look up the registered error kind for a status code
pub fn classify(status: u16, table: &ExceptionTable) -> Option<&str> {
    table.get(status)
}
