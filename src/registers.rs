use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Symbolic register namespace for one assembly run.
///
/// `zero` is pinned to index 0. Literal `$N` tokens pass through without
/// being recorded. Any other `$name` gets auto-allocated the smallest free
/// index >= 1, where "free" excludes every explicit numeric index used
/// anywhere in the program and every index already handed out. First-use
/// order is kept for the allocation report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterFile {
    assigned: HashMap<String, u32>,
    order: Vec<String>,
    numeric_used: BTreeSet<u32>,
}

impl RegisterFile {
    pub fn new(numeric_used: BTreeSet<u32>) -> Self {
        Self {
            assigned: HashMap::new(),
            order: Vec::new(),
            numeric_used,
        }
    }

    /// Resolve a register token to its index. `None` means the token is not
    /// `$` followed by alphanumerics (or a numeric index too large for u32).
    pub fn resolve(&mut self, token: &str) -> Option<u32> {
        let name = token.strip_prefix('$')?;
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        let name = name.to_ascii_lowercase();

        if let Some(&idx) = self.assigned.get(&name) {
            return Some(idx);
        }
        if name == "zero" {
            self.record("zero".to_string(), 0);
            return Some(0);
        }
        if name.bytes().all(|b| b.is_ascii_digit()) {
            return name.parse().ok();
        }
        Some(self.allocate(name))
    }

    fn allocate(&mut self, name: String) -> u32 {
        let mut taken = self.numeric_used.clone();
        taken.extend(self.assigned.values().copied());
        let mut idx = 1;
        while taken.contains(&idx) {
            idx += 1;
        }
        info!("Assigned ${idx} to ${name}");
        self.record(name, idx);
        idx
    }

    fn record(&mut self, name: String, idx: u32) {
        self.order.push(name.clone());
        self.assigned.insert(name, idx);
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Recorded (name, index) pairs in first-use order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.assigned[name]))
    }
}
