use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// One instruction-bearing line after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLine {
    /// Byte address; starts at 0, advances by 4 per emitted line.
    pub pc: u32,
    /// 1-based line number in the input text, for diagnostics.
    pub line: u32,
    pub tokens: Vec<String>,
    pub raw: String,
}

/// A label-table entry, in the JSON-exportable shape used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub addr: u32,
}

/// Output of the normalization pass: the instruction stream, the fully
/// populated label table, and the set of explicitly used `$N` indices.
/// The label table is complete before any instruction is encoded, so
/// forward references resolve.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub lines: Vec<SourceLine>,
    pub labels: HashMap<String, u32>,
    pub numeric_regs: BTreeSet<u32>,
}

pub fn parse_source(text: &str) -> Result<Program, AsmError> {
    let mut prog = Program::default();
    let mut pc = 0u32;

    for (idx, raw) in text.split('\n').enumerate() {
        let line_no = idx as u32 + 1;
        let mut line = normalize(raw.trim_end_matches('\r'));
        if line.is_empty() {
            continue;
        }

        if let Some(pos) = line.find(':') {
            let name = &line[..pos];
            if !is_label_name(name) {
                return Err(AsmError::MalformedLabel {
                    line: line_no,
                    text: line.clone(),
                });
            }
            if prog.labels.contains_key(name) {
                return Err(AsmError::DuplicateLabel {
                    line: line_no,
                    label: name.to_string(),
                });
            }
            // A label-only line records the next instruction's address and
            // consumes no program counter itself.
            prog.labels.insert(name.to_string(), pc);
            let rest = line[pos + 1..].trim();
            if rest.is_empty() {
                continue;
            }
            if rest.contains(':') {
                return Err(AsmError::MalformedLabel {
                    line: line_no,
                    text: rest.to_string(),
                });
            }
            line = rest.to_string();
        }

        collect_numeric_regs(&line, &mut prog.numeric_regs);
        prog.lines.push(SourceLine {
            pc,
            line: line_no,
            tokens: line.split(' ').map(str::to_string).collect(),
            raw: line,
        });
        pc += 4;
    }

    Ok(prog)
}

/// Strip comments, turn commas into spaces, drop spacing just inside
/// parenthesis groups (so `4( $t0 )` survives as the single token
/// `4($t0)`), and collapse runs of whitespace.
fn normalize(raw: &str) -> String {
    let code = &raw[..comment_start(raw)];

    let mut out = String::with_capacity(code.len());
    let mut pending_space = false;
    for ch in code.chars() {
        match ch {
            ',' | ' ' | '\t' => {
                if !out.is_empty() {
                    pending_space = true;
                }
            }
            ')' => {
                // spaces before ')' vanish
                pending_space = false;
                out.push(')');
            }
            _ => {
                // spaces right after '(' vanish too
                if pending_space && !out.ends_with('(') {
                    out.push(' ');
                }
                pending_space = false;
                out.push(ch);
            }
        }
    }
    out
}

fn comment_start(raw: &str) -> usize {
    let hash = raw.find('#');
    let semi = raw.find(';');
    let slashes = raw.find("//");
    [hash, semi, slashes]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(raw.len())
}

fn is_label_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Collect every literal `$<digits>` occurrence, including inside
/// `imm($N)` groups, into the explicit numeric index set.
fn collect_numeric_regs(line: &str, set: &mut BTreeSet<u32>) {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(n) = line[start..end].parse() {
                    set.insert(n);
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }
}
