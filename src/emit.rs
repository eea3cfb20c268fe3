use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::encoder::EncodedInstruction;
use crate::registers::RegisterFile;

bitflags! {
    /// Which listings a run should produce.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct OutputSet: u8 {
        const BIN = 1 << 0;
        const HEX = 1 << 1;
    }
}

/// Render the binary listing: optionally the register-allocation report as
/// `# `-prefixed comment lines, then one 32-char word per instruction in
/// program-counter order.
pub fn binary_lines(
    instructions: &[EncodedInstruction],
    registers: Option<&RegisterFile>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(instructions.len());
    if let Some(regs) = registers {
        out.extend(allocation_report(regs));
    }
    out.extend(instructions.iter().map(|i| i.bits.clone()));
    out
}

/// The register-allocation report. One line per recorded name: left column
/// index -> name sorted by index, right column name -> index in first-use
/// order, columns padded to the widest entry.
pub fn allocation_report(regs: &RegisterFile) -> Vec<String> {
    if regs.is_empty() {
        return Vec::new();
    }
    let entries: Vec<(&str, u32)> = regs.entries().collect();
    let num_width = entries
        .iter()
        .map(|(_, idx)| idx.to_string().len())
        .max()
        .unwrap_or(1);
    let name_width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(1);

    let mut by_index = entries.clone();
    by_index.sort_by_key(|&(_, idx)| idx);

    by_index
        .iter()
        .zip(entries.iter())
        .map(|(&(lname, lidx), &(rname, ridx))| {
            let line = format!(
                "${:<num_width$} : ${:<name_width$}   |   ${:<name_width$} : ${:<num_width$}",
                lidx, lname, rname, ridx,
            );
            format!("# {}", line.trim_end())
        })
        .collect()
}

/// Project binary text lines to 8-digit uppercase hex words: strip `#` and
/// `//` comments and spaces, silently drop anything that is not a pure
/// 0/1 line, interpret as unsigned base-2. Works on the assembler's own
/// listing and on externally supplied binary text alike.
pub fn hex_lines<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(|raw| {
            let end = [raw.find('#'), raw.find("//")]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(raw.len());
            let cleaned: String = raw[..end].chars().filter(|&c| c != ' ').collect();
            let cleaned = cleaned.trim();
            if cleaned.is_empty() || !cleaned.bytes().all(|b| b == b'0' || b == b'1') {
                return None;
            }
            u128::from_str_radix(cleaned, 2)
                .ok()
                .map(|word| format!("{word:08X}"))
        })
        .collect()
}
