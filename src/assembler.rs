use serde::{Deserialize, Serialize};

use crate::emit;
use crate::encoder::{encode_program, EncodedInstruction};
use crate::error::AsmError;
use crate::registers::RegisterFile;
use crate::source::{parse_source, Label};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsmOptions {
    /// Promote every overflow warning to a fatal error.
    pub strict: bool,
    /// Prefix the binary listing with the register-allocation report.
    pub comment: bool,
}

impl Default for AsmOptions {
    fn default() -> Self {
        Self {
            strict: false,
            comment: false,
        }
    }
}

/// One assembly run. The label table and register map live inside the run
/// and are dropped with the resulting [`Listing`]; nothing is shared
/// between runs.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    opts: AsmOptions,
}

impl Assembler {
    pub fn new(opts: AsmOptions) -> Self {
        Self { opts }
    }

    /// Normalize, resolve labels, then encode. Fails on the first error;
    /// nothing is emitted for a partially valid source.
    pub fn assemble(&self, source: &str) -> Result<Listing, AsmError> {
        let prog = parse_source(source)?;
        let (instructions, registers) = encode_program(&prog, self.opts)?;
        let mut labels: Vec<Label> = prog
            .labels
            .into_iter()
            .map(|(name, addr)| Label { name, addr })
            .collect();
        labels.sort_by_key(|l| l.addr);
        Ok(Listing {
            instructions,
            registers,
            labels,
            comment: self.opts.comment,
        })
    }
}

/// A fully encoded program, ready for emission.
#[derive(Debug, Clone)]
pub struct Listing {
    pub instructions: Vec<EncodedInstruction>,
    pub registers: RegisterFile,
    /// Resolved label table, address order.
    pub labels: Vec<Label>,
    comment: bool,
}

impl Listing {
    /// The binary listing, with the register report when the run was
    /// configured with `comment`.
    pub fn binary_lines(&self) -> Vec<String> {
        let regs = self.comment.then_some(&self.registers);
        emit::binary_lines(&self.instructions, regs)
    }

    /// The hex listing; comments and the register report never appear here.
    pub fn hex_lines(&self) -> Vec<String> {
        emit::hex_lines(self.instructions.iter().map(|i| i.bits.as_str()))
    }
}
