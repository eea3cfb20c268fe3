use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assembler::AsmOptions;
use crate::error::AsmError;
use crate::instructions::{self, Family};
use crate::literal::{is_marked_literal, parse_literal};
use crate::registers::RegisterFile;
use crate::source::{Program, SourceLine};

/// One assembled 32-bit word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedInstruction {
    pub pc: u32,
    /// Exactly 32 chars over {'0','1'}.
    pub bits: String,
}

/// Encode the whole instruction stream. The label table is already
/// complete (normalization runs first), so forward references resolve
/// here without a fixup pass.
pub fn encode_program(
    prog: &Program,
    opts: AsmOptions,
) -> Result<(Vec<EncodedInstruction>, RegisterFile), AsmError> {
    let mut enc = Encoder {
        labels: &prog.labels,
        regs: RegisterFile::new(prog.numeric_regs.clone()),
        strict: opts.strict,
        line: 0,
        pc: 0,
    };
    let mut out = Vec::with_capacity(prog.lines.len());
    for sl in &prog.lines {
        enc.line = sl.line;
        enc.pc = sl.pc;
        let bits = enc.encode_line(sl)?;
        out.push(EncodedInstruction { pc: sl.pc, bits });
    }
    Ok((out, enc.regs))
}

struct Encoder<'a> {
    labels: &'a HashMap<String, u32>,
    regs: RegisterFile,
    strict: bool,
    line: u32,
    pc: u32,
}

impl Encoder<'_> {
    fn encode_line(&mut self, sl: &SourceLine) -> Result<String, AsmError> {
        let mnemonic = sl.tokens[0].to_ascii_lowercase();
        let desc = instructions::lookup(&mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
            line: self.line,
            mnemonic: mnemonic.clone(),
        })?;

        let ops = &sl.tokens[1..];
        let want = match desc.family {
            Family::JumpReg | Family::Jump => 1,
            Family::LoadUpper | Family::LoadStore => 2,
            _ => 3,
        };
        if ops.len() != want {
            return Err(AsmError::MalformedOperand {
                line: self.line,
                detail: format!("{mnemonic} expects {want} operand(s), got {}", ops.len()),
            });
        }

        match desc.family {
            Family::RegRegReg => {
                let rs = self.reg(&ops[1])?;
                let rt = self.reg(&ops[2])?;
                let rd = self.reg(&ops[0])?;
                self.join_bits(&[desc.opcode, &rs, &rt, &rd, "00000", desc.funct])
            }
            Family::RegRegShamt => {
                let rt = self.reg(&ops[1])?;
                let rd = self.reg(&ops[0])?;
                let shamt = self.literal_field(&ops[2], 5)?;
                self.join_bits(&[desc.opcode, "00000", &rt, &rd, &shamt, desc.funct])
            }
            Family::JumpReg => {
                let rs = self.reg(&ops[0])?;
                self.join_bits(&[desc.opcode, &rs, "00000", "00000", "00000", desc.funct])
            }
            Family::RegRegImm => {
                let rs = self.reg(&ops[1])?;
                let rt = self.reg(&ops[0])?;
                let imm = self.literal_field(&ops[2], 16)?;
                self.join_bits(&[desc.opcode, &rs, &rt, &imm])
            }
            Family::LoadUpper => {
                let rt = self.reg(&ops[0])?;
                let imm = self.literal_field(&ops[1], 16)?;
                self.join_bits(&[desc.opcode, "00000", &rt, &imm])
            }
            Family::LoadStore => {
                let (offset, base) = split_mem_operand(&ops[1]).ok_or_else(|| {
                    AsmError::MalformedOperand {
                        line: self.line,
                        detail: format!("expected offset(base), got {}", ops[1]),
                    }
                })?;
                let rs = self.reg(base)?;
                let rt = self.reg(&ops[0])?;
                let imm = self.literal_field(offset, 16)?;
                self.join_bits(&[desc.opcode, &rs, &rt, &imm])
            }
            Family::Branch => {
                let rs = self.reg(&ops[0])?;
                let rt = self.reg(&ops[1])?;
                let offset = self.branch_offset(&ops[2])?;
                let imm = self.field(offset, 16)?;
                self.join_bits(&[desc.opcode, &rs, &rt, &imm])
            }
            Family::Jump => {
                let addr = self.jump_address(&ops[0])?;
                let addr = self.field(addr, 26)?;
                self.join_bits(&[desc.opcode, &addr])
            }
        }
    }

    /// Branch target operand: a bare literal word offset, an absolute
    /// address in a base-marked syntax, a label, or `label±digits`.
    fn branch_offset(&mut self, token: &str) -> Result<i64, AsmError> {
        // signed/#-prefixed literals and bare digits are a word offset as-is
        if token.starts_with('-')
            || token.starts_with('#')
            || token.bytes().all(|b| b.is_ascii_digit())
        {
            return parse_literal(token).ok_or_else(|| self.bad_number(token));
        }
        // base-marked literals are an absolute byte address
        if is_marked_literal(token) {
            let value = parse_literal(token).ok_or_else(|| self.bad_number(token))?;
            return Ok((value - self.pc as i64 - 4) >> 2);
        }
        if is_label_token(token) {
            let addr = self.label_addr(token)?;
            return Ok((addr - self.pc as i64 - 4) >> 2);
        }
        if let Some((label, off)) = self.split_label_offset(token)? {
            let addr = self.label_addr(label)?;
            self.check_label_offset(addr, off, token)?;
            return Ok(((addr - self.pc as i64 - 4) >> 2) + off);
        }
        Err(AsmError::MalformedOperand {
            line: self.line,
            detail: token.to_string(),
        })
    }

    /// J-format target operand: label, `label±digits`, or a literal
    /// absolute address; encoded as a word address.
    fn jump_address(&mut self, token: &str) -> Result<i64, AsmError> {
        if is_label_token(token) {
            let addr = self.label_addr(token)?;
            return Ok(addr >> 2);
        }
        if let Some((label, off)) = self.split_label_offset(token)? {
            let addr = self.label_addr(label)?;
            self.check_label_offset(addr, off, token)?;
            return Ok((addr >> 2) + off);
        }
        match parse_literal(token) {
            Some(value) => Ok(value >> 2),
            None => Err(AsmError::MalformedOperand {
                line: self.line,
                detail: token.to_string(),
            }),
        }
    }

    fn label_addr(&self, label: &str) -> Result<i64, AsmError> {
        self.labels
            .get(label)
            .map(|&a| a as i64)
            .ok_or_else(|| AsmError::UnresolvedLabel {
                line: self.line,
                label: label.to_string(),
            })
    }

    /// Split a `label+digits` / `label-digits` token. Returns the label and
    /// the signed word offset, or `None` when the token has no such shape.
    fn split_label_offset<'t>(
        &self,
        token: &'t str,
    ) -> Result<Option<(&'t str, i64)>, AsmError> {
        let Some(pos) = token.find(['+', '-']) else {
            return Ok(None);
        };
        let (label, rest) = token.split_at(pos);
        let digits = &rest[1..];
        if !is_label_token(label)
            || digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(None);
        }
        let magnitude = parse_literal(digits).ok_or_else(|| self.bad_number(digits))?;
        let off = if rest.starts_with('-') { -magnitude } else { magnitude };
        Ok(Some((label, off)))
    }

    /// Negative-address check for `label±offset`: the label's word address
    /// plus the offset is compared against zero. The final branch/jump
    /// target range is not checked.
    fn check_label_offset(&self, addr: i64, off: i64, token: &str) -> Result<(), AsmError> {
        if (addr >> 2) + off < 0 {
            self.overflow(format!("Address may be negative for {token}"))?;
        }
        Ok(())
    }

    /// Resolve a register token and render its 5-bit field. Out-of-range
    /// indices warn (or abort in strict mode) and encode masked to 5 bits.
    fn reg(&mut self, token: &str) -> Result<String, AsmError> {
        let line = self.line;
        let idx = self
            .regs
            .resolve(token)
            .ok_or_else(|| AsmError::InvalidRegister {
                line,
                token: token.to_string(),
            })?;
        if idx > 31 {
            self.overflow(format!("Register {token} (assigned ${idx}) is too large"))?;
        }
        Ok(format!("{:05b}", idx & 0x1F))
    }

    /// Parse a literal operand and render it as a `width`-bit field.
    fn literal_field(&self, token: &str, width: u32) -> Result<String, AsmError> {
        let value = parse_literal(token).ok_or_else(|| self.bad_number(token))?;
        self.field(value, width)
    }

    /// Render a value as a zero-padded `width`-bit binary field. Negative
    /// values are encoded in two's complement over `width` bits. Values
    /// whose natural magnitude exceeds `width` bits warn and truncate to
    /// the low bits, or abort in strict mode. This single policy covers
    /// register indices, shift amounts, immediates, and jump addresses.
    fn field(&self, value: i64, width: u32) -> Result<String, AsmError> {
        let mut v = value;
        if v < 0 {
            v = (((1i64 << width) - 1) ^ -v) + 1;
        }
        let mask = (1i64 << width) - 1;
        if v > mask {
            self.overflow(format!("Number {value} is too large, will be truncated"))?;
        }
        Ok(format!("{:0w$b}", v & mask, w = width as usize))
    }

    fn join_bits(&self, fields: &[&str]) -> Result<String, AsmError> {
        let bits = fields.concat();
        if bits.len() != 32 {
            return Err(AsmError::WordLength {
                line: self.line,
                bits,
            });
        }
        Ok(bits)
    }

    fn overflow(&self, detail: String) -> Result<(), AsmError> {
        if self.strict {
            return Err(AsmError::Overflow {
                line: self.line,
                detail,
            });
        }
        warn!("Line {}: {detail}", self.line);
        Ok(())
    }

    fn bad_number(&self, token: &str) -> AsmError {
        AsmError::NumberFormat {
            line: self.line,
            token: token.to_string(),
        }
    }
}

/// Split `offset(base)` at the last `(`; both parts must be non-empty and
/// the token must end with `)`.
fn split_mem_operand(token: &str) -> Option<(&str, &str)> {
    let inner = token.strip_suffix(')')?;
    let pos = inner.rfind('(')?;
    let (offset, base) = (&inner[..pos], &inner[pos + 1..]);
    if offset.is_empty() || base.is_empty() {
        return None;
    }
    Some((offset, base))
}

fn is_label_token(token: &str) -> bool {
    let mut bytes = token.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
