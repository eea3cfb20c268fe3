use thiserror::Error;

/// Fatal assembly diagnostics. Every variant names the 1-based source line
/// it was raised on; the run aborts on the first one.
#[derive(Debug, Error)]
pub enum AsmError {
    #[error("Line {line}: Invalid number format: {token}")]
    NumberFormat { line: u32, token: String },
    #[error("Line {line}: Invalid register: {token}")]
    InvalidRegister { line: u32, token: String },
    #[error("Line {line}: Invalid opcode: {mnemonic}")]
    UnknownOpcode { line: u32, mnemonic: String },
    #[error("Line {line}: Invalid operand: {detail}")]
    MalformedOperand { line: u32, detail: String },
    #[error("Line {line}: Label {label} not found")]
    UnresolvedLabel { line: u32, label: String },
    #[error("Line {line}: Invalid label: {text}")]
    MalformedLabel { line: u32, text: String },
    #[error("Line {line}: Duplicate label: {label}")]
    DuplicateLabel { line: u32, label: String },
    /// Raised only in strict mode; relaxed mode logs a warning instead and
    /// continues with the truncated value.
    #[error("Line {line}: {detail}")]
    Overflow { line: u32, detail: String },
    /// Field concatenation missed 32 bits. Should never trigger for a
    /// well-formed handler.
    #[error("Line {line}: Invalid word length: {bits}")]
    WordLength { line: u32, bits: String },
}
