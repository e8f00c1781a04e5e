use std::{fmt, ops::Range};

use crate::analyze::{Error, ErrorKind};

/// One classified source instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    /// Program counter of this instruction. For a label, the program counter of the next real
    /// instruction.
    pub pc: usize,
    pub line: usize,
    pub range: Range<usize>,
    /// Whitespace-free instruction text
    pub text: String,
}

impl Instruction {
    /// Whether this instruction occupies a program-counter slot
    pub fn is_real(&self) -> bool {
        self.kind.is_real()
    }

    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.line, self.range.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionKind {
    /// `@operand`
    Address { operand: String },
    /// `dest=comp;jump`, absent fields are empty
    Compute {
        dest: String,
        comp: String,
        jump: String,
    },
    /// `(name)`
    Label { name: String },
}

impl InstructionKind {
    pub fn is_real(&self) -> bool {
        !matches!(self, Self::Label { .. })
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address { operand } => write!(f, "@{}", operand),
            Self::Compute { dest, comp, jump } => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if !jump.is_empty() {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
            Self::Label { name } => write!(f, "({})", name),
        }
    }
}

/// A decimal literal: one or more ASCII digits.
pub fn is_constant(operand: &str) -> bool {
    !operand.is_empty() && operand.bytes().all(|b| b.is_ascii_digit())
}

/// A symbol: letters, digits, `_`, `.`, `$` and `:`, not starting with a digit.
pub fn is_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| !c.is_ascii_digit() && is_symbol_char(c))
        && chars.all(is_symbol_char)
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}
