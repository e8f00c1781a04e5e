use std::{fmt::Display, io, ops::Range, rc::Rc};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

pub mod instr;
pub mod lex;
pub mod parse;

pub type Span = (Rc<String>, Range<usize>);

/// A fatal translation error, tied to the source line it was raised on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct Error {
    pub kind: ErrorKind,
    /// 1-based source line number
    pub line: usize,
    /// Byte range of the instruction text within the source
    pub range: Range<usize>,
}

impl Error {
    pub fn new(kind: ErrorKind, line: usize, range: Range<usize>) -> Self {
        Self { kind, line, range }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn report(&self, source_name: Rc<String>) -> Report<'static, Span> {
        Report::build(ReportKind::Error, (source_name.clone(), self.range.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code(self.code())
            .with_message(&self.kind)
            .with_label(
                Label::new((source_name, self.range.clone()))
                    .with_color(Color::Red)
                    .with_message(self.kind.hint()),
            )
            .finish()
    }

    /// Prints the diagnostic to stderr
    pub fn eprint(&self, source_name: Rc<String>, source: &str) -> io::Result<()> {
        self.report(source_name.clone())
            .eprint((source_name, Source::from(source)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("malformed instruction `{0}`")]
    MalformedInstruction(String),
    #[error("invalid symbol `{0}`")]
    InvalidSymbol(String),
    #[error("unknown destination `{0}`")]
    UnknownDest(String),
    #[error("unknown computation `{0}`")]
    UnknownComp(String),
    #[error("unknown jump `{0}`")]
    UnknownJump(String),
    #[error("address `{0}` does not fit in 15 bits")]
    AddressOutOfRange(String),
    #[error("no variable address left for `{0}`")]
    VariablesExhausted(String),
}

impl ErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedInstruction(_) => ErrorCode::MalformedInstruction,
            Self::InvalidSymbol(_) => ErrorCode::InvalidSymbol,
            Self::UnknownDest(_) | Self::UnknownComp(_) | Self::UnknownJump(_) => {
                ErrorCode::UnknownMnemonic
            }
            Self::AddressOutOfRange(_) => ErrorCode::AddressOutOfRange,
            Self::VariablesExhausted(_) => ErrorCode::VariablesExhausted,
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::MalformedInstruction(_) => "expected `@value`, `(LABEL)` or `dest=comp;jump`",
            Self::InvalidSymbol(_) => {
                "symbols use letters, digits, `_`, `.`, `$`, `:` and may not start with a digit"
            }
            Self::UnknownDest(_) => "expected one of null, M, D, MD, A, AM, AD, AMD",
            Self::UnknownComp(_) => "not in the computation table",
            Self::UnknownJump(_) => "expected one of null, JGT, JEQ, JGE, JLT, JNE, JLE, JMP",
            Self::AddressOutOfRange(_) => "addresses range from 0 to 32767",
            Self::VariablesExhausted(_) => "every RAM address from 16 to 32767 is taken",
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    MalformedInstruction = 1,
    InvalidSymbol,
    UnknownMnemonic,
    AddressOutOfRange,
    VariablesExhausted,
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:02}", *self as u32)
    }
}
