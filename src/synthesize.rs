use std::io::{self, Write};

pub mod code;
pub mod out;

/// A 16-bit Hack machine word, displayed as 16 binary digits.
#[derive(derive_more::Display, derive_more::From, derive_more::Into)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[display("{_0:016b}")]
pub struct Word(u16);

pub trait Encode: std::fmt::Debug {
    fn encode(&self) -> Word;
}

/// A word together with the instruction it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub word: Word,
    pub pc: usize,
    pub line: usize,
    pub text: String,
}

/// Assembled output, one word per real instruction in program order.
#[derive(Debug, Default)]
pub struct Program {
    pub emitted: Vec<Emitted>,
    pub labels: usize,
    pub variables: usize,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, emitted: Emitted) {
        self.emitted.push(emitted);
    }

    pub fn words(&self) -> impl Iterator<Item = Word> + '_ {
        self.emitted.iter().map(|e| e.word)
    }

    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }

    /// Writes one line of 16 binary digits per word
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        for word in self.words() {
            writeln!(writer, "{}", word)?;
        }

        writer.flush()
    }

    pub fn to_text(&self) -> String {
        self.words().map(|word| format!("{}\n", word)).collect()
    }
}
