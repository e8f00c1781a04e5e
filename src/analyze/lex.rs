use std::ops::Range;

use crate::analyze::{Error, ErrorKind};

const COMMENT: &str = "//";

/// A source line that carries an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Byte range of the code on this line, comment and surrounding whitespace excluded
    pub range: Range<usize>,
    /// The code with every whitespace character removed
    pub text: String,
}

impl Line {
    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.number, self.range.clone())
    }
}

/// Splits source text into significant lines, dropping comments and blank lines.
pub struct Lexer<'src> {
    code: &'src str,
    index: usize,
    line: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(code: &'src str) -> Self {
        Self {
            code,
            index: 0,
            line: 0,
        }
    }

    pub fn next_line(&mut self) -> Option<Line> {
        while let Some((start, raw)) = self.read_raw() {
            let code = match raw.find(COMMENT) {
                Some(end) => &raw[..end],
                None => raw,
            };

            let text: String = code.chars().filter(|c| !c.is_whitespace()).collect();
            if text.is_empty() {
                continue;
            }

            let leading = code.len() - code.trim_start().len();
            let range = (start + leading)..(start + code.trim_end().len());

            return Some(Line {
                number: self.line,
                range,
                text,
            });
        }

        None
    }
}

/// Internals
impl<'src> Lexer<'src> {
    fn read_raw(&mut self) -> Option<(usize, &'src str)> {
        if self.index >= self.code.len() {
            return None;
        }

        let code = self.code;
        let start = self.index;
        let rest = &code[start..];
        let raw = match rest.find('\n') {
            Some(end) => {
                self.index += end + 1;
                &rest[..end]
            }
            None => {
                self.index = code.len();
                rest
            }
        };

        self.line += 1;
        Some((start, raw))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
