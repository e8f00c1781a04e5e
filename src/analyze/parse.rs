use crate::analyze::{
    Error, ErrorKind,
    instr::{Instruction, InstructionKind, is_constant, is_symbol},
    lex::{Lexer, Line},
};

/// Classifies source lines into instructions.
///
/// The parser keeps one line of lookahead so [`has_more`](Self::has_more) can answer without
/// consuming anything. Each parser walks the source once; a second pass builds a new one.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    next: Option<Line>,
    current: Option<Instruction>,
    pc: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let next = lexer.next_line();

        Self {
            lexer,
            next,
            current: None,
            pc: 0,
        }
    }

    /// Whether another instruction remains
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Moves on to the next instruction. Does nothing once the source is exhausted.
    pub fn advance(&mut self) -> Result<(), Error> {
        let Some(instr) = self.step() else {
            return Ok(());
        };

        match instr {
            Ok(instr) => {
                self.current = Some(instr);
                Ok(())
            }
            Err(err) => {
                self.current = None;
                Err(err)
            }
        }
    }

    /// The instruction classified by the last successful [`advance`](Self::advance)
    pub fn current(&self) -> Option<&Instruction> {
        self.current.as_ref()
    }

    /// Program counter the next real instruction will receive
    pub fn program_counter(&self) -> usize {
        self.pc
    }
}

/// Internals
impl Parser<'_> {
    fn step(&mut self) -> Option<Result<Instruction, Error>> {
        let line = self.next.take()?;
        self.next = self.lexer.next_line();

        Some(self.classify(line))
    }

    fn classify(&mut self, line: Line) -> Result<Instruction, Error> {
        let kind = if let Some(operand) = line.text.strip_prefix('@') {
            parse_address(operand, &line)?
        } else if line.text.starts_with('(') {
            parse_label(&line)?
        } else {
            parse_compute(&line)?
        };

        let pc = self.pc;
        if kind.is_real() {
            self.pc += 1;
        }

        Ok(Instruction {
            kind,
            pc,
            line: line.number,
            range: line.range,
            text: line.text,
        })
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Instruction, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

fn parse_address(operand: &str, line: &Line) -> Result<InstructionKind, Error> {
    if operand.is_empty() {
        return Err(line.error(ErrorKind::MalformedInstruction(line.text.clone())));
    }

    let unsigned = operand.strip_prefix('-').unwrap_or(operand);
    if !is_constant(unsigned) && !is_symbol(operand) {
        return Err(line.error(ErrorKind::InvalidSymbol(operand.to_owned())));
    }

    Ok(InstructionKind::Address {
        operand: operand.to_owned(),
    })
}

fn parse_label(line: &Line) -> Result<InstructionKind, Error> {
    let Some(name) = line
        .text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .filter(|name| !name.is_empty())
    else {
        return Err(line.error(ErrorKind::MalformedInstruction(line.text.clone())));
    };

    if !is_symbol(name) {
        return Err(line.error(ErrorKind::InvalidSymbol(name.to_owned())));
    }

    Ok(InstructionKind::Label {
        name: name.to_owned(),
    })
}

fn parse_compute(line: &Line) -> Result<InstructionKind, Error> {
    let text = line.text.as_str();

    let (dest, rest) = match text.split_once('=') {
        Some((dest, rest)) => (Some(dest), rest),
        None => (None, text),
    };

    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) => (comp, Some(jump)),
        None => (rest, None),
    };

    let malformed = comp.is_empty()
        || rest.contains('=')
        || dest.is_some_and(|d| d.is_empty() || d.contains(';'))
        || jump.is_some_and(|j| j.is_empty() || j.contains(';'));

    if malformed {
        return Err(line.error(ErrorKind::MalformedInstruction(line.text.clone())));
    }

    Ok(InstructionKind::Compute {
        dest: dest.unwrap_or_default().to_owned(),
        comp: comp.to_owned(),
        jump: jump.unwrap_or_default().to_owned(),
    })
}
