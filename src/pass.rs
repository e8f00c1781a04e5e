use tracing::{info, trace};

use crate::{
    analyze::{Error, ErrorKind, instr::InstructionKind, parse::Parser},
    symbols::{self, SymbolTable},
    synthesize::{
        Emitted, Encode, Program,
        code::{AInstruction, CInstruction},
    },
};

/// First pass: binds every label to the program counter of the instruction following it.
///
/// Returns the number of real instructions in the source.
pub fn define_labels(source: &str, symbols: &mut SymbolTable) -> Result<usize, Error> {
    let mut parser = Parser::new(source);

    while parser.has_more() {
        parser.advance()?;

        let Some(instr) = parser.current() else {
            continue;
        };

        if let InstructionKind::Label { name } = &instr.kind {
            let address = symbols::address(instr.pc)
                .ok_or_else(|| instr.error(ErrorKind::AddressOutOfRange(instr.pc.to_string())))?;

            symbols.try_define_label(name, address);
        }
    }

    Ok(parser.program_counter())
}

/// Second pass: resolves operands, allocating variables in order of first use, and encodes every
/// real instruction.
pub fn generate(source: &str, symbols: &mut SymbolTable) -> Result<Program, Error> {
    let mut program = Program::new();

    for instr in Parser::new(source) {
        let instr = instr?;

        let word = match &instr.kind {
            InstructionKind::Address { operand } => {
                let address = symbols.resolve(operand).map_err(|kind| instr.error(kind))?;
                AInstruction { address }.encode()
            }
            InstructionKind::Compute { dest, comp, jump } => CInstruction::parse(dest, comp, jump)
                .map_err(|kind| instr.error(kind))?
                .encode(),
            InstructionKind::Label { .. } => continue,
        };

        trace!(pc = instr.pc, instr = %instr.kind, %word, "emit");

        program.push(Emitted {
            word,
            pc: instr.pc,
            line: instr.line,
            text: instr.text,
        });
    }

    program.labels = symbols.labels();
    program.variables = symbols.variables();

    info!(
        instructions = program.len(),
        labels = program.labels,
        variables = program.variables,
        "assembled"
    );

    Ok(program)
}
