use std::collections::HashMap;

use tracing::debug;
use ux::u15;

use crate::analyze::{
    ErrorKind,
    instr::{is_constant, is_symbol},
};

pub type Address = u15;

/// Largest address an A-instruction can load.
pub const MAX_ADDRESS: u16 = 0x7fff;

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

const PREDEFINED: [(&str, u16); 7] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("SCREEN", 0x4000),
    ("KBD", 0x6000),
];

/// Converts a value to an address if it fits in 15 bits.
pub fn address(value: usize) -> Option<Address> {
    u16::try_from(value)
        .ok()
        .filter(|&value| value <= MAX_ADDRESS)
        .map(u15::new)
}

/// Names to addresses: predefined symbols, labels and variables.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Address>,
    next_variable: u16,
    labels: usize,
    variables: usize,
}

impl SymbolTable {
    /// A table holding `R0`..`R15`, `SP`, `LCL`, `ARG`, `THIS`, `THAT`, `SCREEN` and `KBD`.
    pub fn seed() -> Self {
        let registers = (0..16).map(|r| (format!("R{}", r), u15::new(r)));
        let named = PREDEFINED
            .iter()
            .map(|&(name, addr)| (name.to_owned(), u15::new(addr)));

        Self {
            symbols: registers.chain(named).collect(),
            next_variable: VARIABLE_BASE,
            labels: 0,
            variables: 0,
        }
    }

    /// Binds a label unless the name is already taken. Returns whether it was inserted.
    pub fn try_define_label(&mut self, name: &str, address: Address) -> bool {
        if let Some(existing) = self.symbols.get(name) {
            debug!(label = name, %existing, "ignoring redefinition");
            return false;
        }

        debug!(label = name, %address, "defined label");
        self.symbols.insert(name.to_owned(), address);
        self.labels += 1;
        true
    }

    /// Resolves an A-instruction operand.
    ///
    /// Decimal literals resolve to themselves. Known symbols resolve to their address. Any other
    /// symbol becomes a variable at the next free RAM address.
    pub fn resolve(&mut self, operand: &str) -> Result<Address, ErrorKind> {
        if is_constant(operand) {
            return operand
                .parse::<usize>()
                .ok()
                .and_then(address)
                .ok_or_else(|| ErrorKind::AddressOutOfRange(operand.to_owned()));
        }

        if operand.strip_prefix('-').is_some_and(is_constant) {
            return Err(ErrorKind::AddressOutOfRange(operand.to_owned()));
        }

        if let Some(&address) = self.symbols.get(operand) {
            return Ok(address);
        }

        if !is_symbol(operand) {
            return Err(ErrorKind::InvalidSymbol(operand.to_owned()));
        }

        self.allocate(operand)
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        self.symbols.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of labels defined so far
    pub fn labels(&self) -> usize {
        self.labels
    }

    /// Number of variables allocated so far
    pub fn variables(&self) -> usize {
        self.variables
    }

    fn allocate(&mut self, name: &str) -> Result<Address, ErrorKind> {
        let address = address(self.next_variable.into())
            .ok_or_else(|| ErrorKind::VariablesExhausted(name.to_owned()))?;

        debug!(variable = name, %address, "allocated variable");
        self.symbols.insert(name.to_owned(), address);
        self.next_variable += 1;
        self.variables += 1;

        Ok(address)
    }
}
