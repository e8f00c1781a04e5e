use std::fmt;

use strum::{Display, EnumIter, EnumString};

use crate::{
    analyze::ErrorKind,
    symbols::Address,
    synthesize::{Encode, Word},
};

/// Destination field. Bits are `A D M`, high to low, so the discriminant is the position in the
/// listing `null, M, D, MD, A, AM, AD, AMD`.
#[repr(u16)]
#[derive(EnumString, Display, EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dest {
    #[strum(to_string = "null", serialize = "")]
    Null = 0b000,
    M = 0b001,
    D = 0b010,
    MD = 0b011,
    A = 0b100,
    AM = 0b101,
    AD = 0b110,
    AMD = 0b111,
}

/// Jump field. Bits are `lt eq gt`, so the discriminant is the position in the listing
/// `null, JGT, JEQ, JGE, JLT, JNE, JLE, JMP`.
#[repr(u16)]
#[derive(EnumString, Display, EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Jump {
    #[strum(to_string = "null", serialize = "")]
    Null = 0b000,
    JGT = 0b001,
    JEQ = 0b010,
    JGE = 0b011,
    JLT = 0b100,
    JNE = 0b101,
    JLE = 0b110,
    JMP = 0b111,
}

/// Computation field: the `a` bit followed by `c1`..`c6`.
///
/// The codes are the ALU control lines and have no arithmetic relation to the mnemonic, so every
/// entry is spelled out.
#[repr(u16)]
#[derive(EnumString, Display, EnumIter, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comp {
    #[strum(serialize = "0")]
    Zero = 0b0101010,
    #[strum(serialize = "1")]
    One = 0b0111111,
    #[strum(serialize = "-1")]
    MinusOne = 0b0111010,
    #[strum(serialize = "D")]
    D = 0b0001100,
    #[strum(serialize = "A")]
    A = 0b0110000,
    #[strum(serialize = "!D")]
    NotD = 0b0001101,
    #[strum(serialize = "!A")]
    NotA = 0b0110001,
    #[strum(serialize = "-D")]
    NegD = 0b0001111,
    #[strum(serialize = "-A")]
    NegA = 0b0110011,
    #[strum(serialize = "D+1")]
    IncD = 0b0011111,
    #[strum(serialize = "A+1")]
    IncA = 0b0110111,
    #[strum(serialize = "D-1")]
    DecD = 0b0001110,
    #[strum(serialize = "A-1")]
    DecA = 0b0110010,
    #[strum(serialize = "D+A")]
    DPlusA = 0b0000010,
    #[strum(serialize = "D-A")]
    DMinusA = 0b0010011,
    #[strum(serialize = "A-D")]
    AMinusD = 0b0000111,
    #[strum(serialize = "D&A")]
    DAndA = 0b0000000,
    #[strum(serialize = "D|A")]
    DOrA = 0b0010101,

    #[strum(serialize = "M")]
    M = 0b1110000,
    #[strum(serialize = "!M")]
    NotM = 0b1110001,
    #[strum(serialize = "-M")]
    NegM = 0b1110011,
    #[strum(serialize = "M+1")]
    IncM = 0b1110111,
    #[strum(serialize = "M-1")]
    DecM = 0b1110010,
    #[strum(serialize = "D+M")]
    DPlusM = 0b1000010,
    #[strum(serialize = "D-M")]
    DMinusM = 0b1010011,
    #[strum(serialize = "M-D")]
    MMinusD = 0b1000111,
    #[strum(serialize = "D&M")]
    DAndM = 0b1000000,
    #[strum(serialize = "D|M")]
    DOrM = 0b1010101,
}

macro_rules! field_code {
    ($($field:ident),*) => {
        $(
            impl $field {
                pub fn code(self) -> u16 {
                    self as u16
                }
            }

            impl fmt::Binary for $field {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Binary::fmt(&self.code(), f)
                }
            }
        )*
    };
}

field_code!(Dest, Jump, Comp);

/// Parses a destination mnemonic. The empty string and `null` both mean no destination.
pub fn encode_dest(mnemonic: &str) -> Result<Dest, ErrorKind> {
    mnemonic
        .parse()
        .map_err(|_| ErrorKind::UnknownDest(mnemonic.to_owned()))
}

pub fn encode_comp(mnemonic: &str) -> Result<Comp, ErrorKind> {
    mnemonic
        .parse()
        .map_err(|_| ErrorKind::UnknownComp(mnemonic.to_owned()))
}

/// Parses a jump mnemonic. The empty string and `null` both mean no jump.
pub fn encode_jump(mnemonic: &str) -> Result<Jump, ErrorKind> {
    mnemonic
        .parse()
        .map_err(|_| ErrorKind::UnknownJump(mnemonic.to_owned()))
}

/// A-instruction.
///
/// Encoding:
/// 15 14 13 12 11 10 9  8  7  6  5  4  3  2  1  0
/// 0  address
///
/// - address: 15-bit value loaded into the A register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AInstruction {
    pub address: Address,
}

impl Encode for AInstruction {
    fn encode(&self) -> Word {
        let address: u16 = self.address.into();
        Word::from(address)
    }
}

/// C-instruction.
///
/// Encoding:
/// 15 14 13 12 11 10 9  8  7  6  5  4  3  2  1  0
/// 1  1  1  a  c1 c2 c3 c4 c5 c6 d1 d2 d3 j1 j2 j3
///
/// - a, c1..c6: computation
/// - d1..d3: destination
/// - j1..j3: jump condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CInstruction {
    pub dest: Dest,
    pub comp: Comp,
    pub jump: Jump,
}

impl CInstruction {
    pub fn parse(dest: &str, comp: &str, jump: &str) -> Result<Self, ErrorKind> {
        Ok(Self {
            dest: encode_dest(dest)?,
            comp: encode_comp(comp)?,
            jump: encode_jump(jump)?,
        })
    }
}

impl Encode for CInstruction {
    fn encode(&self) -> Word {
        let comp = self.comp.code();
        let dest = self.dest.code();
        let jump = self.jump.code();

        Word::from((0b111 << 13) | (comp << 6) | (dest << 3) | jump)
    }
}
