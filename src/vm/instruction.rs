//! Fixed-width instruction encoding.
//!
//! An instruction is a little-endian `u64`. Bits `0..8` hold the opcode and
//! bits `8..64` are the operand region, read through one of the [`View`]s.
//! Signed fields are two's complement and sign-extended when read.

use std::fmt;

use thiserror::Error;

use super::opcode::{OpCode, View};

pub const OPCODE_BITS: u32 = 8;

pub const A_OFFSET: u32 = 8;
pub const A_BITS: u32 = 56;

pub const C_OFFSET: u32 = 8;
pub const C_BITS: u32 = 32;
pub const B_OFFSET: u32 = 40;
pub const B_BITS: u32 = 24;

pub const D_OFFSET: u32 = 40;
pub const D_BITS: u32 = 16;
pub const E_OFFSET: u32 = 56;
pub const E_BITS: u32 = 8;

pub const R_OFFSET: u32 = 8;
pub const R_BITS: u32 = 8;
pub const W_OFFSET: u32 = 16;
pub const W_BITS: u32 = 48;

/// The instruction encoding error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("operand {field} = {value} does not fit in a signed {bits}-bit field")]
    OperandOutOfRange {
        field: &'static str,
        value: i64,
        bits: u32,
    },
}

const fn mask(bits: u32) -> u64 {
    (1 << bits) - 1
}

/// The smallest and largest values of a signed field of `bits` bits.
pub const fn signed_bounds(bits: u32) -> (i64, i64) {
    (-(1 << (bits - 1)), (1 << (bits - 1)) - 1)
}

fn encode_signed(field: &'static str, value: i64, offset: u32, bits: u32) -> Result<u64, EncodeError> {
    let (min, max) = signed_bounds(bits);
    if value < min || value > max {
        return Err(EncodeError::OperandOutOfRange { field, value, bits });
    }
    Ok(((value as u64) & mask(bits)) << offset)
}

fn decode_signed(word: u64, offset: u32, bits: u32) -> i64 {
    let shift = 64 - bits;
    // Move the field to the top, then shift back arithmetically.
    (((word >> offset) << shift) as i64) >> shift
}

fn decode_unsigned(word: u64, offset: u32, bits: u32) -> u64 {
    (word >> offset) & mask(bits)
}

/// A single VM instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction(u64);

impl Instruction {
    /// An instruction with no operands.
    pub fn new(opcode: OpCode) -> Self {
        Self(u64::from(u8::from(opcode)))
    }

    pub const fn from_word(word: u64) -> Self {
        Self(word)
    }

    pub const fn to_word(self) -> u64 {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Encodes the `A` view.
    pub fn encode_a(opcode: OpCode, a: i64) -> Result<Self, EncodeError> {
        Ok(Self(
            Self::new(opcode).0 | encode_signed("a", a, A_OFFSET, A_BITS)?,
        ))
    }

    /// Encodes the `CB` view.
    pub fn encode_cb(opcode: OpCode, c: u32, b: i64) -> Result<Self, EncodeError> {
        Ok(Self(
            Self::new(opcode).0
                | (u64::from(c) << C_OFFSET)
                | encode_signed("b", b, B_OFFSET, B_BITS)?,
        ))
    }

    /// Encodes the `CDE` view.
    pub fn encode_cde(opcode: OpCode, c: u32, d: i64, e: i64) -> Result<Self, EncodeError> {
        Ok(Self(
            Self::new(opcode).0
                | (u64::from(c) << C_OFFSET)
                | encode_signed("d", d, D_OFFSET, D_BITS)?
                | encode_signed("e", e, E_OFFSET, E_BITS)?,
        ))
    }

    /// Encodes the `RW` view.
    pub fn encode_rw(opcode: OpCode, r: u8, w: i64) -> Result<Self, EncodeError> {
        Ok(Self(
            Self::new(opcode).0
                | (u64::from(r) << R_OFFSET)
                | encode_signed("w", w, W_OFFSET, W_BITS)?,
        ))
    }

    pub fn nop() -> Self {
        Self::new(OpCode::Nop)
    }

    /// `pushr rc`
    pub fn pushr(c: u32) -> Self {
        Self(Self::new(OpCode::PushR).0 | (u64::from(c) << C_OFFSET))
    }

    /// `pushi a`
    pub fn pushi(a: i64) -> Result<Self, EncodeError> {
        Self::encode_a(OpCode::PushI, a)
    }

    /// `pop rc`
    pub fn pop(c: u32) -> Self {
        Self(Self::new(OpCode::Pop).0 | (u64::from(c) << C_OFFSET))
    }

    /// `load rr, w`
    pub fn load(r: u8, w: i64) -> Result<Self, EncodeError> {
        Self::encode_rw(OpCode::Load, r, w)
    }

    pub fn adds() -> Self {
        Self::new(OpCode::AddS)
    }

    /// `addr rc, rb`
    pub fn addr(c: u32, b: i64) -> Result<Self, EncodeError> {
        Self::encode_cb(OpCode::AddR, c, b)
    }

    /// `addrs rc, rd, e`
    pub fn addrs(c: u32, d: i64, e: i64) -> Result<Self, EncodeError> {
        Self::encode_cde(OpCode::AddRS, c, d, e)
    }

    pub fn halt() -> Self {
        Self::new(OpCode::Halt)
    }

    /// The raw opcode byte, which may not name a valid opcode.
    pub fn opcode_byte(self) -> u8 {
        decode_unsigned(self.0, 0, OPCODE_BITS) as u8
    }

    pub fn opcode(self) -> Option<OpCode> {
        OpCode::from_byte(self.opcode_byte())
    }

    pub fn a(self) -> i64 {
        decode_signed(self.0, A_OFFSET, A_BITS)
    }

    pub fn c(self) -> u32 {
        decode_unsigned(self.0, C_OFFSET, C_BITS) as u32
    }

    pub fn b(self) -> i64 {
        decode_signed(self.0, B_OFFSET, B_BITS)
    }

    pub fn d(self) -> i64 {
        decode_signed(self.0, D_OFFSET, D_BITS)
    }

    pub fn e(self) -> i64 {
        decode_signed(self.0, E_OFFSET, E_BITS)
    }

    pub fn r(self) -> u8 {
        decode_unsigned(self.0, R_OFFSET, R_BITS) as u8
    }

    pub fn w(self) -> i64 {
        decode_signed(self.0, W_OFFSET, W_BITS)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 8;
        let Some(opcode) = self.opcode() else {
            return write!(f, "{:width$}0x{:02x}", "invalid", self.opcode_byte());
        };
        match opcode.view() {
            View::None => write!(f, "{opcode}"),
            View::A => write!(f, "{opcode:width$}{}", self.a()),
            View::CB if opcode == OpCode::AddR => {
                write!(f, "{opcode:width$}r{}, r{}", self.c(), self.b())
            }
            View::CB => write!(f, "{opcode:width$}r{}", self.c()),
            View::CDE => write!(
                f,
                "{opcode:width$}r{}, r{}, {}",
                self.c(),
                self.d(),
                self.e()
            ),
            View::RW => write!(f, "{opcode:width$}r{}, {}", self.r(), self.w()),
        }
    }
}
