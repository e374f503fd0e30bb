//! The OpCodes for the Cherie Virtual Machine.

use std::fmt;

/// How the operand region of an instruction is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// No operands.
    None,
    /// `a`: i56.
    A,
    /// `c`: u32, `b`: i24.
    CB,
    /// `c`: u32, `d`: i16, `e`: i8.
    CDE,
    /// `r`: u8, `w`: i48.
    RW,
}

/// The operation code, stored in the low byte of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Does nothing.
    Nop = 0x00,
    /// Pushes register `c` onto the stack.
    PushR = 0x01,
    /// Pushes the immediate `a` onto the stack.
    PushI = 0x02,
    /// Pops the top of the stack into register `c`.
    Pop = 0x03,
    /// Implements `r = w`.
    Load = 0x04,
    /// Pops two values and pushes their sum.
    AddS = 0x05,
    /// Implements `c += b`, `b` is a register.
    AddR = 0x06,
    /// Implements `c = d + e`, `d` is a register and `e` an immediate.
    AddRS = 0x07,
    /// Stops the machine.
    Halt = 0x08,
}

impl OpCode {
    /// Decodes an opcode byte.
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        Some(match byte {
            0x00 => OpCode::Nop,
            0x01 => OpCode::PushR,
            0x02 => OpCode::PushI,
            0x03 => OpCode::Pop,
            0x04 => OpCode::Load,
            0x05 => OpCode::AddS,
            0x06 => OpCode::AddR,
            0x07 => OpCode::AddRS,
            0x08 => OpCode::Halt,
            _ => return None,
        })
    }

    pub fn view(self) -> View {
        match self {
            OpCode::Nop | OpCode::AddS | OpCode::Halt => View::None,
            OpCode::PushI => View::A,
            OpCode::PushR | OpCode::Pop | OpCode::AddR => View::CB,
            OpCode::AddRS => View::CDE,
            OpCode::Load => View::RW,
        }
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> u8 {
        opcode as u8
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            OpCode::Nop => "nop",
            OpCode::PushR => "pushr",
            OpCode::PushI => "pushi",
            OpCode::Pop => "pop",
            OpCode::Load => "load",
            OpCode::AddS => "adds",
            OpCode::AddR => "addr",
            OpCode::AddRS => "addrs",
            OpCode::Halt => "halt",
        })
    }
}
