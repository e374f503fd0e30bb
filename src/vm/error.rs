use thiserror::Error;

/// A fault raised while executing an instruction. `pc` is the index of the
/// faulting instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VmFault {
    #[error("invalid opcode 0x{opcode:02x} at {pc}")]
    InvalidOpcode { pc: usize, opcode: u8 },
    #[error("invalid register r{register} at {pc}")]
    InvalidRegister { pc: usize, register: i64 },
    #[error("pop from empty stack at {pc}")]
    StackUnderflow { pc: usize },
    #[error("program counter {pc} is out of bounds")]
    ProgramCounterOutOfBounds { pc: usize },
}
