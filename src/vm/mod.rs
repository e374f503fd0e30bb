//! The Cherie Virtual Machine.
//!
//! A register and stack machine with nine `i64` registers and an unbounded
//! operand stack. It runs hand assembled [`Instruction`] sequences and is
//! independent of the front end.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod state;

pub use error::VmFault;
pub use instruction::{EncodeError, Instruction};
pub use opcode::{OpCode, View};
pub use state::{State, Status, REGISTER_COUNT};

/// Executes a program against a [`State`].
#[derive(Debug, Clone, Copy)]
pub struct Vm<'a> {
    program: &'a [Instruction],
}

impl<'a> Vm<'a> {
    pub fn new(program: &'a [Instruction]) -> Self {
        Vm { program }
    }

    pub fn program(&self) -> &'a [Instruction] {
        self.program
    }

    /// Runs until the machine halts or faults.
    pub fn run(&self, state: &mut State) -> Result<(), VmFault> {
        while state.is_running() {
            self.step(state)?;
        }
        Ok(())
    }

    /// Executes a single instruction.
    ///
    /// A fault moves the state to [`Status::Faulted`] and is also returned.
    /// Stepping a halted state does nothing, stepping a faulted state returns
    /// the recorded fault again.
    pub fn step(&self, state: &mut State) -> Result<(), VmFault> {
        match state.status {
            Status::Running => {}
            Status::Halted => return Ok(()),
            Status::Faulted(fault) => return Err(fault),
        }
        self.execute(state).inspect_err(|fault| {
            log::debug!("vm faulted: {fault}");
            state.status = Status::Faulted(*fault);
        })
    }

    fn execute(&self, state: &mut State) -> Result<(), VmFault> {
        let pc = state.pc;
        let instruction = *self
            .program
            .get(pc)
            .ok_or(VmFault::ProgramCounterOutOfBounds { pc })?;
        state.pc += 1;
        log::trace!("{pc:>6}  {instruction}");

        let opcode = instruction.opcode().ok_or(VmFault::InvalidOpcode {
            pc,
            opcode: instruction.opcode_byte(),
        })?;

        match opcode {
            OpCode::Nop => {}
            OpCode::PushR => {
                let value = *register(state, pc, i64::from(instruction.c()))?;
                state.stack.push(value);
            }
            OpCode::PushI => state.stack.push(instruction.a()),
            OpCode::Pop => {
                // Validate the target before touching the stack.
                register(state, pc, i64::from(instruction.c()))?;
                let value = state.stack.pop().ok_or(VmFault::StackUnderflow { pc })?;
                *register(state, pc, i64::from(instruction.c()))? = value;
            }
            OpCode::Load => {
                *register(state, pc, i64::from(instruction.r()))? = instruction.w();
            }
            OpCode::AddS => {
                let rhs = state.stack.pop().unwrap_or(0);
                let lhs = state.stack.pop().unwrap_or(0);
                state.stack.push(lhs.wrapping_add(rhs));
            }
            OpCode::AddR => {
                let rhs = *register(state, pc, instruction.b())?;
                let target = register(state, pc, i64::from(instruction.c()))?;
                *target = target.wrapping_add(rhs);
            }
            OpCode::AddRS => {
                let value = register(state, pc, instruction.d())?.wrapping_add(instruction.e());
                *register(state, pc, i64::from(instruction.c()))? = value;
            }
            OpCode::Halt => {
                state.status = Status::Halted;
                log::debug!("vm halted at {pc}");
            }
        }
        Ok(())
    }
}

/// Returns the register at `index`, or faults if there is no such register.
fn register(state: &mut State, pc: usize, index: i64) -> Result<&mut i64, VmFault> {
    usize::try_from(index)
        .ok()
        .and_then(|i| state.registers.get_mut(i))
        .ok_or(VmFault::InvalidRegister {
            pc,
            register: index,
        })
}
