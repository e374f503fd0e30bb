use super::error::VmFault;

/// Number of general purpose registers, `r0` to `r8`.
pub const REGISTER_COUNT: usize = 9;

/// The machine status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Running,
    Halted,
    Faulted(VmFault),
}

/// The execution state of the machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Index of the next instruction.
    pub pc: usize,
    pub registers: [i64; REGISTER_COUNT],
    pub stack: Vec<i64>,
    pub status: Status,
}

impl State {
    /// A running state with zeroed registers and an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}
