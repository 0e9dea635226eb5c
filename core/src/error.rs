use std::io;

/// Faults that abort session start (loading) or a single execution step.
///
/// Loading faults are fatal to the session. `UnknownInstruction` and the
/// stack faults are fatal to the step that raised them; the state is left
/// as it was before the step, so the caller decides whether to halt
/// (recommended) or inspect.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program image doesn't fit between the load offset and the end
    /// of memory.
    #[error("program image is {size} bytes, the maximum is 3584")]
    ProgramTooLarge { size: usize },

    /// The program image source could not be read.
    #[error("failed to read program image")]
    Io(#[from] io::Error),

    /// The word at the program counter matches no instruction pattern.
    /// Either the program is corrupt or the program counter landed in data.
    #[error("unknown instruction {opcode:#06X}")]
    UnknownInstruction { opcode: u16 },

    /// A subroutine return was executed with an empty call stack.
    #[error("subroutine return with an empty call stack")]
    StackUnderflow,

    /// A subroutine call was executed with all 16 stack slots in use.
    #[error("subroutine call nesting exceeds the stack depth")]
    StackOverflow,
}
