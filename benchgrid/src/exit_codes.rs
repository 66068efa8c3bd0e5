#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// No result files matched the expected naming/timestamp pattern.
    NoInput = 10,

    /// Invalid CLI flags or arguments.
    InvalidInput = 30,

    /// Internal error (IO errors, unexpected invariants).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
