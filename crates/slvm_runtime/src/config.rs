//! VM configuration.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VmConfig {
    /// Entries left on the stack at the end of a segment are an error rather
    /// than a warning.
    pub strict_stack: bool,
    /// Log every executed instruction at `trace` level.
    pub trace: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            strict_stack: true,
            trace: false,
        }
    }
}
