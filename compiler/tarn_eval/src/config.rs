//! Interpreter configuration.

/// What a block does with a fault raised by one of its statements.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Log and record the fault, then treat the block as finished and resume
    /// after it in the enclosing block.
    #[default]
    Continue,
    /// Unwind to the host. The first fault ends the run.
    Propagate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    pub fault_policy: FaultPolicy,
    /// Nested calls allowed before a call faults.
    pub max_call_depth: usize,
}

impl EvalConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            fault_policy: FaultPolicy::default(),
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
