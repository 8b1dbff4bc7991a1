//! Tarn Eval - tree-walking interpreter and native bridge.
//!
//! # Architecture
//!
//! - [`Interpreter`]: runs generated programs against the checker's
//!   [`TypeTable`](tarn_types::TypeTable)
//! - [`Value`]: runtime values tagged with their runtime type
//! - [`NativeRegistry`]: host callbacks behind bodiless members, plus the
//!   signatures the checker bakes into the table
//! - [`RuntimeFault`]: faults with `E6xxx` codes; blocks catch them under
//!   [`FaultPolicy::Continue`]
//! - print and input handlers, so hosts and tests can capture output and
//!   script `readLine`

mod config;
mod environment;
pub mod errors;
mod input;
pub mod interpreter;
pub mod natives;
mod print_handler;
mod value;

pub use config::{EvalConfig, FaultPolicy};
pub use errors::{EvalResult, FaultKind, RuntimeFault};
pub use input::{scripted_handler, stdin_handler, InputHandlerImpl, SharedInputHandler};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use natives::{NativeFn, NativeRegistry, OBJECT_TO_STRING};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use value::{Callable, Instance, Payload, Value, CYCLE_MARKER};

#[cfg(test)]
mod tests;
