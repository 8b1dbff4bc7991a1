//! Diagnostic system for compile-time errors.
//!
//! Every phase (lexer, parser, checker) reports problems as a
//! [`Diagnostic`]: an [`ErrorCode`], a message, a primary span and optional
//! notes. Phases collect them in a [`DiagnosticBag`] and the driver decides
//! whether to continue. [`emitter`] renders them for a terminal.

mod bag;
mod diagnostic;
pub mod emitter;
mod error_code;

pub use bag::DiagnosticBag;
pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
