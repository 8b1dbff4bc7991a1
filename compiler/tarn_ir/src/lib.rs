//! Tarn IR - shared syntax and executable representations.
//!
//! This crate holds the data structures every compiler stage agrees on:
//! - [`Span`] for source locations
//! - [`ast`]: the syntax tree produced by the parser and read by the checker
//! - [`canon`]: the executable tree produced by the IR generator and walked
//!   by the interpreter
//! - operator and modifier vocabularies shared by all of the above
//!
//! Executable nodes refer to symbols by name only. Resolution happens at run
//! time against the type table, so this crate has no dependency on the type
//! model.

pub mod ast;
pub mod canon;
mod modifiers;
mod operators;
mod span;

pub use modifiers::Modifiers;
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use span::{Span, SpanError};
