//! Tarn driver.
//!
//! A [`Session`] owns one module graph: the type table, the native registry
//! baked into it, and the modules imported so far. Hosts compile source
//! files into [`Program`](tarn_canon::Program)s and run them through the
//! same session.
//!
//! ```text
//! SourceFile ──parse──► SourceUnit ──index, process──► checked unit
//!                                                          │
//!                                  Program ◄──generate─────┘
//!                                     │
//!                                     ▼
//!                               Interpreter::run
//! ```
//!
//! The `tarn` binary is a thin layer over [`commands`].

pub mod commands;
mod error;
mod session;
mod source;

pub use error::{CompileError, DiagnosticGroup};
pub use session::{LoadError, RunOutcome, Session};
pub use source::{SourceFile, SOURCE_EXTENSION};
