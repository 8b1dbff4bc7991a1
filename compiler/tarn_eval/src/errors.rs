//! Runtime faults.
//!
//! A [`RuntimeFault`] is raised for conditions only observable while running:
//! division by zero, index out of bounds, or a call the checker could not
//! prove. Factory functions are the public way to build one; each sets a
//! [`FaultKind`] whose `Display` is the user-visible message and whose
//! [`code`](FaultKind::code) places it in the `E6xxx` range.

use std::fmt;

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::Span;

use crate::Value;

/// Result of evaluating an expression or calling an executable.
pub type EvalResult = Result<Value, RuntimeFault>;

/// Typed fault category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaultKind {
    DivisionByZero,
    IndexOutOfBounds { index: i64, len: usize },
    UnknownVariable { name: String },
    UnknownMember { type_name: String, member: String },
    NoOverload { name: String, args: String },
    NoOperator { op: String, operands: String },
    NotCallable { type_name: String },
    NotIterable { type_name: String },
    NativeMissing { symbol: String },
    NullReceiver { member: String },
    CallDepthExceeded { limit: usize },
    InvalidNativeArgument { symbol: String, detail: String },
    NoReceiver { member: String },
    TypeMismatch { expected: String, found: String },
}

impl FaultKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DivisionByZero => ErrorCode::E6001,
            Self::IndexOutOfBounds { .. } => ErrorCode::E6002,
            Self::UnknownVariable { .. } => ErrorCode::E6003,
            Self::UnknownMember { .. } => ErrorCode::E6004,
            Self::NoOverload { .. } => ErrorCode::E6005,
            Self::NoOperator { .. } => ErrorCode::E6006,
            Self::NotCallable { .. } => ErrorCode::E6007,
            Self::NotIterable { .. } => ErrorCode::E6008,
            Self::NativeMissing { .. } => ErrorCode::E6009,
            Self::NullReceiver { .. } => ErrorCode::E6010,
            Self::CallDepthExceeded { .. } => ErrorCode::E6011,
            Self::InvalidNativeArgument { .. } => ErrorCode::E6012,
            Self::NoReceiver { .. } => ErrorCode::E6013,
            Self::TypeMismatch { .. } => ErrorCode::E6014,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for length {len}")
            }
            Self::UnknownVariable { name } => write!(f, "unknown variable `{name}`"),
            Self::UnknownMember { type_name, member } => {
                write!(f, "`{type_name}` has no member `{member}`")
            }
            Self::NoOverload { name, args } => {
                write!(f, "no overload of `{name}` accepts ({args})")
            }
            Self::NoOperator { op, operands } => {
                write!(f, "operator `{op}` cannot be applied to {operands}")
            }
            Self::NotCallable { type_name } => write!(f, "`{type_name}` is not callable"),
            Self::NotIterable { type_name } => write!(f, "`{type_name}` is not iterable"),
            Self::NativeMissing { symbol } => {
                write!(f, "native `{symbol}` has no registered implementation")
            }
            Self::NullReceiver { member } => write!(f, "cannot access `{member}` on null"),
            Self::CallDepthExceeded { limit } => {
                write!(f, "maximum call depth of {limit} exceeded")
            }
            Self::InvalidNativeArgument { symbol, detail } => {
                write!(f, "invalid argument to native `{symbol}`: {detail}")
            }
            Self::NoReceiver { member } => {
                write!(f, "instance member `{member}` needs a receiver")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected a value of type `{expected}`, found `{found}`")
            }
        }
    }
}

/// A fault raised while running, with the location it was raised at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeFault {
    pub kind: FaultKind,
    pub span: Option<Span>,
}

impl RuntimeFault {
    pub fn from_kind(kind: FaultKind) -> Self {
        RuntimeFault { kind, span: None }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code()).with_message(self.message());
        match self.span {
            Some(span) => diagnostic.with_label(span, "raised here"),
            None => diagnostic,
        }
    }
}

impl fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.kind)
    }
}

impl std::error::Error for RuntimeFault {}

#[cold]
pub fn division_by_zero() -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::DivisionByZero)
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn unknown_variable(name: &str) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::UnknownVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_member(type_name: impl fmt::Display, member: &str) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::UnknownMember {
        type_name: type_name.to_string(),
        member: member.to_string(),
    })
}

/// No overload of `name` accepts arguments of the given runtime types.
#[cold]
pub fn no_overload(name: &str, args: &[Value]) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::NoOverload {
        name: name.to_string(),
        args: describe_types(args),
    })
}

#[cold]
pub fn no_operator(op: impl fmt::Display, operands: &[&Value]) -> RuntimeFault {
    let operands = operands
        .iter()
        .map(|v| format!("`{}`", v.ty()))
        .collect::<Vec<_>>()
        .join(" and ");
    RuntimeFault::from_kind(FaultKind::NoOperator {
        op: op.to_string(),
        operands,
    })
}

#[cold]
pub fn not_callable(type_name: impl fmt::Display) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_iterable(type_name: impl fmt::Display) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn native_missing(symbol: &str) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::NativeMissing {
        symbol: symbol.to_string(),
    })
}

#[cold]
pub fn null_receiver(member: &str) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::NullReceiver {
        member: member.to_string(),
    })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::CallDepthExceeded { limit })
}

#[cold]
pub fn invalid_native_argument(symbol: &str, detail: impl Into<String>) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::InvalidNativeArgument {
        symbol: symbol.to_string(),
        detail: detail.into(),
    })
}

#[cold]
pub fn no_receiver(member: &str) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::NoReceiver {
        member: member.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: impl fmt::Display, found: &Value) -> RuntimeFault {
    RuntimeFault::from_kind(FaultKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.ty().to_string(),
    })
}

fn describe_types(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.ty().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
