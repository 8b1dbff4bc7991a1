//! Operator vocabularies.
//!
//! Every operator is sugar for a method call on the left operand. The
//! method names returned by [`BinaryOp::method_name`] and
//! [`UnaryOp::method_name`] are the contract between user classes, the
//! native bridge and the checker.

use std::fmt;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    IntDiv,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
    Range,
}

impl BinaryOp {
    /// Surface symbol used in source and diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::IntDiv => "//",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Range => "..",
        }
    }

    /// Name of the `operator` method implementing this operator.
    ///
    /// All six comparisons share `compare`, which returns an `int` ordering.
    pub const fn method_name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::Mod => "modulo",
            BinaryOp::Pow => "power",
            BinaryOp::IntDiv => "intDivide",
            BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq
            | BinaryOp::Eq
            | BinaryOp::NotEq => "compare",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Range => "range",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
                | BinaryOp::Eq
                | BinaryOp::NotEq
        )
    }

    /// Operators that may retry with swapped operands when the left operand
    /// has no matching method.
    pub const fn is_bidirectional(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Mul | BinaryOp::Eq | BinaryOp::NotEq
        )
    }

    /// Interpret the `int` result of `compare` for a comparison operator.
    ///
    /// Returns `false` for non-comparison operators.
    pub const fn compare_holds(self, ordering: i64) -> bool {
        match self {
            BinaryOp::Lt => ordering < 0,
            BinaryOp::Gt => ordering > 0,
            BinaryOp::LtEq => ordering <= 0,
            BinaryOp::GtEq => ordering >= 0,
            BinaryOp::Eq => ordering == 0,
            BinaryOp::NotEq => ordering != 0,
            _ => false,
        }
    }

    /// Every binary operator method name, for validating `operator` methods.
    pub const METHOD_NAMES: [&'static str; 11] = [
        "add",
        "subtract",
        "multiply",
        "divide",
        "modulo",
        "power",
        "intDivide",
        "compare",
        "and",
        "or",
        "range",
    ];
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }

    pub const fn method_name(self) -> &'static str {
        match self {
            UnaryOp::Plus => "positive",
            UnaryOp::Neg => "negative",
            UnaryOp::Not => "not",
        }
    }

    pub const METHOD_NAMES: [&'static str; 3] = ["positive", "negative", "not"];
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Assignment operators. Compound forms desugar to a binary operator
/// followed by a plain store.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    IntDiv,
    Pow,
}

impl AssignOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            AssignOp::Set => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::IntDiv => "//=",
            AssignOp::Pow => "**=",
        }
    }

    /// The binary operator a compound assignment applies, `None` for `=`.
    pub const fn binary(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Set => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Sub => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::Mod => Some(BinaryOp::Mod),
            AssignOp::IntDiv => Some(BinaryOp::IntDiv),
            AssignOp::Pow => Some(BinaryOp::Pow),
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests;
