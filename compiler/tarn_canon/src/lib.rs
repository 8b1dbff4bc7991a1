//! IR generation for Tarn.
//!
//! Turns a checked [`SourceUnit`] into a [`Program`]: module globals and the
//! `main` block as canonical IR, plus the classes and functions the unit
//! declared. Method, constructor and function bodies, field initializers and
//! parameter defaults are attached to the members created by the index
//! phase, so the interpreter finds them through the type table.
//!
//! Generation performs no checks. It must only run on units the checker
//! accepted without errors.

mod lower;

use std::rc::Rc;

use tarn_ir::ast::SourceUnit;
use tarn_ir::{canon, Span};
use tarn_types::{Executable, Type, UnitSymbols};

pub use lower::generate;

/// A module-level `var`.
#[derive(Clone, Debug)]
pub struct Global {
    pub name: String,
    pub ty: Type,
    pub init: Option<canon::Expr>,
    pub span: Span,
}

/// Executable form of one source unit.
#[derive(Clone, Debug)]
pub struct Program {
    pub name: String,
    pub globals: Vec<Global>,
    pub main: Option<Rc<canon::Block>>,
    pub classes: Vec<Type>,
    pub functions: Vec<Rc<Executable>>,
}

/// Programs generated from units indexed together.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub name: String,
    pub programs: Vec<Program>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            programs: Vec::new(),
        }
    }

    /// Generate a program per unit. `symbols` must come from indexing
    /// `units` in the same order.
    pub fn generate(name: impl Into<String>, units: &[SourceUnit], symbols: &[UnitSymbols]) -> Self {
        Module {
            name: name.into(),
            programs: units
                .iter()
                .zip(symbols)
                .map(|(unit, symbols)| generate(unit, symbols))
                .collect(),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &Type> {
        self.programs.iter().flat_map(|p| p.classes.iter())
    }

    pub fn functions(&self) -> impl Iterator<Item = &Rc<Executable>> {
        self.programs.iter().flat_map(|p| p.functions.iter())
    }

    pub fn globals(&self) -> impl Iterator<Item = &Global> {
        self.programs.iter().flat_map(|p| p.globals.iter())
    }
}

#[cfg(test)]
mod tests;
