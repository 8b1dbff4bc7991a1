//! Symbols created for the items of one source unit.
//!
//! The index phase produces one [`UnitSymbols`] per unit, with exactly one
//! entry per top-level item and, for classes, one member per declared
//! member, both in source order. The IR generator walks the syntax tree in
//! lockstep with these lists to attach bodies and initializers.

use std::rc::Rc;

use crate::{Executable, Member, Type};

#[derive(Clone, Debug)]
pub enum ItemSymbol {
    Class { ty: Type, members: Vec<Member> },
    Function(Rc<Executable>),
    /// Module-level variable; the type is settled by the process phase.
    Global { name: String, ty: Type },
    Main,
    /// Item that failed to register. Only present alongside diagnostics.
    Invalid,
}

#[derive(Clone, Debug, Default)]
pub struct UnitSymbols {
    pub items: Vec<ItemSymbol>,
}
