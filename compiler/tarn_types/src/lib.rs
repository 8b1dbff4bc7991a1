//! Type model for Tarn.
//!
//! A [`Type`] is a cheap, reference-counted handle compared by identity.
//! The variants in [`TypeKind`] cover nominal types (primitives and
//! classes), generic instantiations, unions, optionals, function types and a
//! few special forms (`this`, type parameters, `void`/`null`, and the
//! reflective type-of-a-type).
//!
//! Nominal types own their members. Members are created during symbol
//! registration; their bodies, field initializers and parameter defaults are
//! attached afterwards by the IR generator through write-once cells, so the
//! interpreter reaches executable code through the same handles the checker
//! used.
//!
//! The [`TypeTable`] owns the builtins and every registered class and free
//! function of one module graph. It is shared by reference between the
//! checker and the interpreter.

mod assign;
mod lookup;
mod member;
mod overload;
mod symbols;
mod table;
mod ty;

#[cfg(test)]
mod test_support;

pub use lookup::OperatorMatch;
pub use member::{Executable, ExecutableKind, Field, Member, Parameter};
pub use symbols::{ItemSymbol, UnitSymbols};
pub use table::{Builtins, Checkpoint, NativeDecl, TypeTable};
pub use ty::{Dummy, Nominal, PrimitiveKind, Type, TypeKind, WeakType};
