//! Semantic checking for Tarn.
//!
//! The [`Processor`] runs in two strictly ordered phases over all units of a
//! module:
//!
//! 1. **Index** registers every class, then every free function, then every
//!    class member, so bodies may refer to anything declared anywhere in the
//!    module.
//! 2. **Process** walks every body, infers expression types bottom-up and
//!    validates declarations, recording diagnostics without stopping.
//!
//! Native members described by host signature text are baked into the
//! [`TypeTable`](tarn_types::TypeTable) before any unit is indexed, through
//! the same type resolution as user declarations.
//!
//! # Module Structure
//!
//! - `processor`: state, scopes and diagnostics plumbing
//! - `type_resolution`: written types to [`Type`](tarn_types::Type)
//! - `natives`: baking host signatures
//! - `registration`: the index phase
//! - `imports`: merging an already generated module
//! - `declarations`: modifier and protocol validation, bodies
//! - `stmt`, `expr`, `call`: body checking

mod call;
mod declarations;
mod expr;
mod imports;
mod natives;
mod processor;
mod registration;
mod stmt;
mod type_resolution;

pub use processor::Processor;

#[cfg(test)]
mod tests;
