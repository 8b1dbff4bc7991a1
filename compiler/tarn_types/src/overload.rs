//! Overload matching shared by user code and native members.

use std::rc::Rc;

use crate::{Executable, Type, TypeTable};

impl TypeTable {
    /// Whether `exec` accepts arguments of the given types.
    ///
    /// A vararg parameter collects every remaining argument, each of which
    /// must be assignable to its element type. Missing arguments are allowed
    /// for parameters with a default or an optional type. Extra arguments
    /// are rejected.
    pub fn accepts(&self, exec: &Executable, args: &[Type], view: Option<&Type>) -> bool {
        let resolve = |ty: &Type| match view {
            Some(view) => self.resolve(ty, view),
            None => ty.clone(),
        };
        for (position, param) in exec.params.iter().enumerate() {
            let param_ty = resolve(&param.ty);
            if param.vararg {
                return args
                    .get(position..)
                    .unwrap_or_default()
                    .iter()
                    .all(|arg| arg.can_assign_to(&param_ty));
            }
            match args.get(position) {
                Some(arg) => {
                    if !arg.can_assign_to(&param_ty) {
                        return false;
                    }
                }
                None => {
                    if !param.is_omissible() {
                        return false;
                    }
                }
            }
        }
        args.len() <= exec.params.len()
    }

    /// Pick the overload for a call.
    ///
    /// Among accepting candidates, one whose declared arity equals the
    /// argument count wins; otherwise the first in declaration order.
    pub fn select(
        &self,
        candidates: &[Rc<Executable>],
        args: &[Type],
        view: Option<&Type>,
    ) -> Option<Rc<Executable>> {
        let matching: Vec<&Rc<Executable>> = candidates
            .iter()
            .filter(|exec| self.accepts(exec, args, view))
            .collect();
        matching
            .iter()
            .find(|exec| !exec.has_vararg() && exec.params.len() == args.len())
            .or_else(|| matching.first())
            .map(|exec| Rc::clone(exec))
    }
}

#[cfg(test)]
mod tests;
