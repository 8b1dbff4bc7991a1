//! Assignability.
//!
//! `source.can_assign_to(target)` decides whether a value of `source` may be
//! used where `target` is expected. The relation is reflexive, bounded above
//! by `object`, and not symmetric.

use crate::{Type, TypeKind};

impl Type {
    pub fn can_assign_to(&self, target: &Type) -> bool {
        if target.is_object() || self == target {
            return true;
        }

        // Source-side overrides.
        match self.kind() {
            TypeKind::Union(options) => {
                return options.iter().any(|option| option.can_assign_to(target));
            }
            TypeKind::Optional(inner) => {
                if let TypeKind::Optional(target_inner) = target.kind() {
                    return inner == target_inner;
                }
            }
            TypeKind::Parameterized { base, args } => {
                if let TypeKind::Parameterized {
                    base: target_base,
                    args: target_args,
                } = target.kind()
                {
                    return base.can_assign_to(target_base)
                        && args.len() == target_args.len()
                        && args.iter().zip(target_args).all(|(a, b)| a == b);
                }
                if base.can_assign_to(target) {
                    return true;
                }
            }
            TypeKind::SelfType(bound) => return bound.can_assign_to(target),
            TypeKind::TypeParameter { bound, .. } => {
                if bound.can_assign_to(target) {
                    return true;
                }
            }
            TypeKind::Function { ret, params } => {
                if let TypeKind::Function {
                    ret: target_ret,
                    params: target_params,
                } = target.kind()
                {
                    return ret == target_ret && params == target_params;
                }
            }
            _ => {}
        }

        match target.kind() {
            TypeKind::SelfType(bound) => self.can_assign_to(bound),
            TypeKind::Optional(inner) => self == inner || self.is_null(),
            // A plain source against a union target is accepted when one
            // option accepts it.
            TypeKind::Union(options) => options.iter().any(|option| self.can_assign_to(option)),
            TypeKind::Parameterized { base, .. } => self.can_assign_to(base),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
