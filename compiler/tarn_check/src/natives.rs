//! Baking host-declared native members into the type table.

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::Span;
use tarn_types::{ExecutableKind, Member, NativeDecl};

use crate::processor::Context;
use crate::Processor;

impl Processor<'_> {
    /// Parse each native signature and attach the resulting member to its
    /// owner type, or register it as a free function.
    ///
    /// Runs before any unit is indexed, so only builtin types can own
    /// natives.
    #[tracing::instrument(level = "debug", skip_all, fields(count = decls.len()))]
    pub fn bake_natives(&mut self, decls: &[NativeDecl]) {
        for decl in decls {
            self.bake_native(decl);
        }
    }

    fn bake_native(&mut self, decl: &NativeDecl) {
        let signature = match tarn_parse::parse_signature(&decl.signature) {
            Ok(signature) => signature,
            Err(errors) => {
                let mut diagnostic = Diagnostic::error(ErrorCode::E2022)
                    .with_message(format!("invalid native signature for `{}`", decl.symbol))
                    .with_label(Span::DUMMY, "")
                    .with_note(format!("signature: {}", decl.signature));
                if let Some(first) = errors.iter().next() {
                    diagnostic = diagnostic.with_note(first.message.clone());
                }
                self.report(diagnostic);
                return;
            }
        };

        let owner = match decl.owner() {
            Some(name) => match self.table.type_named(name) {
                Some(ty) if ty.as_nominal().is_some() => Some(ty),
                _ => {
                    self.error(
                        ErrorCode::E2022,
                        Span::DUMMY,
                        format!("native `{}` names unknown owner type `{name}`", decl.symbol),
                    );
                    return;
                }
            },
            None => None,
        };

        let context = Context {
            class: owner.clone(),
            ..Context::global()
        };
        let kind = if owner.is_some() {
            ExecutableKind::Method
        } else {
            ExecutableKind::Function
        };
        let exec = self.with_body(context, |this| {
            this.build_executable(&signature, kind, owner.as_ref(), Some(decl.symbol.clone()))
        });

        match owner {
            Some(owner) => {
                owner.add_member(Member::Executable(exec));
            }
            None => self.table.register_function(exec),
        }
        tracing::trace!(symbol = %decl.symbol, "baked native");
    }
}
