//! Making an already generated module visible to the units being checked.

use std::rc::Rc;

use tarn_canon::Module;
use tarn_diagnostic::ErrorCode;
use tarn_ir::Span;

use crate::Processor;

impl Processor<'_> {
    /// Bring the classes, free functions and globals of `module` into scope.
    ///
    /// Types already registered in the table (because the module was
    /// generated against it) are left as they are.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %module.name))]
    pub fn import(&mut self, module: &Module) {
        for class in module.classes() {
            let Some(name) = class.as_nominal().map(|n| n.name().to_string()) else {
                continue;
            };
            match self.table.type_named(&name) {
                Some(existing) if existing == *class => {}
                Some(_) => self.error(
                    ErrorCode::E2004,
                    Span::DUMMY,
                    format!(
                        "type `{name}` from module `{}` conflicts with an existing type",
                        module.name
                    ),
                ),
                None => {
                    self.table.register_type(class.clone());
                }
            }
        }

        for function in module.functions() {
            if !self.table.contains_function(function) {
                self.table.register_function(Rc::clone(function));
            }
        }

        if let Some(globals) = self.frames.first_mut() {
            for global in module.globals() {
                globals.insert(global.name.clone(), global.ty.clone());
            }
        }
    }
}
