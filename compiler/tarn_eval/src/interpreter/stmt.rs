//! Statement execution.

use tarn_ir::canon::{Block, Expr, Place, Stmt, StmtKind};
use tarn_ir::AssignOp;

use super::Interpreter;
use crate::errors::{not_iterable, type_mismatch, unknown_variable};
use crate::{FaultPolicy, RuntimeFault, Value};

/// How a statement or block finished.
#[derive(Debug)]
pub(crate) enum Completion {
    Normal,
    /// `return`, unwinding to the nearest call boundary.
    Return(Value),
    /// A fault no block has caught. Only escapes blocks under
    /// [`FaultPolicy::Propagate`].
    Fault(RuntimeFault),
}

/// A resolved assignment destination; its subexpressions are evaluated
/// once.
enum Target {
    Var(String),
    Field(Value, String),
    Index(Value, Value),
}

impl Interpreter<'_> {
    /// Run `block` in a new scope of the current frame.
    pub(crate) fn exec_block(&mut self, block: &Block) -> Completion {
        self.env.push_scope();
        let completion = self.exec_body(block);
        self.env.pop_scope();
        completion
    }

    /// Run the statements of `block` in the current scope, catching faults
    /// at this block's boundary.
    pub(crate) fn exec_body(&mut self, block: &Block) -> Completion {
        for stmt in &block.stmts {
            match self.exec_stmt(stmt) {
                Completion::Normal => {}
                Completion::Fault(fault) => return self.catch(fault),
                completion @ Completion::Return(_) => return completion,
            }
        }
        Completion::Normal
    }

    fn catch(&mut self, fault: RuntimeFault) -> Completion {
        match self.config.fault_policy {
            FaultPolicy::Continue => {
                self.record(fault);
                Completion::Normal
            }
            FaultPolicy::Propagate => Completion::Fault(fault),
        }
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Completion {
        match self.try_exec_stmt(stmt) {
            Ok(completion) => completion,
            Err(fault) => Completion::Fault(fault.at(stmt.span)),
        }
    }

    fn try_exec_stmt(&mut self, stmt: &Stmt) -> Result<Completion, RuntimeFault> {
        match &stmt.kind {
            StmtKind::Var { name, init } => {
                let value = match init {
                    Some(init) => self.eval_expr(init)?,
                    None => Value::null(self.builtins()),
                };
                self.env.define(name, value);
            }
            StmtKind::Assign { place, op, value } => self.exec_assign(place, *op, value)?,
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
            }
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                if self.condition(cond)? {
                    return Ok(self.exec_block(then_block));
                }
                if let Some(else_block) = else_block {
                    return Ok(self.exec_block(else_block));
                }
            }
            StmtKind::While { cond, body } => {
                while self.condition(cond)? {
                    match self.exec_block(body) {
                        Completion::Normal => {}
                        completion => return Ok(completion),
                    }
                }
            }
            StmtKind::For {
                var,
                iterable,
                body,
            } => {
                let iterable = self.eval_expr(iterable)?;
                for item in self.iteration_items(&iterable)? {
                    self.env.push_scope();
                    self.env.define(var, item);
                    let completion = self.exec_block(body);
                    self.env.pop_scope();
                    if !matches!(completion, Completion::Normal) {
                        return Ok(completion);
                    }
                }
            }
            StmtKind::Repeat { count, body } => {
                let value = self.eval_expr(count)?;
                let count = value
                    .as_int()
                    .ok_or_else(|| type_mismatch(&self.builtins().int, &value))?;
                for _ in 0..count.max(0) {
                    match self.exec_block(body) {
                        Completion::Normal => {}
                        completion => return Ok(completion),
                    }
                }
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(value) => self.eval_expr(value)?,
                    None => Value::void(self.builtins()),
                };
                return Ok(Completion::Return(value));
            }
            StmtKind::Block(block) => return Ok(self.exec_block(block)),
        }
        Ok(Completion::Normal)
    }

    fn condition(&mut self, cond: &Expr) -> Result<bool, RuntimeFault> {
        let value = self.eval_expr(cond)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch(&self.builtins().boolean, &value).at(cond.span))
    }

    /// Elements a `for` loop visits: an array's current elements, or those
    /// of the array its type's iterator method returns.
    fn iteration_items(&mut self, iterable: &Value) -> Result<Vec<Value>, RuntimeFault> {
        if let Some(items) = iterable.as_array().map(|items| items.clone()) {
            return Ok(items);
        }
        let Some(iterator) = self.table.iterator(iterable.ty()) else {
            return Err(not_iterable(iterable.ty()));
        };
        let produced = self.invoke(&iterator, Some(iterable.clone()), Vec::new())?;
        let items = produced.as_array().map(|items| items.clone());
        items.ok_or_else(|| not_iterable(produced.ty()))
    }

    fn exec_assign(&mut self, place: &Place, op: AssignOp, value: &Expr) -> Result<(), RuntimeFault> {
        let target = match place {
            Place::Var(name) => Target::Var(name.clone()),
            Place::Field { object, name } => Target::Field(self.eval_expr(object)?, name.clone()),
            Place::Index { object, index } => {
                Target::Index(self.eval_expr(object)?, self.eval_expr(index)?)
            }
        };
        let mut value = self.eval_expr(value)?;
        if let Some(op) = op.binary() {
            let current = self.read_target(&target)?;
            value = self.binary(op, current, value)?;
        }
        self.write_target(target, value)
    }

    fn read_target(&mut self, target: &Target) -> Result<Value, RuntimeFault> {
        match target {
            Target::Var(name) => self.lookup_name(name),
            Target::Field(object, name) => self.read_field(object, name),
            Target::Index(object, index) => self.read_index(object, index.clone()),
        }
    }

    fn write_target(&mut self, target: Target, value: Value) -> Result<(), RuntimeFault> {
        match target {
            Target::Var(name) => self.assign_name(&name, value),
            Target::Field(object, name) => self.write_field(&object, &name, value),
            Target::Index(object, index) => self.write_index(&object, index, value),
        }
    }

    /// Assign to a bare name: a local, a module global, then a field of the
    /// current type.
    fn assign_name(&mut self, name: &str, value: Value) -> Result<(), RuntimeFault> {
        if self.env.assign(name, value.clone()) {
            return Ok(());
        }
        if let Some(slot) = self.globals.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        let field = self.env.current_type().and_then(|ty| ty.field_named(name));
        if let Some(field) = field {
            if field.is_static() {
                if let Some(owner) = field.owner() {
                    self.set_static(&owner, name, value);
                    return Ok(());
                }
            } else if let Some(instance) = self.env.instance().and_then(Value::as_instance) {
                instance.set(name, value);
                return Ok(());
            }
        }
        Err(unknown_variable(name))
    }
}
