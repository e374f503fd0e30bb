//! A tree-walking evaluator over the AST.
//!
//! The [`Interpreter`] is an ordinary [`Visitor`]: every node is evaluated
//! through `accept`, and all state lives in the interpreter's own [`Env`].

mod env;
mod error;
mod value;

use std::rc::Rc;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::compiler::ast::*;

pub use env::{Binding, Env, Scope, ScopeId};
pub use error::EvalError;
pub use value::Value;

/// Maximum nesting of function calls.
pub const MAX_CALL_DEPTH: usize = 128;

/// Evaluates a [`Program`].
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Env,
    functions: IndexMap<CompactString, Rc<FunctionDef>, FxBuildHasher>,
    call_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the program and returns the value of its last top-level
    /// expression statement, or [`Value::Unit`] if there is none.
    ///
    /// Global bindings carry over between runs on the same interpreter,
    /// functions are replaced by those of the new program.
    pub fn run(&mut self, program: &Program) -> Result<Value, EvalError> {
        program.accept(self)
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Runs `body` in a fresh scope whose parent is `parent`.
    fn exec_scoped(&mut self, parent: ScopeId, body: &[Stmt]) -> Result<(), EvalError> {
        let previous = self.env.enter(parent);
        let result = body.iter().try_for_each(|stmt| stmt.accept(self).map(drop));
        self.env.leave(previous);
        result
    }

    fn condition(&mut self, test: &Expr, keyword: &str) -> Result<bool, EvalError> {
        test.accept(self)?.as_bool(keyword, test.start())
    }
}

impl Visitor for Interpreter {
    type Output = Result<Value, EvalError>;

    fn visit_program(&mut self, program: &Program) -> Self::Output {
        self.functions.clear();
        for function in program.functions() {
            let name = function.name.name.clone();
            if self.functions.contains_key(&name) {
                return Err(EvalError::DuplicateFunction {
                    name,
                    location: function.start,
                });
            }
            self.functions.insert(name, Rc::new(function.clone()));
        }

        let mut last = Value::Unit;
        for item in &program.items {
            if let Item::Stmt(stmt) = item {
                let value = stmt.accept(self)?;
                if let Stmt::Expr(_) = stmt {
                    last = value;
                }
            }
        }
        Ok(last)
    }

    fn visit_function(&mut self, function: &FunctionDef) -> Self::Output {
        let global = self.env.global();
        self.exec_scoped(global, &function.body.body)?;
        Ok(Value::Unit)
    }

    fn visit_block(&mut self, block: &Block) -> Self::Output {
        let current = self.env.current();
        self.exec_scoped(current, &block.body)?;
        Ok(Value::Unit)
    }

    fn visit_assign(&mut self, stmt: &AssignStmt) -> Self::Output {
        let value = stmt.value.accept(self)?;
        self.env
            .declare(stmt.name.name.clone(), value, stmt.immutable);
        Ok(Value::Unit)
    }

    fn visit_update(&mut self, stmt: &UpdateStmt) -> Self::Output {
        let rhs = stmt.value.accept(self)?;
        let name = &stmt.name.name;
        let binding = self
            .env
            .get_mut(name)
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: name.clone(),
                location: stmt.start,
            })?;
        if binding.immutable {
            return Err(EvalError::AssignToConstant {
                name: name.clone(),
                location: stmt.start,
            });
        }
        binding.value = match stmt.operator {
            Some(operator) => binding.value.clone().binary(operator, rhs, stmt.start)?,
            None => rhs,
        };
        Ok(Value::Unit)
    }

    fn visit_if(&mut self, stmt: &IfStmt) -> Self::Output {
        if self.condition(&stmt.test, "if")? {
            return stmt.consequent.accept(self);
        }
        for else_if in &stmt.else_ifs {
            if self.condition(&else_if.test, "if")? {
                return else_if.body.accept(self);
            }
        }
        match &stmt.alternate {
            Some(alternate) => alternate.accept(self),
            None => Ok(Value::Unit),
        }
    }

    fn visit_while(&mut self, stmt: &WhileStmt) -> Self::Output {
        while self.condition(&stmt.test, "while")? {
            stmt.body.accept(self)?;
        }
        Ok(Value::Unit)
    }

    fn visit_expr_stmt(&mut self, stmt: &ExprStmt) -> Self::Output {
        stmt.expr.accept(self)
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output {
        let lhs = expr.left.accept(self)?;
        match expr.operator {
            BinOp::And if !lhs.as_bool("and", expr.start)? => Ok(Value::Bool(false)),
            BinOp::Or if lhs.as_bool("or", expr.start)? => Ok(Value::Bool(true)),
            operator => {
                let rhs = expr.right.accept(self)?;
                lhs.binary(operator, rhs, expr.start)
            }
        }
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output {
        expr.argument.accept(self)?.unary(expr.operator, expr.start)
    }

    fn visit_call(&mut self, expr: &CallExpr) -> Self::Output {
        let name = &expr.callee.name;
        let function = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedFunction {
                name: name.clone(),
                location: expr.start,
            })?;
        if !expr.arguments.is_empty() {
            return Err(EvalError::ArityMismatch {
                name: name.clone(),
                expected: 0,
                found: expr.arguments.len(),
                location: expr.start,
            });
        }
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(EvalError::StackOverflow {
                location: expr.start,
            });
        }

        log::debug!("call {name} at {}", expr.start);
        self.call_depth += 1;
        let result = function.accept(self);
        self.call_depth -= 1;
        result
    }

    fn visit_string(&mut self, lit: &StrLit) -> Self::Output {
        Ok(Value::Str(lit.value.clone()))
    }

    fn visit_number(&mut self, lit: &NumberLit) -> Self::Output {
        Ok(match lit.value {
            Number::Int(v) => Value::Int(v),
            Number::Float(v) => Value::Float(v),
        })
    }

    fn visit_bool(&mut self, lit: &BoolLit) -> Self::Output {
        Ok(Value::Bool(lit.value))
    }

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output {
        self.env
            .get(&variable.name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: variable.name.clone(),
                location: variable.start,
            })
    }
}
