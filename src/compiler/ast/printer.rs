use super::*;

const INDENT: &str = "    ";

/// Renders an AST back into canonical source text.
///
/// Binary and unary expressions are fully parenthesized, so the output
/// parses back into the same tree regardless of precedence.
#[derive(Debug, Default)]
pub struct Printer {
    buf: String,
    depth: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the printer and returns the rendered text.
    pub fn finish(self) -> String {
        self.buf
    }

    fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    fn condition(&mut self, keyword: &str, test: &Expr, body: &Block) {
        self.push(keyword);
        self.push(" (");
        test.accept(self);
        self.push(") ");
        body.accept(self);
    }
}

impl Visitor for Printer {
    type Output = ();

    fn visit_program(&mut self, program: &Program) {
        for item in &program.items {
            item.accept(self);
            self.push("\n");
        }
    }

    fn visit_function(&mut self, function: &FunctionDef) {
        self.push("fn ");
        self.push(&function.name.name);
        self.push("() ");
        function.body.accept(self);
    }

    fn visit_block(&mut self, block: &Block) {
        self.push("{\n");
        self.depth += 1;
        for stmt in &block.body {
            self.indent();
            stmt.accept(self);
            self.push("\n");
        }
        self.depth -= 1;
        self.indent();
        self.push("}");
    }

    fn visit_assign(&mut self, stmt: &AssignStmt) {
        self.push(if stmt.immutable { "const " } else { "let " });
        self.push(&stmt.name.name);
        self.push(" = ");
        stmt.value.accept(self);
        self.push(";");
    }

    fn visit_update(&mut self, stmt: &UpdateStmt) {
        self.push(&stmt.name.name);
        match stmt.operator {
            Some(operator) => self.push(&format!(" {operator}= ")),
            None => self.push(" = "),
        }
        stmt.value.accept(self);
        self.push(";");
    }

    fn visit_if(&mut self, stmt: &IfStmt) {
        self.condition("if", &stmt.test, &stmt.consequent);
        for else_if in &stmt.else_ifs {
            self.condition(" else if", &else_if.test, &else_if.body);
        }
        if let Some(alternate) = &stmt.alternate {
            self.push(" else ");
            alternate.accept(self);
        }
    }

    fn visit_while(&mut self, stmt: &WhileStmt) {
        self.condition("while", &stmt.test, &stmt.body);
    }

    fn visit_expr_stmt(&mut self, stmt: &ExprStmt) {
        stmt.expr.accept(self);
        self.push(";");
    }

    fn visit_binary(&mut self, expr: &BinaryExpr) {
        self.push("(");
        expr.left.accept(self);
        self.push(&format!(" {} ", expr.operator));
        expr.right.accept(self);
        self.push(")");
    }

    fn visit_unary(&mut self, expr: &UnaryExpr) {
        self.push("(");
        match expr.operator {
            UnOp::Neg => self.push("-"),
            UnOp::Not => self.push("not "),
        }
        expr.argument.accept(self);
        self.push(")");
    }

    fn visit_call(&mut self, expr: &CallExpr) {
        self.push(&expr.callee.name);
        self.push("(");
        for (i, argument) in expr.arguments.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            argument.accept(self);
        }
        self.push(")");
    }

    fn visit_string(&mut self, lit: &StrLit) {
        self.push("\"");
        self.push(&escape_str(&lit.value));
        self.push("\"");
    }

    fn visit_number(&mut self, lit: &NumberLit) {
        self.push(&lit.value.to_string());
    }

    fn visit_bool(&mut self, lit: &BoolLit) {
        self.push(if lit.value { "true" } else { "false" });
    }

    fn visit_variable(&mut self, variable: &Variable) {
        self.push(&variable.name);
    }
}
