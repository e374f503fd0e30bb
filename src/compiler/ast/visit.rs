use super::*;

/// Traverse the syntax tree.
///
/// There is one handler per concrete node kind. Nodes are dispatched to
/// their handler through `accept`; visitors that only need to descend can
/// delegate to the `walk_*` functions.
pub trait Visitor {
    type Output;

    fn visit_program(&mut self, program: &Program) -> Self::Output;
    fn visit_function(&mut self, function: &FunctionDef) -> Self::Output;
    fn visit_block(&mut self, block: &Block) -> Self::Output;

    fn visit_assign(&mut self, stmt: &AssignStmt) -> Self::Output;
    fn visit_update(&mut self, stmt: &UpdateStmt) -> Self::Output;
    fn visit_if(&mut self, stmt: &IfStmt) -> Self::Output;
    fn visit_while(&mut self, stmt: &WhileStmt) -> Self::Output;
    fn visit_expr_stmt(&mut self, stmt: &ExprStmt) -> Self::Output;

    fn visit_binary(&mut self, expr: &BinaryExpr) -> Self::Output;
    fn visit_unary(&mut self, expr: &UnaryExpr) -> Self::Output;
    fn visit_call(&mut self, expr: &CallExpr) -> Self::Output;
    fn visit_string(&mut self, lit: &StrLit) -> Self::Output;
    fn visit_number(&mut self, lit: &NumberLit) -> Self::Output;
    fn visit_bool(&mut self, lit: &BoolLit) -> Self::Output;
    fn visit_variable(&mut self, variable: &Variable) -> Self::Output;
}

impl Program {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_program(self)
    }
}

impl Item {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Item::Function(function) => function.accept(visitor),
            Item::Stmt(stmt) => stmt.accept(visitor),
        }
    }
}

impl FunctionDef {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_function(self)
    }
}

impl Block {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_block(self)
    }
}

impl Stmt {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Assign(stmt) => visitor.visit_assign(stmt),
            Stmt::Update(stmt) => visitor.visit_update(stmt),
            Stmt::If(stmt) => visitor.visit_if(stmt),
            Stmt::While(stmt) => visitor.visit_while(stmt),
            Stmt::Expr(stmt) => visitor.visit_expr_stmt(stmt),
        }
    }
}

impl Expr {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Binary(expr) => visitor.visit_binary(expr),
            Expr::Unary(expr) => visitor.visit_unary(expr),
            Expr::Call(expr) => visitor.visit_call(expr),
            Expr::Str(lit) => visitor.visit_string(lit),
            Expr::Number(lit) => visitor.visit_number(lit),
            Expr::Bool(lit) => visitor.visit_bool(lit),
            Expr::Variable(variable) => visitor.visit_variable(variable),
        }
    }
}

pub fn walk_program<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, program: &Program) {
    for item in &program.items {
        item.accept(visitor);
    }
}

pub fn walk_function<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, function: &FunctionDef) {
    function.body.accept(visitor);
}

pub fn walk_block<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, block: &Block) {
    for stmt in &block.body {
        stmt.accept(visitor);
    }
}

pub fn walk_assign<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, stmt: &AssignStmt) {
    stmt.value.accept(visitor);
}

pub fn walk_update<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, stmt: &UpdateStmt) {
    stmt.value.accept(visitor);
}

pub fn walk_if<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, stmt: &IfStmt) {
    stmt.test.accept(visitor);
    stmt.consequent.accept(visitor);
    for else_if in &stmt.else_ifs {
        else_if.test.accept(visitor);
        else_if.body.accept(visitor);
    }
    if let Some(alternate) = &stmt.alternate {
        alternate.accept(visitor);
    }
}

pub fn walk_while<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, stmt: &WhileStmt) {
    stmt.test.accept(visitor);
    stmt.body.accept(visitor);
}

pub fn walk_expr_stmt<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, stmt: &ExprStmt) {
    stmt.expr.accept(visitor);
}

pub fn walk_binary<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, expr: &BinaryExpr) {
    expr.left.accept(visitor);
    expr.right.accept(visitor);
}

pub fn walk_unary<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, expr: &UnaryExpr) {
    expr.argument.accept(visitor);
}

pub fn walk_call<V: Visitor<Output = ()> + ?Sized>(visitor: &mut V, expr: &CallExpr) {
    for argument in &expr.arguments {
        argument.accept(visitor);
    }
}
