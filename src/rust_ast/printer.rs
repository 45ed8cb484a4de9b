//! Pretty-printer for the emitted Rust AST.
//!
//! The printer is deliberately conservative: any non-atomic operand is
//! parenthesized, so the printed text never depends on subtle precedence
//! interactions (`(a as i32) + 1`, `(-x) as f64`, `({ ... }) + 1`). Blocks
//! that carry only a trailing value print inline (`{ 1 }`); blocks with
//! statements print multi-line with 4-space indentation.

use super::{Block, Item, RustExpr, RustStmt, RustUnOp, Visibility};

/// Print a whole translation unit's items, separated by blank lines.
pub fn print_unit(items: &[Item]) -> String {
    let mut printer = Printer::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            printer.out.push('\n');
        }
        printer.item(item);
    }
    printer.out
}

/// Print a single expression (used by tests).
pub fn print_expr(expr: &RustExpr) -> String {
    let mut printer = Printer::new();
    printer.expr(expr);
    printer.out
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn new() -> Self {
        Self { out: String::new(), indent: 0 }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    fn item(&mut self, item: &Item) {
        let Item::Fn(f) = item;
        if f.vis == Visibility::Public {
            self.out.push_str("pub ");
        }
        self.out.push_str("fn ");
        self.out.push_str(&f.name);
        self.out.push('(');
        for (i, (name, ty)) in f.params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str("mut ");
            self.out.push_str(name);
            self.out.push_str(": ");
            self.out.push_str(ty);
        }
        self.out.push_str(") -> ");
        self.out.push_str(&f.ret);
        self.out.push(' ');
        self.multiline_block(&f.body);
        self.out.push('\n');
    }

    /// Print a block in multi-line form, closing brace at the current
    /// indent. An empty block prints `{}`.
    fn multiline_block(&mut self, block: &Block) {
        if block.stmts.is_empty() && block.tail.is_none() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.indent += 1;
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
        if let Some(tail) = &block.tail {
            self.push_indent();
            self.expr(tail);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.push_indent();
        self.out.push('}');
    }

    /// Print a block, inline (`{ tail }`) when it is a pure value block.
    fn block(&mut self, block: &Block) {
        if block.stmts.is_empty() {
            if let Some(tail) = &block.tail {
                self.out.push_str("{ ");
                self.expr(tail);
                self.out.push_str(" }");
                return;
            }
        }
        self.multiline_block(block);
    }

    fn stmt(&mut self, stmt: &RustStmt) {
        self.push_indent();
        match stmt {
            RustStmt::Let { mutable, name, ty, init } => {
                self.out.push_str("let ");
                if *mutable {
                    self.out.push_str("mut ");
                }
                self.out.push_str(name);
                if let Some(ty) = ty {
                    self.out.push_str(": ");
                    self.out.push_str(ty);
                }
                if let Some(init) = init {
                    self.out.push_str(" = ");
                    self.expr(init);
                }
                self.out.push_str(";\n");
            }
            RustStmt::Expr(expr) => {
                match expr {
                    // Control-flow expressions that yield no value print in
                    // statement form, no semicolon.
                    RustExpr::While(_, _) | RustExpr::Loop(_) => {
                        self.expr(expr);
                        self.out.push('\n');
                    }
                    RustExpr::If(_, then_blk, else_blk)
                        if then_blk.tail.is_none() && else_blk.tail.is_none() =>
                    {
                        self.expr(expr);
                        self.out.push('\n');
                    }
                    RustExpr::Block(block) if block.tail.is_none() => {
                        self.multiline_block(block);
                        self.out.push('\n');
                    }
                    // Value-yielding ifs and blocks in statement position
                    // must be parenthesized to stay expression statements.
                    RustExpr::If(_, _, _) | RustExpr::Block(_) => {
                        self.out.push('(');
                        self.expr(expr);
                        self.out.push_str(");\n");
                    }
                    _ => {
                        self.expr(expr);
                        self.out.push_str(";\n");
                    }
                }
            }
        }
    }

    fn expr(&mut self, expr: &RustExpr) {
        match expr {
            RustExpr::IntLit(v) => {
                self.out.push_str(&v.to_string());
            }
            RustExpr::RawLit(text) => {
                self.out.push_str(text);
            }
            RustExpr::Var(name) => {
                self.out.push_str(name);
            }
            RustExpr::Cast(operand, ty) => {
                self.tight_operand(operand);
                self.out.push_str(" as ");
                self.out.push_str(ty);
            }
            RustExpr::Binary(op, lhs, rhs) => {
                self.operand(lhs);
                self.out.push(' ');
                self.out.push_str(op.symbol());
                self.out.push(' ');
                self.operand(rhs);
            }
            RustExpr::Unary(op, operand) => {
                self.out.push(match op {
                    RustUnOp::Neg => '-',
                    RustUnOp::Not => '!',
                });
                self.tight_operand(operand);
            }
            RustExpr::IsNonZero(operand) => {
                self.operand(operand);
                self.out.push_str(" != 0");
            }
            RustExpr::If(cond, then_blk, else_blk) => {
                self.out.push_str("if ");
                self.expr(cond);
                self.out.push(' ');
                self.block(then_blk);
                self.out.push_str(" else ");
                self.block(else_blk);
            }
            RustExpr::While(cond, body) => {
                self.out.push_str("while ");
                self.expr(cond);
                self.out.push(' ');
                self.multiline_block(body);
            }
            RustExpr::Loop(body) => {
                self.out.push_str("loop ");
                self.multiline_block(body);
            }
            RustExpr::Break => {
                self.out.push_str("break");
            }
            RustExpr::Continue => {
                self.out.push_str("continue");
            }
            RustExpr::Return(value) => {
                self.out.push_str("return");
                if let Some(value) = value {
                    self.out.push(' ');
                    self.expr(value);
                }
            }
            RustExpr::Call(callee, args) => {
                match callee.as_ref() {
                    RustExpr::Var(name) => self.out.push_str(name),
                    other => {
                        self.out.push('(');
                        self.expr(other);
                        self.out.push(')');
                    }
                }
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(arg);
                }
                self.out.push(')');
            }
            RustExpr::Block(block) => {
                self.block(block);
            }
            RustExpr::Assign(op, lhs, rhs) => {
                self.operand(lhs);
                self.out.push(' ');
                if let Some(op) = op {
                    self.out.push_str(op.symbol());
                }
                self.out.push_str("= ");
                self.expr(rhs);
            }
            RustExpr::MutBorrow(operand) => {
                self.out.push_str("&mut ");
                self.tight_operand(operand);
            }
            RustExpr::Deref(operand) => {
                self.out.push('*');
                self.tight_operand(operand);
            }
        }
    }

    /// Operand of a binary operator (or comparison-to-zero, or assignment
    /// target): atoms and prefix forms print bare, everything else is
    /// parenthesized.
    fn operand(&mut self, expr: &RustExpr) {
        if is_atom(expr) || is_prefix(expr) {
            self.expr(expr);
        } else {
            self.out.push('(');
            self.expr(expr);
            self.out.push(')');
        }
    }

    /// Operand of a prefix operator or cast: only atoms print bare (`-x as
    /// i32` would re-associate, and `--x` would re-lex).
    fn tight_operand(&mut self, expr: &RustExpr) {
        if is_atom(expr) {
            self.expr(expr);
        } else {
            self.out.push('(');
            self.expr(expr);
            self.out.push(')');
        }
    }
}

fn is_atom(expr: &RustExpr) -> bool {
    matches!(
        expr,
        RustExpr::IntLit(_) | RustExpr::RawLit(_) | RustExpr::Var(_) | RustExpr::Call(_, _)
    )
}

fn is_prefix(expr: &RustExpr) -> bool {
    matches!(
        expr,
        RustExpr::Unary(_, _) | RustExpr::Deref(_) | RustExpr::MutBorrow(_)
    )
}

#[cfg(test)]
mod tests {
    use super::super::{Block, Item, RustBinOp, RustExpr, RustFn, RustStmt, RustUnOp, Visibility};
    use super::*;

    fn var(name: &str) -> RustExpr {
        RustExpr::Var(name.to_string())
    }

    #[test]
    fn test_cast_operand_parenthesized_in_binary() {
        let expr = RustExpr::Binary(
            RustBinOp::Add,
            Box::new(RustExpr::Cast(Box::new(var("a")), "i32".to_string())),
            Box::new(RustExpr::IntLit(1)),
        );
        assert_eq!(print_expr(&expr), "(a as i32) + 1");
    }

    #[test]
    fn test_prefix_forms_bare_in_binary_but_not_in_cast() {
        let neg = RustExpr::Unary(RustUnOp::Neg, Box::new(var("x")));
        let sum = RustExpr::Binary(RustBinOp::Add, Box::new(neg.clone()), Box::new(RustExpr::IntLit(1)));
        assert_eq!(print_expr(&sum), "-x + 1");
        let cast = RustExpr::Cast(Box::new(neg), "f64".to_string());
        assert_eq!(print_expr(&cast), "(-x) as f64");
    }

    #[test]
    fn test_nested_prefix_parenthesized() {
        let expr = RustExpr::Unary(
            RustUnOp::Neg,
            Box::new(RustExpr::Unary(RustUnOp::Neg, Box::new(var("x")))),
        );
        assert_eq!(print_expr(&expr), "-(-x)");
    }

    #[test]
    fn test_bool_wrapper_prints_inline() {
        let expr = RustExpr::from_bool(RustExpr::Binary(
            RustBinOp::Lt,
            Box::new(var("a")),
            Box::new(var("b")),
        ));
        assert_eq!(print_expr(&expr), "if a < b { 1 } else { 0 }");
    }

    #[test]
    fn test_assignment_value_block() {
        let block = RustExpr::Block(Block {
            stmts: vec![
                RustStmt::Let {
                    mutable: false,
                    name: "_tmp".to_string(),
                    ty: None,
                    init: Some(RustExpr::MutBorrow(Box::new(var("x")))),
                },
                RustStmt::Expr(RustExpr::Assign(
                    None,
                    Box::new(RustExpr::Deref(Box::new(var("_tmp")))),
                    Box::new(RustExpr::IntLit(5)),
                )),
            ],
            tail: Some(Box::new(RustExpr::Deref(Box::new(var("_tmp"))))),
        });
        let expr = RustExpr::Binary(RustBinOp::Add, Box::new(block), Box::new(RustExpr::IntLit(1)));
        assert_eq!(
            print_expr(&expr),
            "({\n    let _tmp = &mut x;\n    *_tmp = 5;\n    *_tmp\n}) + 1"
        );
    }

    #[test]
    fn test_function_item() {
        let f = Item::Fn(RustFn {
            vis: Visibility::Private,
            name: "g".to_string(),
            params: vec![("n".to_string(), "i32".to_string())],
            ret: "i32".to_string(),
            body: Block {
                stmts: vec![RustStmt::Expr(RustExpr::Return(Some(Box::new(var("n")))))],
                tail: None,
            },
        });
        assert_eq!(
            print_unit(&[f]),
            "fn g(mut n: i32) -> i32 {\n    return n;\n}\n"
        );
    }

    #[test]
    fn test_value_if_in_statement_position_is_parenthesized() {
        let block = Block {
            stmts: vec![RustStmt::Expr(RustExpr::from_bool(var("c").to_bool()))],
            tail: None,
        };
        let f = Item::Fn(RustFn {
            vis: Visibility::Public,
            name: "f".to_string(),
            params: vec![],
            ret: "()".to_string(),
            body: block,
        });
        assert_eq!(
            print_unit(&[f]),
            "pub fn f() -> () {\n    (if c != 0 { 1 } else { 0 });\n}\n"
        );
    }

    #[test]
    fn test_empty_while_body() {
        let expr = RustExpr::While(
            Box::new(RustExpr::Binary(
                RustBinOp::Lt,
                Box::new(RustExpr::Cast(Box::new(var("i")), "i32".to_string())),
                Box::new(RustExpr::IntLit(10)),
            )),
            Block::empty(),
        );
        assert_eq!(print_expr(&expr), "while (i as i32) < 10 {}");
    }
}
