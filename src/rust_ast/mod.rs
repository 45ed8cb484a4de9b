//! The emitted Rust abstract syntax tree.
//!
//! The node inventory is exactly what the translation rules produce:
//! function items, blocks with an optional trailing value, let/expression
//! statements, and the expression forms the lowerer emits. Everything
//! derives `PartialEq` so tests can compare translations structurally.

pub mod printer;

/// A top-level item. Only functions are ever emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Fn(RustFn),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// An emitted function: `pub fn name(mut a: i32, ...) -> i32 { ... }`.
/// Parameters are printed `mut` so the body can assign them like C does.
#[derive(Debug, Clone, PartialEq)]
pub struct RustFn {
    pub vis: Visibility,
    pub name: String,
    /// (name, type-name) pairs.
    pub params: Vec<(String, String)>,
    pub ret: String,
    pub body: Block,
}

/// Ordered statements plus an optional trailing expression that yields the
/// block's value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<RustStmt>,
    pub tail: Option<Box<RustExpr>>,
}

impl Block {
    pub fn empty() -> Block {
        Block::default()
    }

    /// A block whose whole content is one trailing value.
    pub fn value(expr: RustExpr) -> Block {
        Block { stmts: Vec::new(), tail: Some(Box::new(expr)) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RustStmt {
    Let {
        mutable: bool,
        name: String,
        ty: Option<String>,
        init: Option<RustExpr>,
    },
    Expr(RustExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RustBinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl RustBinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            RustBinOp::Add => "+",
            RustBinOp::Sub => "-",
            RustBinOp::Mul => "*",
            RustBinOp::Div => "/",
            RustBinOp::Rem => "%",
            RustBinOp::BitAnd => "&",
            RustBinOp::BitOr => "|",
            RustBinOp::BitXor => "^",
            RustBinOp::Shl => "<<",
            RustBinOp::Shr => ">>",
            RustBinOp::Eq => "==",
            RustBinOp::Ne => "!=",
            RustBinOp::Lt => "<",
            RustBinOp::Le => "<=",
            RustBinOp::Gt => ">",
            RustBinOp::Ge => ">=",
            RustBinOp::And => "&&",
            RustBinOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RustUnOp {
    /// `-e`
    Neg,
    /// `!e` — bitwise not on integers, logical not on bool
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RustExpr {
    /// Untyped integer literal.
    IntLit(i64),
    /// A literal emitted verbatim (float lexemes, with or without an `f32`
    /// suffix).
    RawLit(String),
    Var(String),
    /// `expr as ty`
    Cast(Box<RustExpr>, String),
    Binary(RustBinOp, Box<RustExpr>, Box<RustExpr>),
    Unary(RustUnOp, Box<RustExpr>),
    /// `expr != 0`, the integer-truthiness test.
    IsNonZero(Box<RustExpr>),
    /// Value-yielding `if cond { ... } else { ... }`.
    If(Box<RustExpr>, Block, Block),
    While(Box<RustExpr>, Block),
    Loop(Block),
    Break,
    Continue,
    Return(Option<Box<RustExpr>>),
    Call(Box<RustExpr>, Vec<RustExpr>),
    /// A block used in expression position.
    Block(Block),
    /// `lhs = rhs` or `lhs op= rhs` when `op` is present.
    Assign(Option<RustBinOp>, Box<RustExpr>, Box<RustExpr>),
    /// `&mut expr`
    MutBorrow(Box<RustExpr>),
    /// `*expr`
    Deref(Box<RustExpr>),
}

impl RustExpr {
    /// The canonical bool → C int wrapper: `if b { 1 } else { 0 }`.
    pub fn from_bool(cond: RustExpr) -> RustExpr {
        RustExpr::If(
            Box::new(cond),
            Block::value(RustExpr::IntLit(1)),
            Block::value(RustExpr::IntLit(0)),
        )
    }

    /// The inverse of [`from_bool`](Self::from_bool): peel the wrapper when
    /// the expression is literally `if b { 1 } else { 0 }`, otherwise
    /// compare against zero.
    pub fn to_bool(self) -> RustExpr {
        match self {
            RustExpr::If(cond, then_blk, else_blk)
                if is_literal_block(&then_blk, 1) && is_literal_block(&else_blk, 0) =>
            {
                *cond
            }
            other => RustExpr::IsNonZero(Box::new(other)),
        }
    }
}

fn is_literal_block(block: &Block, value: i64) -> bool {
    block.stmts.is_empty()
        && matches!(block.tail.as_deref(), Some(RustExpr::IntLit(v)) if *v == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_round_trip_peels_wrapper() {
        let cond = RustExpr::Binary(
            RustBinOp::Lt,
            Box::new(RustExpr::Var("a".to_string())),
            Box::new(RustExpr::Var("b".to_string())),
        );
        let wrapped = RustExpr::from_bool(cond.clone());
        assert_eq!(wrapped.to_bool(), cond);
    }

    #[test]
    fn test_to_bool_compares_non_wrapper_against_zero() {
        let var = RustExpr::Var("n".to_string());
        assert_eq!(
            var.clone().to_bool(),
            RustExpr::IsNonZero(Box::new(var))
        );
        // An if with a different shape is not peeled
        let other_if = RustExpr::If(
            Box::new(RustExpr::Var("c".to_string())),
            Block::value(RustExpr::IntLit(2)),
            Block::value(RustExpr::IntLit(0)),
        );
        assert!(matches!(other_if.to_bool(), RustExpr::IsNonZero(_)));
    }
}
