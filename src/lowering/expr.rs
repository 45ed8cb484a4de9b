//! Expression lowering.
//!
//! `lower_expr` takes a `want_value` flag saying whether the expression's
//! value is consumed or only its side effects matter; the flag changes the
//! shape of comma and assignment lowerings and nothing else.
//!
//! Booleans get the C treatment: comparisons and logical operators produce
//! an `int`-typed `if cond { 1 } else { 0 }` wrapper, and contexts that
//! need a Rust bool peel that wrapper back off (or compare against zero)
//! via [`RustExpr::to_bool`].

use crate::common::error::TranslationError;
use crate::common::source::Span;
use crate::common::type_builder;
use crate::common::types::{CType, FloatWidth};
use crate::frontend::parser::ast::{BinOp, Expr, PostfixOp, TypeName, UnaryOp};
use crate::rust_ast::{Block, RustBinOp, RustExpr, RustStmt, RustUnOp};

use super::{Lowerer, TypedExpr};

impl Lowerer {
    pub(crate) fn lower_expr(
        &mut self,
        want_value: bool,
        expr: &Expr,
    ) -> Result<TypedExpr, TranslationError> {
        match expr {
            Expr::IntLiteral(value, _) => Ok(TypedExpr {
                ty: CType::int(),
                expr: RustExpr::IntLit(*value),
            }),

            Expr::FloatLiteral(lexeme, span) => lower_float_literal(lexeme, *span),

            Expr::CharLiteral(_, span) => Err(TranslationError::UnsupportedExpression {
                what: "character literal".to_string(),
                span: *span,
            }),
            Expr::StringLiteral(_, span) => Err(TranslationError::UnsupportedExpression {
                what: "string literal".to_string(),
                span: *span,
            }),

            Expr::Identifier(name, span) => match self.env.lookup(name) {
                Some(ty) => Ok(TypedExpr {
                    ty: ty.clone(),
                    expr: RustExpr::Var(name.clone()),
                }),
                None => Err(TranslationError::UndefinedVariable {
                    name: name.clone(),
                    span: *span,
                }),
            },

            Expr::Cast(type_name, operand, span) => {
                let operand = self.lower_expr(true, operand)?;
                let ty = self.resolve_type_name(type_name)?;
                let name = self.rust_type_name(&ty, *span)?;
                Ok(TypedExpr {
                    ty,
                    expr: RustExpr::Cast(Box::new(operand.expr), name),
                })
            }

            Expr::UnaryOp(op, operand, span) => self.lower_unary(want_value, *op, operand, *span),

            Expr::PostfixOp(op, _, span) => Err(TranslationError::UnsupportedUnaryOperator {
                operator: match op {
                    PostfixOp::PostInc => "postfix ++".to_string(),
                    PostfixOp::PostDec => "postfix --".to_string(),
                },
                span: *span,
            }),
            Expr::AddressOf(_, span) => Err(TranslationError::UnsupportedUnaryOperator {
                operator: "&".to_string(),
                span: *span,
            }),
            Expr::Deref(_, span) => Err(TranslationError::UnsupportedUnaryOperator {
                operator: "*".to_string(),
                span: *span,
            }),
            Expr::Sizeof(_, span) | Expr::SizeofType(_, span) => {
                Err(TranslationError::UnsupportedUnaryOperator {
                    operator: "sizeof".to_string(),
                    span: *span,
                })
            }
            Expr::ArraySubscript(_, _, span) => Err(TranslationError::UnsupportedExpression {
                what: "array subscript".to_string(),
                span: *span,
            }),

            Expr::BinaryOp(op, lhs, rhs, span) => self.lower_binary(*op, lhs, rhs, *span),

            Expr::Conditional(cond, then_expr, else_expr, span) => {
                self.lower_conditional(want_value, cond, then_expr, else_expr, *span)
            }

            Expr::FunctionCall(callee, args, span) => {
                let callee = self.lower_expr(true, callee)?;
                let ret = match callee.ty {
                    CType::Function(ret) => *ret,
                    _ => return Err(TranslationError::CalleeNotFunction { span: *span }),
                };
                let mut lowered_args = Vec::new();
                for arg in args {
                    lowered_args.push(self.lower_expr(true, arg)?.expr);
                }
                Ok(TypedExpr {
                    ty: ret,
                    expr: RustExpr::Call(Box::new(callee.expr), lowered_args),
                })
            }

            Expr::Comma(items, _) => self.lower_comma(want_value, items),

            Expr::Assign(lhs, rhs, _) => self.lower_assign(want_value, None, lhs, rhs),
            Expr::CompoundAssign(op, lhs, rhs, _) => {
                self.lower_assign(want_value, Some(rust_binop(*op)), lhs, rhs)
            }
        }
    }

    fn lower_unary(
        &mut self,
        want_value: bool,
        op: UnaryOp,
        operand: &Expr,
        span: Span,
    ) -> Result<TypedExpr, TranslationError> {
        match op {
            UnaryOp::Plus => self.lower_expr(want_value, operand),
            UnaryOp::Neg => {
                let operand = self.lower_expr(true, operand)?;
                Ok(TypedExpr {
                    ty: operand.ty,
                    expr: RustExpr::Unary(RustUnOp::Neg, Box::new(operand.expr)),
                })
            }
            UnaryOp::BitNot => {
                let operand = self.lower_expr(true, operand)?;
                Ok(TypedExpr {
                    ty: operand.ty,
                    expr: RustExpr::Unary(RustUnOp::Not, Box::new(operand.expr)),
                })
            }
            UnaryOp::LogicalNot => {
                let cond = self.lower_expr(true, operand)?.expr.to_bool();
                Ok(TypedExpr {
                    ty: CType::int(),
                    expr: RustExpr::from_bool(RustExpr::Unary(RustUnOp::Not, Box::new(cond))),
                })
            }
            // ++e / --e are e += 1 / e -= 1 with the same demand
            UnaryOp::PreInc | UnaryOp::PreDec => {
                let binop = if op == UnaryOp::PreInc { BinOp::Add } else { BinOp::Sub };
                let one = Expr::IntLiteral(1, span);
                let rewritten = Expr::CompoundAssign(
                    binop,
                    Box::new(operand.clone()),
                    Box::new(one),
                    span,
                );
                self.lower_expr(want_value, &rewritten)
            }
        }
    }

    fn lower_binary(
        &mut self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
        span: Span,
    ) -> Result<TypedExpr, TranslationError> {
        match op {
            BinOp::LogicalAnd | BinOp::LogicalOr => {
                let lhs = self.lower_expr(true, lhs)?;
                let rhs = self.lower_expr(true, rhs)?;
                let lhs = TypedExpr { ty: CType::int(), expr: lhs.expr.to_bool() };
                let rhs = TypedExpr { ty: CType::int(), expr: rhs.expr.to_bool() };
                let combined = self.promote(rust_binop(op), lhs, rhs, span)?;
                Ok(TypedExpr {
                    ty: CType::int(),
                    expr: RustExpr::from_bool(combined.expr),
                })
            }
            _ if op.is_comparison() => {
                let lhs = self.lower_expr(true, lhs)?;
                let rhs = self.lower_expr(true, rhs)?;
                let compared = self.promote(rust_binop(op), lhs, rhs, span)?;
                Ok(TypedExpr {
                    ty: CType::int(),
                    expr: RustExpr::from_bool(compared.expr),
                })
            }
            _ => {
                let lhs = self.lower_expr(true, lhs)?;
                let rhs = self.lower_expr(true, rhs)?;
                self.promote(rust_binop(op), lhs, rhs, span)
            }
        }
    }

    fn lower_conditional(
        &mut self,
        want_value: bool,
        cond: &Expr,
        then_expr: &Expr,
        else_expr: &Expr,
        span: Span,
    ) -> Result<TypedExpr, TranslationError> {
        let cond = self.lower_expr(true, cond)?.expr.to_bool();
        let then_arm = self.lower_expr(want_value, then_expr)?;
        let else_arm = self.lower_expr(want_value, else_expr)?;

        // A void arm (only reachable with the value undemanded) suppresses
        // arm conversion; the conditional itself is void.
        if then_arm.ty == CType::Void || else_arm.ty == CType::Void {
            return Ok(TypedExpr {
                ty: CType::Void,
                expr: RustExpr::If(
                    Box::new(cond),
                    Self::to_block(then_arm.expr),
                    Self::to_block(else_arm.expr),
                ),
            });
        }

        if !then_arm.ty.is_arithmetic() || !else_arm.ty.is_arithmetic() {
            return Err(TranslationError::UnsupportedExpression {
                what: "non-arithmetic conditional arm".to_string(),
                span,
            });
        }

        let common = CType::usual_arithmetic(&then_arm.ty, &else_arm.ty);
        let then_value = self.convert_to(then_arm, &common, span)?;
        let else_value = self.convert_to(else_arm, &common, span)?;
        Ok(TypedExpr {
            ty: common,
            expr: RustExpr::If(
                Box::new(cond),
                value_block(then_value),
                value_block(else_value),
            ),
        })
    }

    fn lower_comma(
        &mut self,
        want_value: bool,
        items: &[Expr],
    ) -> Result<TypedExpr, TranslationError> {
        let (effects, value) = if want_value {
            match items.split_last() {
                Some((last, rest)) => (rest, Some(last)),
                None => (items, None),
            }
        } else {
            (items, None)
        };

        let mut stmts = Vec::new();
        for effect in effects {
            stmts.push(RustStmt::Expr(self.lower_expr(false, effect)?.expr));
        }

        match value {
            Some(last) => {
                let last = self.lower_expr(true, last)?;
                Ok(TypedExpr {
                    ty: last.ty,
                    expr: RustExpr::Block(Block {
                        stmts,
                        tail: Some(Box::new(last.expr)),
                    }),
                })
            }
            None => Ok(TypedExpr {
                ty: CType::Void,
                expr: RustExpr::Block(Block { stmts, tail: None }),
            }),
        }
    }

    /// Lower simple or compound assignment.
    ///
    /// When the value is demanded, the stored value must be the result and
    /// the lvalue must be evaluated exactly once, so the lowering takes a
    /// mutable borrow of the target, assigns through it, and yields the
    /// dereferenced target.
    fn lower_assign(
        &mut self,
        want_value: bool,
        op: Option<RustBinOp>,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<TypedExpr, TranslationError> {
        let lhs = self.lower_expr(true, lhs)?;
        let rhs = self.lower_expr(true, rhs)?;

        if !want_value {
            return Ok(TypedExpr {
                ty: CType::Void,
                expr: RustExpr::Assign(op, Box::new(lhs.expr), Box::new(rhs.expr)),
            });
        }

        let tmp = || RustExpr::Var("_tmp".to_string());
        let block = Block {
            stmts: vec![
                RustStmt::Let {
                    mutable: false,
                    name: "_tmp".to_string(),
                    ty: None,
                    init: Some(RustExpr::MutBorrow(Box::new(lhs.expr))),
                },
                RustStmt::Expr(RustExpr::Assign(
                    op,
                    Box::new(RustExpr::Deref(Box::new(tmp()))),
                    Box::new(rhs.expr),
                )),
            ],
            tail: Some(Box::new(RustExpr::Deref(Box::new(tmp())))),
        };
        Ok(TypedExpr {
            ty: lhs.ty,
            expr: RustExpr::Block(block),
        })
    }

    /// The promotion helper: compute the common type via the usual
    /// arithmetic conversions, cast either operand whose type differs from
    /// it, and combine with `op`.
    fn promote(
        &self,
        op: RustBinOp,
        lhs: TypedExpr,
        rhs: TypedExpr,
        span: Span,
    ) -> Result<TypedExpr, TranslationError> {
        if !lhs.ty.is_arithmetic() || !rhs.ty.is_arithmetic() {
            return Err(TranslationError::UnsupportedExpression {
                what: "non-arithmetic operand".to_string(),
                span,
            });
        }
        let common = CType::usual_arithmetic(&lhs.ty, &rhs.ty);
        let lhs = self.convert_to(lhs, &common, span)?;
        let rhs = self.convert_to(rhs, &common, span)?;
        Ok(TypedExpr {
            ty: common,
            expr: RustExpr::Binary(op, Box::new(lhs), Box::new(rhs)),
        })
    }

    /// Cast `operand` to `target` unless it already has that type.
    fn convert_to(
        &self,
        operand: TypedExpr,
        target: &CType,
        span: Span,
    ) -> Result<RustExpr, TranslationError> {
        if operand.ty == *target {
            Ok(operand.expr)
        } else {
            let name = self.rust_type_name(target, span)?;
            Ok(RustExpr::Cast(Box::new(operand.expr), name))
        }
    }

    /// Resolve a cast's type name to a C type.
    fn resolve_type_name(&self, type_name: &TypeName) -> Result<CType, TranslationError> {
        if let Some(derived) = type_name.derived.first() {
            return Err(TranslationError::UnsupportedDeclarator {
                what: format!("{} declarator in type name", super::derived_kind(derived)),
                span: type_name.span,
            });
        }
        let parts = type_builder::partition(&type_name.specifiers);
        if let Some(storage) = parts.storage.first() {
            return Err(TranslationError::UnsupportedTypeSpecifier {
                specifier: storage.keyword().to_string(),
                span: type_name.span,
            });
        }
        parts.require_plain(type_name.span)?;
        type_builder::fold_type_specs(&parts.types, type_name.span)
    }
}

/// Wrap an arm expression as a value-yielding block; a block expression is
/// reused directly (its own tail is the value).
fn value_block(expr: RustExpr) -> Block {
    match expr {
        RustExpr::Block(block) => block,
        other => Block::value(other),
    }
}

/// Map a C binary operator to its Rust counterpart.
fn rust_binop(op: BinOp) -> RustBinOp {
    match op {
        BinOp::Add => RustBinOp::Add,
        BinOp::Sub => RustBinOp::Sub,
        BinOp::Mul => RustBinOp::Mul,
        BinOp::Div => RustBinOp::Div,
        BinOp::Mod => RustBinOp::Rem,
        BinOp::BitAnd => RustBinOp::BitAnd,
        BinOp::BitOr => RustBinOp::BitOr,
        BinOp::BitXor => RustBinOp::BitXor,
        BinOp::Shl => RustBinOp::Shl,
        BinOp::Shr => RustBinOp::Shr,
        BinOp::Eq => RustBinOp::Eq,
        BinOp::Ne => RustBinOp::Ne,
        BinOp::Lt => RustBinOp::Lt,
        BinOp::Le => RustBinOp::Le,
        BinOp::Gt => RustBinOp::Gt,
        BinOp::Ge => RustBinOp::Ge,
        BinOp::LogicalAnd => RustBinOp::And,
        BinOp::LogicalOr => RustBinOp::Or,
    }
}

/// Validate a floating literal lexeme and build its emitted form.
///
/// Accepted shape: `digits [ '.' digits ] [ (e|E) [+|-] digits ] [ f|F ]`,
/// with at least one digit before the exponent. The `f`/`F` suffix selects
/// `float` and is re-spelled `f32`; anything else (`L`, hex floats, stray
/// characters) is malformed.
fn lower_float_literal(lexeme: &str, span: Span) -> Result<TypedExpr, TranslationError> {
    let malformed = || TranslationError::MalformedFloat {
        lexeme: lexeme.to_string(),
        span,
    };

    let (body, is_f32) = match lexeme.as_bytes().last() {
        Some(b'f' | b'F') => (&lexeme[..lexeme.len() - 1], true),
        _ => (lexeme, false),
    };
    if !is_valid_float_body(body) {
        return Err(malformed());
    }

    if is_f32 {
        Ok(TypedExpr {
            ty: CType::Float(FloatWidth::W32),
            expr: RustExpr::RawLit(format!("{}f32", body)),
        })
    } else {
        Ok(TypedExpr {
            ty: CType::Float(FloatWidth::W64),
            expr: RustExpr::RawLit(body.to_string()),
        })
    }
}

fn is_valid_float_body(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;

    let mut digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}
