//! Statement lowering. Every C statement becomes one Rust expression,
//! usually a block; `to_block` flattens nested no-value blocks so emitted
//! bodies don't pick up gratuitous braces.

use crate::common::error::TranslationError;
use crate::common::type_builder;
use crate::frontend::parser::ast::{BlockItem, Declaration, ForInit, Stmt};
use crate::rust_ast::{Block, RustExpr, RustStmt};

use super::{derived_kind, Lowerer};

impl Lowerer {
    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<RustExpr, TranslationError> {
        match stmt {
            Stmt::Expr(None, _) => Ok(RustExpr::Block(Block::empty())),
            Stmt::Expr(Some(expr), _) => Ok(self.lower_expr(false, expr)?.expr),

            Stmt::Compound(items, _) => {
                let mark = self.env.mark();
                let result = self.lower_block_items(items);
                self.env.release(mark);
                Ok(RustExpr::Block(Block { stmts: result?, tail: None }))
            }

            Stmt::If(cond, then_stmt, else_stmt, _) => {
                let cond = self.lower_expr(true, cond)?.expr.to_bool();
                let then_blk = Self::to_block(self.lower_stmt(then_stmt)?);
                let else_blk = match else_stmt {
                    Some(else_stmt) => Self::to_block(self.lower_stmt(else_stmt)?),
                    None => Block::empty(),
                };
                Ok(RustExpr::If(Box::new(cond), then_blk, else_blk))
            }

            Stmt::While(cond, body, _) => {
                let cond = self.lower_expr(true, cond)?.expr.to_bool();
                let body = Self::to_block(self.lower_stmt(body)?);
                Ok(RustExpr::While(Box::new(cond), body))
            }

            Stmt::DoWhile(_, _, span) => Err(TranslationError::UnsupportedStatement {
                what: "do-while statement".to_string(),
                span: *span,
            }),

            Stmt::For(init, cond, step, body, span) => {
                if step.is_some() {
                    return Err(TranslationError::UnsupportedStatement {
                        what: "for statement with a step expression".to_string(),
                        span: *span,
                    });
                }
                let mark = self.env.mark();
                let result = self.lower_for(init.as_deref(), cond.as_ref(), body);
                self.env.release(mark);
                result
            }

            Stmt::Break(_) => Ok(RustExpr::Break),
            Stmt::Continue(_) => Ok(RustExpr::Continue),

            Stmt::Return(value, _) => {
                let value = match value {
                    Some(expr) => Some(Box::new(self.lower_expr(true, expr)?.expr)),
                    None => None,
                };
                Ok(RustExpr::Return(value))
            }

            Stmt::Switch(_, _, span) => Err(TranslationError::UnsupportedStatement {
                what: "switch statement".to_string(),
                span: *span,
            }),
            Stmt::Case(_, _, span) => Err(TranslationError::UnsupportedStatement {
                what: "case label".to_string(),
                span: *span,
            }),
            Stmt::Default(_, span) => Err(TranslationError::UnsupportedStatement {
                what: "default label".to_string(),
                span: *span,
            }),
            Stmt::Goto(_, span) => Err(TranslationError::UnsupportedStatement {
                what: "goto statement".to_string(),
                span: *span,
            }),
            Stmt::Label(_, _, span) => Err(TranslationError::UnsupportedStatement {
                what: "labeled statement".to_string(),
                span: *span,
            }),
        }
    }

    /// Lower the items of a compound statement. The caller owns the scope;
    /// siblings share it, so declarations are visible to the statements
    /// that follow them.
    fn lower_block_items(&mut self, items: &[BlockItem]) -> Result<Vec<RustStmt>, TranslationError> {
        let mut stmts = Vec::new();
        for item in items {
            match item {
                BlockItem::Statement(stmt) => {
                    stmts.push(RustStmt::Expr(self.lower_stmt(stmt)?));
                }
                BlockItem::Declaration(decl) => {
                    stmts.extend(self.lower_local_decl(decl)?);
                }
            }
        }
        Ok(stmts)
    }

    /// Lower a `for` whose scope the caller has already opened: the
    /// initializer becomes the preamble, and the loop itself is the block's
    /// trailing expression.
    fn lower_for(
        &mut self,
        init: Option<&ForInit>,
        cond: Option<&crate::frontend::parser::ast::Expr>,
        body: &Stmt,
    ) -> Result<RustExpr, TranslationError> {
        let preamble = match init {
            None => Vec::new(),
            Some(ForInit::Expr(expr)) => {
                vec![RustStmt::Expr(self.lower_expr(false, expr)?.expr)]
            }
            Some(ForInit::Declaration(decl)) => self.lower_local_decl(decl)?,
        };

        let loop_expr = match cond {
            Some(cond) => {
                let cond = self.lower_expr(true, cond)?.expr.to_bool();
                let body = Self::to_block(self.lower_stmt(body)?);
                RustExpr::While(Box::new(cond), body)
            }
            None => {
                let body = Self::to_block(self.lower_stmt(body)?);
                RustExpr::Loop(body)
            }
        };

        Ok(RustExpr::Block(Block {
            stmts: preamble,
            tail: Some(Box::new(loop_expr)),
        }))
    }

    /// Lower a local declaration to one `let mut` per declarator. The
    /// initializer is translated before the name is bound, and the binding
    /// is visible to the declarators that follow it.
    pub(crate) fn lower_local_decl(
        &mut self,
        decl: &Declaration,
    ) -> Result<Vec<RustStmt>, TranslationError> {
        let parts = type_builder::partition(&decl.specifiers);
        parts.require_plain(decl.span)?;
        if let Some(storage) = parts.storage.first() {
            let name = decl
                .declarators
                .first()
                .map(|d| d.name.clone())
                .unwrap_or_default();
            return Err(TranslationError::UnsupportedStorageClass {
                storage: storage.keyword().to_string(),
                name,
                span: decl.span,
            });
        }
        let ty = type_builder::fold_type_specs(&parts.types, decl.span)?;
        let type_name = self.rust_type_name(&ty, decl.span)?;

        let mut stmts = Vec::new();
        for declarator in &decl.declarators {
            if let Some(derived) = declarator.derived.first() {
                return Err(TranslationError::UnsupportedDeclarator {
                    what: format!("{} declarator '{}'", derived_kind(derived), declarator.name),
                    span: declarator.span,
                });
            }
            let init = match &declarator.init {
                Some(expr) => Some(self.lower_expr(true, expr)?.expr),
                None => None,
            };
            self.env.add(&declarator.name, ty.clone());
            stmts.push(RustStmt::Let {
                mutable: true,
                name: declarator.name.clone(),
                ty: Some(type_name.clone()),
                init,
            });
        }
        Ok(stmts)
    }

    /// Normalize a lowered statement into a block: a no-value block is used
    /// as-is; anything else becomes a single statement.
    pub(crate) fn to_block(expr: RustExpr) -> Block {
        match expr {
            RustExpr::Block(block) if block.tail.is_none() => block,
            other => Block {
                stmts: vec![RustStmt::Expr(other)],
                tail: None,
            },
        }
    }
}
