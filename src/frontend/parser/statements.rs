// Statement parsing: all C statement forms the AST models, supported by
// the translator or not. Rejection of the unsupported ones (do-while,
// switch, goto, labels, for-with-step) is the translator's job; parsing
// them here keeps the failure a translation error with a span instead of
// a syntax error.

use crate::common::error::ParseError;
use crate::frontend::lexer::token::TokenKind;
use super::ast::*;
use super::parser::Parser;

impl Parser {
    pub(super) fn parse_compound_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut items = Vec::new();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            if self.is_decl_start() {
                items.push(BlockItem::Declaration(self.parse_local_declaration()?));
            } else {
                items.push(BlockItem::Statement(self.parse_stmt()?));
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Stmt::Compound(items, start))
    }

    pub(super) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek() {
            TokenKind::Return => {
                let span = self.peek_span();
                self.advance();
                let expr = if matches!(self.peek(), TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::Return(expr, span))
            }
            TokenKind::If => {
                let span = self.peek_span();
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                let then_stmt = self.parse_stmt()?;
                let else_stmt = if self.consume_if(&TokenKind::Else) {
                    Some(Box::new(self.parse_stmt()?))
                } else {
                    None
                };
                Ok(Stmt::If(cond, Box::new(then_stmt), else_stmt, span))
            }
            TokenKind::While => {
                let span = self.peek_span();
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                let body = self.parse_stmt()?;
                Ok(Stmt::While(cond, Box::new(body), span))
            }
            TokenKind::Do => {
                let span = self.peek_span();
                self.advance();
                let body = self.parse_stmt()?;
                self.expect(&TokenKind::While)?;
                self.expect(&TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::DoWhile(Box::new(body), cond, span))
            }
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::LBrace => self.parse_compound_stmt(),
            TokenKind::Break => {
                let span = self.peek_span();
                self.advance();
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::Break(span))
            }
            TokenKind::Continue => {
                let span = self.peek_span();
                self.advance();
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::Continue(span))
            }
            TokenKind::Switch => {
                let span = self.peek_span();
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                let body = self.parse_stmt()?;
                Ok(Stmt::Switch(expr, Box::new(body), span))
            }
            TokenKind::Case => {
                let span = self.peek_span();
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::Colon)?;
                let stmt = self.parse_stmt()?;
                Ok(Stmt::Case(expr, Box::new(stmt), span))
            }
            TokenKind::Default => {
                let span = self.peek_span();
                self.advance();
                self.expect(&TokenKind::Colon)?;
                let stmt = self.parse_stmt()?;
                Ok(Stmt::Default(Box::new(stmt), span))
            }
            TokenKind::Goto => {
                let span = self.peek_span();
                self.advance();
                let (label, _) = self.expect_identifier()?;
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::Goto(label, span))
            }
            TokenKind::Semicolon => {
                let span = self.peek_span();
                self.advance();
                Ok(Stmt::Expr(None, span))
            }
            // `label:` statements need two tokens of lookahead to separate
            // from an expression statement starting with an identifier.
            TokenKind::Identifier(_) if matches!(self.peek_ahead(1), TokenKind::Colon) => {
                let span = self.peek_span();
                let (label, _) = self.expect_identifier()?;
                self.expect(&TokenKind::Colon)?;
                let stmt = self.parse_stmt()?;
                Ok(Stmt::Label(label, Box::new(stmt), span))
            }
            _ => {
                let span = self.peek_span();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::Expr(Some(expr), span))
            }
        }
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.peek_span();
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        let init = if self.consume_if(&TokenKind::Semicolon) {
            None
        } else if self.is_decl_start() {
            // The declaration grammar consumes its own ';'
            Some(Box::new(ForInit::Declaration(self.parse_local_declaration()?)))
        } else {
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::Semicolon)?;
            Some(Box::new(ForInit::Expr(expr)))
        };

        let cond = if matches!(self.peek(), TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;

        let step = if matches!(self.peek(), TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;

        let body = self.parse_stmt()?;
        Ok(Stmt::For(init, cond, step, Box::new(body), span))
    }
}
