// Expression parsing: precedence climbing from comma expression down to
// primary.
//
// Binary operators are handled by a shared `parse_binary_expr` method
// parameterized on `PrecedenceLevel`, which maps tokens to operators and
// recurses to the next-tighter level.
//
// Call hierarchy (loosest to tightest binding):
//   parse_expr -> parse_assignment_expr -> parse_conditional_expr
//   -> parse_binary_expr(LogicalOr) -> ... -> parse_binary_expr(Multiplicative)
//   -> parse_cast_expr -> parse_unary_expr -> parse_postfix_expr
//   -> parse_primary_expr

use crate::common::error::ParseError;
use crate::frontend::lexer::token::TokenKind;
use super::ast::*;
use super::parser::Parser;

/// C operator precedence levels (loosest to tightest binding).
#[derive(Debug, Clone, Copy)]
enum PrecedenceLevel {
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
}

impl Parser {
    /// Parse a full expression, collecting comma chains into a flat list.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_assignment_expr()?;
        if !matches!(self.peek(), TokenKind::Comma) {
            return Ok(first);
        }
        let span = first.span();
        let mut items = vec![first];
        while self.consume_if(&TokenKind::Comma) {
            items.push(self.parse_assignment_expr()?);
        }
        Ok(Expr::Comma(items, span))
    }

    pub(super) fn parse_assignment_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_conditional_expr()?;

        if matches!(self.peek(), TokenKind::Assign) {
            let span = self.peek_span();
            self.advance();
            let rhs = self.parse_assignment_expr()?;
            return Ok(Expr::Assign(Box::new(lhs), Box::new(rhs), span));
        }

        if let Some(op) = self.compound_assign_op() {
            let span = self.peek_span();
            self.advance();
            let rhs = self.parse_assignment_expr()?;
            return Ok(Expr::CompoundAssign(op, Box::new(lhs), Box::new(rhs), span));
        }

        Ok(lhs)
    }

    fn compound_assign_op(&self) -> Option<BinOp> {
        match self.peek() {
            TokenKind::PlusAssign => Some(BinOp::Add),
            TokenKind::MinusAssign => Some(BinOp::Sub),
            TokenKind::StarAssign => Some(BinOp::Mul),
            TokenKind::SlashAssign => Some(BinOp::Div),
            TokenKind::PercentAssign => Some(BinOp::Mod),
            TokenKind::AmpAssign => Some(BinOp::BitAnd),
            TokenKind::PipeAssign => Some(BinOp::BitOr),
            TokenKind::CaretAssign => Some(BinOp::BitXor),
            TokenKind::LessLessAssign => Some(BinOp::Shl),
            TokenKind::GreaterGreaterAssign => Some(BinOp::Shr),
            _ => None,
        }
    }

    fn parse_conditional_expr(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_binary_expr(PrecedenceLevel::LogicalOr)?;
        if self.consume_if(&TokenKind::Question) {
            let span = cond.span();
            let then_expr = self.parse_expr()?;
            self.expect(&TokenKind::Colon)?;
            let else_expr = self.parse_conditional_expr()?;
            Ok(Expr::Conditional(
                Box::new(cond),
                Box::new(then_expr),
                Box::new(else_expr),
                span,
            ))
        } else {
            Ok(cond)
        }
    }

    /// Map a token to a binary operator at the current precedence level.
    fn token_to_binop(&self, token: &TokenKind, level: PrecedenceLevel) -> Option<BinOp> {
        match (token, level) {
            (TokenKind::PipePipe, PrecedenceLevel::LogicalOr) => Some(BinOp::LogicalOr),
            (TokenKind::AmpAmp, PrecedenceLevel::LogicalAnd) => Some(BinOp::LogicalAnd),
            (TokenKind::Pipe, PrecedenceLevel::BitwiseOr) => Some(BinOp::BitOr),
            (TokenKind::Caret, PrecedenceLevel::BitwiseXor) => Some(BinOp::BitXor),
            (TokenKind::Amp, PrecedenceLevel::BitwiseAnd) => Some(BinOp::BitAnd),
            (TokenKind::EqualEqual, PrecedenceLevel::Equality) => Some(BinOp::Eq),
            (TokenKind::BangEqual, PrecedenceLevel::Equality) => Some(BinOp::Ne),
            (TokenKind::Less, PrecedenceLevel::Relational) => Some(BinOp::Lt),
            (TokenKind::LessEqual, PrecedenceLevel::Relational) => Some(BinOp::Le),
            (TokenKind::Greater, PrecedenceLevel::Relational) => Some(BinOp::Gt),
            (TokenKind::GreaterEqual, PrecedenceLevel::Relational) => Some(BinOp::Ge),
            (TokenKind::LessLess, PrecedenceLevel::Shift) => Some(BinOp::Shl),
            (TokenKind::GreaterGreater, PrecedenceLevel::Shift) => Some(BinOp::Shr),
            (TokenKind::Plus, PrecedenceLevel::Additive) => Some(BinOp::Add),
            (TokenKind::Minus, PrecedenceLevel::Additive) => Some(BinOp::Sub),
            (TokenKind::Star, PrecedenceLevel::Multiplicative) => Some(BinOp::Mul),
            (TokenKind::Slash, PrecedenceLevel::Multiplicative) => Some(BinOp::Div),
            (TokenKind::Percent, PrecedenceLevel::Multiplicative) => Some(BinOp::Mod),
            _ => None,
        }
    }

    /// Parse a left-associative binary expression at the given precedence
    /// level.
    fn parse_binary_expr(&mut self, level: PrecedenceLevel) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_next_tighter(level)?;
        loop {
            let op = match self.token_to_binop(self.peek(), level) {
                Some(op) => op,
                None => break,
            };
            let span = self.peek_span();
            self.advance();
            let rhs = self.parse_next_tighter(level)?;
            lhs = Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs), span);
        }
        Ok(lhs)
    }

    fn parse_next_tighter(&mut self, level: PrecedenceLevel) -> Result<Expr, ParseError> {
        match level {
            PrecedenceLevel::LogicalOr => self.parse_binary_expr(PrecedenceLevel::LogicalAnd),
            PrecedenceLevel::LogicalAnd => self.parse_binary_expr(PrecedenceLevel::BitwiseOr),
            PrecedenceLevel::BitwiseOr => self.parse_binary_expr(PrecedenceLevel::BitwiseXor),
            PrecedenceLevel::BitwiseXor => self.parse_binary_expr(PrecedenceLevel::BitwiseAnd),
            PrecedenceLevel::BitwiseAnd => self.parse_binary_expr(PrecedenceLevel::Equality),
            PrecedenceLevel::Equality => self.parse_binary_expr(PrecedenceLevel::Relational),
            PrecedenceLevel::Relational => self.parse_binary_expr(PrecedenceLevel::Shift),
            PrecedenceLevel::Shift => self.parse_binary_expr(PrecedenceLevel::Additive),
            PrecedenceLevel::Additive => self.parse_binary_expr(PrecedenceLevel::Multiplicative),
            PrecedenceLevel::Multiplicative => self.parse_cast_expr(),
        }
    }

    /// Parse a cast expression `(type-name)expr`, or fall through to unary.
    fn parse_cast_expr(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), TokenKind::LParen) && self.type_name_after_lparen() {
            let span = self.peek_span();
            self.advance();
            let type_name = self.parse_type_name()?;
            self.expect(&TokenKind::RParen)?;
            let operand = self.parse_cast_expr()?;
            return Ok(Expr::Cast(type_name, Box::new(operand), span));
        }
        self.parse_unary_expr()
    }

    fn type_name_after_lparen(&self) -> bool {
        matches!(
            self.peek_ahead(1),
            TokenKind::Void
                | TokenKind::Char
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Float
                | TokenKind::Double
                | TokenKind::Signed
                | TokenKind::Unsigned
                | TokenKind::Struct
                | TokenKind::Union
                | TokenKind::Enum
                | TokenKind::Const
                | TokenKind::Volatile
                | TokenKind::Restrict
        )
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        let span = self.peek_span();
        let op = match self.peek() {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Bang => Some(UnaryOp::LogicalNot),
            TokenKind::PlusPlus => Some(UnaryOp::PreInc),
            TokenKind::MinusMinus => Some(UnaryOp::PreDec),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_cast_expr()?;
            return Ok(Expr::UnaryOp(op, Box::new(operand), span));
        }

        match self.peek() {
            TokenKind::Amp => {
                self.advance();
                let operand = self.parse_cast_expr()?;
                Ok(Expr::AddressOf(Box::new(operand), span))
            }
            TokenKind::Star => {
                self.advance();
                let operand = self.parse_cast_expr()?;
                Ok(Expr::Deref(Box::new(operand), span))
            }
            TokenKind::Sizeof => {
                self.advance();
                if matches!(self.peek(), TokenKind::LParen) && self.type_name_after_lparen() {
                    self.advance();
                    let type_name = self.parse_type_name()?;
                    self.expect(&TokenKind::RParen)?;
                    Ok(Expr::SizeofType(type_name, span))
                } else {
                    let operand = self.parse_unary_expr()?;
                    Ok(Expr::Sizeof(Box::new(operand), span))
                }
            }
            _ => self.parse_postfix_expr(),
        }
    }

    fn parse_postfix_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            match self.peek() {
                TokenKind::LParen => {
                    let span = self.peek_span();
                    self.advance();
                    let mut args = Vec::new();
                    if !matches!(self.peek(), TokenKind::RParen) {
                        loop {
                            args.push(self.parse_assignment_expr()?);
                            if !self.consume_if(&TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(&TokenKind::RParen)?;
                    expr = Expr::FunctionCall(Box::new(expr), args, span);
                }
                TokenKind::LBracket => {
                    let span = self.peek_span();
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(&TokenKind::RBracket)?;
                    expr = Expr::ArraySubscript(Box::new(expr), Box::new(index), span);
                }
                TokenKind::PlusPlus => {
                    let span = self.peek_span();
                    self.advance();
                    expr = Expr::PostfixOp(PostfixOp::PostInc, Box::new(expr), span);
                }
                TokenKind::MinusMinus => {
                    let span = self.peek_span();
                    self.advance();
                    expr = Expr::PostfixOp(PostfixOp::PostDec, Box::new(expr), span);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let span = self.peek_span();
        match self.peek().clone() {
            TokenKind::IntLiteral(value) => {
                self.advance();
                Ok(Expr::IntLiteral(value, span))
            }
            TokenKind::FloatLiteral(lexeme) => {
                self.advance();
                Ok(Expr::FloatLiteral(lexeme, span))
            }
            TokenKind::CharLiteral(c) => {
                self.advance();
                Ok(Expr::CharLiteral(c, span))
            }
            TokenKind::StringLiteral(s) => {
                self.advance();
                Ok(Expr::StringLiteral(s, span))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::Identifier(name, span))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            other => Err(ParseError::new(
                format!("expected expression, got {:?}", other),
                span,
            )),
        }
    }
}
