// Declaration parsing: external declarations, function definitions, local
// declarations, specifier lists, and declarators.
//
// The parser keeps declaration specifiers as a raw source-order list; it is
// the translator that partitions and folds them. Struct/union/enum bodies
// are consumed (balanced braces) and dropped — only the tag survives, which
// is all the translator needs to report the construct as unsupported.

use crate::common::error::ParseError;
use crate::common::source::Span;
use crate::frontend::lexer::token::TokenKind;
use super::ast::*;
use super::parser::Parser;

/// A parsed declarator: the declared name plus its derived parts.
pub(super) struct Declarator {
    pub name: Option<String>,
    pub derived: Vec<DerivedDeclarator>,
    pub span: Span,
}

impl Parser {
    pub(super) fn parse_external_decl(&mut self) -> Result<ExternalDecl, ParseError> {
        let start = self.peek_span();
        let specifiers = self.parse_decl_specifiers()?;

        // Bare `struct s { ... };` or `enum e { ... };`
        if self.consume_if(&TokenKind::Semicolon) {
            return Ok(ExternalDecl::Declaration(Declaration {
                specifiers,
                declarators: Vec::new(),
                span: start,
            }));
        }

        let declarator = self.parse_declarator(false)?;
        let name = match declarator.name {
            Some(ref n) => n.clone(),
            None => {
                return Err(ParseError::new("expected declarator name", declarator.span));
            }
        };

        // A function definition is a declarator whose parameter list binds
        // directly to the name, followed by the body. The parameter list is
        // the first derived part in that case (pointers and arrays trail it).
        if matches!(self.peek(), TokenKind::LBrace) {
            let mut derived = declarator.derived;
            if !matches!(derived.first(), Some(DerivedDeclarator::Function(_, _))) {
                return Err(ParseError::new("expected ';' after declaration", self.peek_span()));
            }
            let (params, variadic) = match derived.remove(0) {
                DerivedDeclarator::Function(params, variadic) => (params, variadic),
                _ => unreachable!(),
            };
            let body = self.parse_compound_stmt()?;
            return Ok(ExternalDecl::FunctionDef(FunctionDef {
                specifiers,
                name,
                params,
                variadic,
                derived,
                body,
                span: start,
            }));
        }

        // Otherwise an ordinary declaration: finish the init-declarator list.
        let declarators = self.parse_init_declarators(declarator, name, true)?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(ExternalDecl::Declaration(Declaration { specifiers, declarators, span: start }))
    }

    /// Parse a local declaration inside a block. Unlike top-level
    /// declarations (which the translator skips wholesale), locals must
    /// carry real initializers, so brace initializers are a parse error
    /// here instead of being skipped.
    pub(super) fn parse_local_declaration(&mut self) -> Result<Declaration, ParseError> {
        let start = self.peek_span();
        let specifiers = self.parse_decl_specifiers()?;

        if self.consume_if(&TokenKind::Semicolon) {
            return Ok(Declaration { specifiers, declarators: Vec::new(), span: start });
        }

        let declarator = self.parse_declarator(false)?;
        let name = match declarator.name {
            Some(ref n) => n.clone(),
            None => return Err(ParseError::new("expected declarator name", declarator.span)),
        };
        let declarators = self.parse_init_declarators(declarator, name, false)?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(Declaration { specifiers, declarators, span: start })
    }

    /// Finish an init-declarator list whose first declarator is already
    /// parsed. `skip_brace_init` controls whether `= { ... }` initializers
    /// are consumed-and-dropped (top level) or rejected (locals).
    fn parse_init_declarators(
        &mut self,
        first: Declarator,
        first_name: String,
        skip_brace_init: bool,
    ) -> Result<Vec<InitDeclarator>, ParseError> {
        let mut declarators = Vec::new();
        let mut current = (first_name, first.derived, first.span);

        loop {
            let init = if self.consume_if(&TokenKind::Assign) {
                self.parse_initializer(skip_brace_init)?
            } else {
                None
            };
            declarators.push(InitDeclarator {
                name: current.0,
                derived: current.1,
                init,
                span: current.2,
            });

            if !self.consume_if(&TokenKind::Comma) {
                break;
            }
            let next = self.parse_declarator(false)?;
            let name = match next.name {
                Some(ref n) => n.clone(),
                None => return Err(ParseError::new("expected declarator name", next.span)),
            };
            current = (name, next.derived, next.span);
        }
        Ok(declarators)
    }

    fn parse_initializer(&mut self, skip_brace_init: bool) -> Result<Option<Expr>, ParseError> {
        if matches!(self.peek(), TokenKind::LBrace) {
            if skip_brace_init {
                self.skip_balanced_braces()?;
                return Ok(None);
            }
            return Err(ParseError::new(
                "initializer lists are not supported",
                self.peek_span(),
            ));
        }
        Ok(Some(self.parse_assignment_expr()?))
    }

    // === Specifiers ===

    /// Parse a declaration-specifier list (at least one specifier).
    pub(super) fn parse_decl_specifiers(&mut self) -> Result<Vec<DeclSpecifier>, ParseError> {
        let mut specifiers = Vec::new();
        loop {
            let spec = match self.peek() {
                TokenKind::Static => DeclSpecifier::Storage(StorageClass::Static),
                TokenKind::Extern => DeclSpecifier::Storage(StorageClass::Extern),
                TokenKind::Typedef => DeclSpecifier::Storage(StorageClass::Typedef),
                TokenKind::Auto => DeclSpecifier::Storage(StorageClass::Auto),
                TokenKind::Register => DeclSpecifier::Storage(StorageClass::Register),
                TokenKind::Const => DeclSpecifier::Qualifier(TypeQualifier::Const),
                TokenKind::Volatile => DeclSpecifier::Qualifier(TypeQualifier::Volatile),
                TokenKind::Restrict => DeclSpecifier::Qualifier(TypeQualifier::Restrict),
                TokenKind::Inline => DeclSpecifier::Function(FunctionSpecifier::Inline),
                TokenKind::Void => DeclSpecifier::Type(TypeSpec::Void),
                TokenKind::Char => DeclSpecifier::Type(TypeSpec::Char),
                TokenKind::Short => DeclSpecifier::Type(TypeSpec::Short),
                TokenKind::Int => DeclSpecifier::Type(TypeSpec::Int),
                TokenKind::Long => DeclSpecifier::Type(TypeSpec::Long),
                TokenKind::Float => DeclSpecifier::Type(TypeSpec::Float),
                TokenKind::Double => DeclSpecifier::Type(TypeSpec::Double),
                TokenKind::Signed => DeclSpecifier::Type(TypeSpec::Signed),
                TokenKind::Unsigned => DeclSpecifier::Type(TypeSpec::Unsigned),
                TokenKind::Struct | TokenKind::Union | TokenKind::Enum => {
                    specifiers.push(self.parse_tagged_specifier()?);
                    continue;
                }
                _ => break,
            };
            self.advance();
            specifiers.push(spec);
        }

        if specifiers.is_empty() {
            return Err(ParseError::new(
                format!("expected declaration, got {:?}", self.peek()),
                self.peek_span(),
            ));
        }
        Ok(specifiers)
    }

    /// Parse `struct`/`union`/`enum`, an optional tag, and an optional
    /// body. The body is consumed with brace matching and dropped.
    fn parse_tagged_specifier(&mut self) -> Result<DeclSpecifier, ParseError> {
        let keyword = self.peek().clone();
        self.advance();

        let tag = match self.peek() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };

        if matches!(self.peek(), TokenKind::LBrace) {
            self.skip_balanced_braces()?;
        }

        let spec = match keyword {
            TokenKind::Struct => TypeSpec::Struct(tag),
            TokenKind::Union => TypeSpec::Union(tag),
            _ => TypeSpec::Enum(tag),
        };
        Ok(DeclSpecifier::Type(spec))
    }

    fn skip_balanced_braces(&mut self) -> Result<(), ParseError> {
        let open = self.expect(&TokenKind::LBrace)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::new("unterminated '{'", open));
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    // === Declarators ===

    /// Parse a declarator. `abstract_ok` permits omitting the name (as in
    /// parameter declarations and type names).
    pub(super) fn parse_declarator(&mut self, abstract_ok: bool) -> Result<Declarator, ParseError> {
        let start = self.peek_span();

        // Prefix pointers (with optional qualifiers)
        let mut pointers = 0usize;
        while self.consume_if(&TokenKind::Star) {
            pointers += 1;
            while matches!(self.peek(), TokenKind::Const | TokenKind::Volatile | TokenKind::Restrict) {
                self.advance();
            }
        }

        // Direct declarator: a name, a parenthesized declarator, or (in
        // abstract position) nothing.
        let mut inner = match self.peek() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let span = self.peek_span();
                self.advance();
                Declarator { name: Some(name), derived: Vec::new(), span }
            }
            TokenKind::LParen if self.nested_declarator_follows() => {
                self.advance();
                let nested = self.parse_declarator(abstract_ok)?;
                self.expect(&TokenKind::RParen)?;
                nested
            }
            _ if abstract_ok => Declarator { name: None, derived: Vec::new(), span: start },
            other => {
                return Err(ParseError::new(
                    format!("expected declarator, got {:?}", other),
                    self.peek_span(),
                ));
            }
        };

        // Suffixes: parameter lists and array dimensions
        loop {
            match self.peek() {
                TokenKind::LParen => {
                    self.advance();
                    let (params, variadic) = self.parse_param_list()?;
                    inner.derived.push(DerivedDeclarator::Function(params, variadic));
                }
                TokenKind::LBracket => {
                    self.advance();
                    let size = if matches!(self.peek(), TokenKind::RBracket) {
                        None
                    } else {
                        Some(Box::new(self.parse_assignment_expr()?))
                    };
                    self.expect(&TokenKind::RBracket)?;
                    inner.derived.push(DerivedDeclarator::Array(size));
                }
                _ => break,
            }
        }

        for _ in 0..pointers {
            inner.derived.push(DerivedDeclarator::Pointer);
        }
        inner.span = start.merge(inner.span);
        Ok(inner)
    }

    /// Distinguish `(*f)(...)` style nested declarators from a parameter
    /// list directly following an omitted name.
    fn nested_declarator_follows(&self) -> bool {
        matches!(self.peek_ahead(1), TokenKind::Star | TokenKind::LParen | TokenKind::Identifier(_))
    }

    /// Parse a parameter list after the opening paren, consuming the
    /// closing paren. Returns the parameters and the variadic flag.
    fn parse_param_list(&mut self) -> Result<(Vec<ParamDecl>, bool), ParseError> {
        let mut params = Vec::new();
        let mut variadic = false;

        if self.consume_if(&TokenKind::RParen) {
            return Ok((params, variadic));
        }

        loop {
            if self.consume_if(&TokenKind::Ellipsis) {
                variadic = true;
                break;
            }
            let start = self.peek_span();
            let specifiers = self.parse_decl_specifiers()?;
            let declarator = self.parse_declarator(true)?;
            params.push(ParamDecl {
                specifiers,
                name: declarator.name,
                derived: declarator.derived,
                span: start,
            });
            if !self.consume_if(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(&TokenKind::RParen)?;
        Ok((params, variadic))
    }

    /// Parse a type name (cast operand or sizeof argument): specifiers plus
    /// an abstract declarator.
    pub(super) fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let start = self.peek_span();
        let specifiers = self.parse_decl_specifiers()?;
        let declarator = self.parse_declarator(true)?;
        if declarator.name.is_some() {
            return Err(ParseError::new("type name cannot declare a name", declarator.span));
        }
        Ok(TypeName { specifiers, derived: declarator.derived, span: start })
    }
}
