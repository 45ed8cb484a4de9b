//! Error types for the frontend and the translation engine.
//!
//! Parsing and translation fail fast: the first error aborts the enclosing
//! translation unit, and no partial output is emitted for a failed function.
//! Every variant carries a span so the driver can render a GCC-style
//! `file:line:col: error: ...` line.

use crate::common::source::Span;
use thiserror::Error;

/// A syntax error from the lexer or parser.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }
}

/// A fatal translation failure. None of these are recovered from; the
/// engine reports the first one with enough context to locate the node.
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("unsupported type specifier '{specifier}'")]
    UnsupportedTypeSpecifier { specifier: String, span: Span },

    #[error("unsupported storage class '{storage}' on function '{name}'")]
    UnsupportedStorageClass { storage: String, name: String, span: Span },

    #[error("unsupported declarator: {what}")]
    UnsupportedDeclarator { what: String, span: Span },

    #[error("unsupported expression: {what}")]
    UnsupportedExpression { what: String, span: Span },

    #[error("unsupported statement: {what}")]
    UnsupportedStatement { what: String, span: Span },

    #[error("unsupported unary operator '{operator}'")]
    UnsupportedUnaryOperator { operator: String, span: Span },

    #[error("use of undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    #[error("malformed floating-point literal '{lexeme}'")]
    MalformedFloat { lexeme: String, span: Span },

    #[error("called object is not a function")]
    CalleeNotFunction { span: Span },
}

impl TranslationError {
    /// The source span of the offending node.
    pub fn span(&self) -> Span {
        match self {
            TranslationError::UnsupportedTypeSpecifier { span, .. }
            | TranslationError::UnsupportedStorageClass { span, .. }
            | TranslationError::UnsupportedDeclarator { span, .. }
            | TranslationError::UnsupportedExpression { span, .. }
            | TranslationError::UnsupportedStatement { span, .. }
            | TranslationError::UnsupportedUnaryOperator { span, .. }
            | TranslationError::UndefinedVariable { span, .. }
            | TranslationError::MalformedFloat { span, .. }
            | TranslationError::CalleeNotFunction { span } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let e = TranslationError::UndefinedVariable {
            name: "x".to_string(),
            span: Span::dummy(),
        };
        assert_eq!(e.to_string(), "use of undefined variable 'x'");

        let e = TranslationError::MalformedFloat {
            lexeme: "1.5L".to_string(),
            span: Span::dummy(),
        };
        assert_eq!(e.to_string(), "malformed floating-point literal '1.5L'");
    }
}
