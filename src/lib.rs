//! `ccr` — translates a subset of C into semantically equivalent Rust
//! source.
//!
//! The pipeline is a conventional frontend followed by a source-to-source
//! lowering: the lexer and parser build a C syntax tree, the lowerer walks
//! it producing a Rust AST while materializing C's implicit arithmetic
//! conversions and boolean coercions as explicit casts and wrappers, and
//! the printer serializes the result. Unsupported C constructs fail the
//! translation of the whole unit with a located error; nothing is emitted
//! for a failed unit.

pub mod common;
pub mod driver;
pub mod frontend;
pub mod lowering;
pub mod rust_ast;

pub use common::error::{ParseError, TranslationError};
pub use lowering::Lowerer;
