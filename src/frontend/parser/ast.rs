use crate::common::source::Span;

/// A complete translation unit (one C source file).
#[derive(Debug)]
pub struct TranslationUnit {
    pub decls: Vec<ExternalDecl>,
}

/// Top-level declarations in a translation unit.
#[derive(Debug)]
pub enum ExternalDecl {
    FunctionDef(FunctionDef),
    Declaration(Declaration),
}

/// A function definition.
///
/// The declaration specifiers are kept as the raw source-order list; the
/// translator partitions and folds them (the parser does no type policy).
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub specifiers: Vec<DeclSpecifier>,
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub variadic: bool,
    /// Declarator parts beyond the parameter list itself (e.g. the `*` of a
    /// pointer-returning definition). Non-empty means the definition does
    /// not translate.
    pub derived: Vec<DerivedDeclarator>,
    pub body: Stmt,
    pub span: Span,
}

/// A parameter declaration.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub specifiers: Vec<DeclSpecifier>,
    pub name: Option<String>,
    pub derived: Vec<DerivedDeclarator>,
    pub span: Span,
}

/// A variable/type declaration (top-level or local).
#[derive(Debug, Clone)]
pub struct Declaration {
    pub specifiers: Vec<DeclSpecifier>,
    pub declarators: Vec<InitDeclarator>,
    pub span: Span,
}

/// A declarator with optional initializer.
#[derive(Debug, Clone)]
pub struct InitDeclarator {
    pub name: String,
    pub derived: Vec<DerivedDeclarator>,
    pub init: Option<Expr>,
    pub span: Span,
}

/// Derived parts of a declarator (pointers, arrays, function params).
#[derive(Debug, Clone)]
pub enum DerivedDeclarator {
    Pointer,
    Array(Option<Box<Expr>>),
    Function(Vec<ParamDecl>, bool), // params, variadic
}

/// One entry of a declaration-specifier list, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclSpecifier {
    Storage(StorageClass),
    Qualifier(TypeQualifier),
    Function(FunctionSpecifier),
    Type(TypeSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Static,
    Extern,
    Typedef,
    Auto,
    Register,
}

impl StorageClass {
    pub fn keyword(self) -> &'static str {
        match self {
            StorageClass::Static => "static",
            StorageClass::Extern => "extern",
            StorageClass::Typedef => "typedef",
            StorageClass::Auto => "auto",
            StorageClass::Register => "register",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeQualifier {
    Const,
    Volatile,
    Restrict,
}

impl TypeQualifier {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeQualifier::Const => "const",
            TypeQualifier::Volatile => "volatile",
            TypeQualifier::Restrict => "restrict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionSpecifier {
    Inline,
}

/// Type specifiers as they appear in source. Struct/union/enum carry only
/// their tag; their bodies are consumed and dropped by the parser, since
/// aggregate types never translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Void,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Signed,
    Unsigned,
    Struct(Option<String>),
    Union(Option<String>),
    Enum(Option<String>),
}

impl TypeSpec {
    /// The source spelling, for diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeSpec::Void => "void",
            TypeSpec::Char => "char",
            TypeSpec::Short => "short",
            TypeSpec::Int => "int",
            TypeSpec::Long => "long",
            TypeSpec::Float => "float",
            TypeSpec::Double => "double",
            TypeSpec::Signed => "signed",
            TypeSpec::Unsigned => "unsigned",
            TypeSpec::Struct(_) => "struct",
            TypeSpec::Union(_) => "union",
            TypeSpec::Enum(_) => "enum",
        }
    }
}

/// A type name as it appears in a cast: specifiers plus an abstract
/// declarator (of which only the empty form translates).
#[derive(Debug, Clone)]
pub struct TypeName {
    pub specifiers: Vec<DeclSpecifier>,
    pub derived: Vec<DerivedDeclarator>,
    pub span: Span,
}

/// Statements.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(Option<Expr>, Span),
    Compound(Vec<BlockItem>, Span),
    If(Expr, Box<Stmt>, Option<Box<Stmt>>, Span),
    While(Expr, Box<Stmt>, Span),
    DoWhile(Box<Stmt>, Expr, Span),
    For(Option<Box<ForInit>>, Option<Expr>, Option<Expr>, Box<Stmt>, Span),
    Break(Span),
    Continue(Span),
    Return(Option<Expr>, Span),
    Switch(Expr, Box<Stmt>, Span),
    Case(Expr, Box<Stmt>, Span),
    Default(Box<Stmt>, Span),
    Goto(String, Span),
    Label(String, Box<Stmt>, Span),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Expr(_, s)
            | Stmt::Compound(_, s)
            | Stmt::If(_, _, _, s)
            | Stmt::While(_, _, s)
            | Stmt::DoWhile(_, _, s)
            | Stmt::For(_, _, _, _, s)
            | Stmt::Break(s)
            | Stmt::Continue(s)
            | Stmt::Return(_, s)
            | Stmt::Switch(_, _, s)
            | Stmt::Case(_, _, s)
            | Stmt::Default(_, s)
            | Stmt::Goto(_, s)
            | Stmt::Label(_, _, s) => *s,
        }
    }
}

/// Items within a block.
#[derive(Debug, Clone)]
pub enum BlockItem {
    Declaration(Declaration),
    Statement(Stmt),
}

/// For loop initializer.
#[derive(Debug, Clone)]
pub enum ForInit {
    Declaration(Declaration),
    Expr(Expr),
}

/// Expressions.
///
/// Floating literals carry their raw lexeme (suffix included); the
/// translator validates the shape and decides the emitted suffix, so other
/// producers of this AST get the same checking as parsed source.
#[derive(Debug, Clone)]
pub enum Expr {
    IntLiteral(i64, Span),
    FloatLiteral(String, Span),
    CharLiteral(char, Span),
    StringLiteral(String, Span),
    Identifier(String, Span),
    BinaryOp(BinOp, Box<Expr>, Box<Expr>, Span),
    UnaryOp(UnaryOp, Box<Expr>, Span),
    PostfixOp(PostfixOp, Box<Expr>, Span),
    Assign(Box<Expr>, Box<Expr>, Span),
    CompoundAssign(BinOp, Box<Expr>, Box<Expr>, Span),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>, Span),
    FunctionCall(Box<Expr>, Vec<Expr>, Span),
    Cast(TypeName, Box<Expr>, Span),
    /// A comma chain, flattened left-to-right; always at least two entries.
    Comma(Vec<Expr>, Span),
    AddressOf(Box<Expr>, Span),
    Deref(Box<Expr>, Span),
    Sizeof(Box<Expr>, Span),
    SizeofType(TypeName, Span),
    ArraySubscript(Box<Expr>, Box<Expr>, Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::IntLiteral(_, s)
            | Expr::FloatLiteral(_, s)
            | Expr::CharLiteral(_, s)
            | Expr::StringLiteral(_, s)
            | Expr::Identifier(_, s)
            | Expr::BinaryOp(_, _, _, s)
            | Expr::UnaryOp(_, _, s)
            | Expr::PostfixOp(_, _, s)
            | Expr::Assign(_, _, s)
            | Expr::CompoundAssign(_, _, _, s)
            | Expr::Conditional(_, _, _, s)
            | Expr::FunctionCall(_, _, s)
            | Expr::Cast(_, _, s)
            | Expr::Comma(_, s)
            | Expr::AddressOf(_, s)
            | Expr::Deref(_, s)
            | Expr::Sizeof(_, s)
            | Expr::SizeofType(_, s)
            | Expr::ArraySubscript(_, _, s) => *s,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
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
    LogicalAnd,
    LogicalOr,
}

impl BinOp {
    /// Returns true for operators whose C result is the 0/1 comparison int.
    pub fn is_comparison(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
    BitNot,
    LogicalNot,
    PreInc,
    PreDec,
}

/// Postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    PostInc,
    PostDec,
}
