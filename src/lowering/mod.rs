//! Lowering from the C AST to the Rust AST.
//!
//! The lowerer is a pure tree walk threaded through a scoped name
//! environment. Expressions lower to a (C type, Rust expression) pair so
//! that the arithmetic conversion rules can insert casts exactly where the
//! C standard materializes a conversion; statements lower to Rust
//! expressions (typically blocks). The walk fails on the first unsupported
//! construct and emits nothing for a failed translation unit.

mod expr;
mod stmt;

use log::{debug, trace};

use crate::common::env::Env;
use crate::common::error::TranslationError;
use crate::common::source::Span;
use crate::common::type_builder::{self, PartitionedSpecifiers};
use crate::common::types::CType;
use crate::frontend::parser::ast::{ExternalDecl, FunctionDef, StorageClass, TranslationUnit};
use crate::rust_ast::{Item, RustFn, Visibility};

/// An expression translation result: the C type the standard assigns to
/// the expression after the conversions already materialized, and the Rust
/// expression computing its value.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub ty: CType,
    pub expr: crate::rust_ast::RustExpr,
}

/// Translates one C translation unit into Rust items.
pub struct Lowerer {
    pub(crate) env: Env,
}

impl Lowerer {
    pub fn new() -> Self {
        Self { env: Env::new() }
    }

    /// Translate a whole translation unit. Function definitions become
    /// items in source order; every other external declaration is skipped.
    pub fn lower_unit(&mut self, unit: &TranslationUnit) -> Result<Vec<Item>, TranslationError> {
        let mut items = Vec::new();
        for decl in &unit.decls {
            match decl {
                ExternalDecl::FunctionDef(def) => {
                    debug!("lowering function '{}'", def.name);
                    items.push(self.lower_function(def)?);
                }
                ExternalDecl::Declaration(_) => {
                    trace!("skipping non-function external declaration");
                }
            }
        }
        Ok(items)
    }

    fn lower_function(&mut self, def: &FunctionDef) -> Result<Item, TranslationError> {
        let parts = type_builder::partition(&def.specifiers);
        parts.require_plain(def.span)?;
        let vis = function_visibility(&parts, &def.name, def.span)?;
        let ret = type_builder::fold_type_specs(&parts.types, def.span)?;

        if let Some(derived) = def.derived.first() {
            return Err(TranslationError::UnsupportedDeclarator {
                what: format!("{} declarator on function '{}'", derived_kind(derived), def.name),
                span: def.span,
            });
        }
        if def.variadic {
            return Err(TranslationError::UnsupportedDeclarator {
                what: format!("variadic parameter list on function '{}'", def.name),
                span: def.span,
            });
        }

        // Bind the function's name before its body so direct recursion
        // resolves; the binding outlives the function scope so later
        // definitions see it too.
        self.env.add(&def.name, CType::Function(Box::new(ret.clone())));

        let mark = self.env.mark();
        let result = self.lower_function_scoped(def, vis, &ret);
        self.env.release(mark);
        result
    }

    /// The part of function lowering that runs inside the function scope.
    /// The caller releases the scope whether or not this succeeds.
    fn lower_function_scoped(
        &mut self,
        def: &FunctionDef,
        vis: Visibility,
        ret: &CType,
    ) -> Result<Item, TranslationError> {
        let mut formals = Vec::new();
        if !is_empty_param_list(def) {
            for param in &def.params {
                if let Some(derived) = param.derived.first() {
                    return Err(TranslationError::UnsupportedDeclarator {
                        what: format!("{} declarator on parameter", derived_kind(derived)),
                        span: param.span,
                    });
                }
                let name = match &param.name {
                    Some(name) => name.clone(),
                    None => {
                        return Err(TranslationError::UnsupportedDeclarator {
                            what: format!("unnamed parameter of function '{}'", def.name),
                            span: param.span,
                        });
                    }
                };
                let parts = type_builder::partition(&param.specifiers);
                parts.require_plain(param.span)?;
                if let Some(storage) = parts.storage.first() {
                    return Err(TranslationError::UnsupportedStorageClass {
                        storage: storage.keyword().to_string(),
                        name: def.name.clone(),
                        span: param.span,
                    });
                }
                let ty = type_builder::fold_type_specs(&parts.types, param.span)?;
                let type_name = self.rust_type_name(&ty, param.span)?;
                self.env.add(&name, ty);
                formals.push((name, type_name));
            }
        }

        let body = self.lower_stmt(&def.body)?;
        let ret_name = self.rust_type_name(ret, def.span)?;
        Ok(Item::Fn(RustFn {
            vis,
            name: def.name.clone(),
            params: formals,
            ret: ret_name,
            body: Self::to_block(body),
        }))
    }

    /// The emitted spelling of a type; function types have none.
    pub(crate) fn rust_type_name(&self, ty: &CType, span: Span) -> Result<String, TranslationError> {
        match ty.rust_name() {
            Some(name) => Ok(name.to_string()),
            None => Err(TranslationError::UnsupportedTypeSpecifier {
                specifier: "function type".to_string(),
                span,
            }),
        }
    }
}

impl Default for Lowerer {
    fn default() -> Self {
        Self::new()
    }
}

/// `(void)` and `()` both mean "no parameters".
fn is_empty_param_list(def: &FunctionDef) -> bool {
    if def.params.is_empty() {
        return true;
    }
    if def.params.len() != 1 {
        return false;
    }
    let param = &def.params[0];
    if param.name.is_some() || !param.derived.is_empty() {
        return false;
    }
    let parts = type_builder::partition(&param.specifiers);
    parts.storage.is_empty()
        && parts.qualifiers.is_empty()
        && parts.function.is_empty()
        && matches!(
            type_builder::fold_type_specs(&parts.types, param.span),
            Ok(CType::Void)
        )
}

fn function_visibility(
    parts: &PartitionedSpecifiers,
    name: &str,
    span: Span,
) -> Result<Visibility, TranslationError> {
    match parts.storage.as_slice() {
        [] => Ok(Visibility::Public),
        [StorageClass::Static] => Ok(Visibility::Private),
        [storage, ..] => Err(TranslationError::UnsupportedStorageClass {
            storage: storage.keyword().to_string(),
            name: name.to_string(),
            span,
        }),
    }
}

pub(crate) fn derived_kind(derived: &crate::frontend::parser::ast::DerivedDeclarator) -> &'static str {
    use crate::frontend::parser::ast::DerivedDeclarator;
    match derived {
        DerivedDeclarator::Pointer => "pointer",
        DerivedDeclarator::Array(_) => "array",
        DerivedDeclarator::Function(_, _) => "function",
    }
}
