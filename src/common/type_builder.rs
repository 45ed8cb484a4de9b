//! Declaration-specifier handling: partitioning a raw specifier list into
//! its storage/qualifier/function/type parts, and folding the type
//! specifiers into a [`CType`].

use crate::common::error::TranslationError;
use crate::common::source::Span;
use crate::common::types::{CType, FloatWidth, IntWidth, Signedness};
use crate::frontend::parser::ast::{
    DeclSpecifier, FunctionSpecifier, StorageClass, TypeQualifier, TypeSpec,
};

/// A declaration-specifier list split by specifier kind, in source order.
#[derive(Debug, Default)]
pub struct PartitionedSpecifiers {
    pub storage: Vec<StorageClass>,
    pub qualifiers: Vec<TypeQualifier>,
    pub function: Vec<FunctionSpecifier>,
    pub types: Vec<TypeSpec>,
}

/// Split a specifier list into its four kinds.
pub fn partition(specifiers: &[DeclSpecifier]) -> PartitionedSpecifiers {
    let mut out = PartitionedSpecifiers::default();
    for spec in specifiers {
        match spec {
            DeclSpecifier::Storage(s) => out.storage.push(*s),
            DeclSpecifier::Qualifier(q) => out.qualifiers.push(*q),
            DeclSpecifier::Function(f) => out.function.push(*f),
            DeclSpecifier::Type(t) => out.types.push(t.clone()),
        }
    }
    out
}

impl PartitionedSpecifiers {
    /// Reject type qualifiers and function specifiers, which no supported
    /// locus accepts.
    pub fn require_plain(&self, span: Span) -> Result<(), TranslationError> {
        if let Some(q) = self.qualifiers.first() {
            return Err(TranslationError::UnsupportedTypeSpecifier {
                specifier: q.keyword().to_string(),
                span,
            });
        }
        if self.function.first().is_some() {
            return Err(TranslationError::UnsupportedTypeSpecifier {
                specifier: "inline".to_string(),
                span,
            });
        }
        Ok(())
    }
}

/// Fold a type-specifier sequence, right to left, onto the default of
/// `signed int`.
///
/// Each specifier adjusts the accumulator: `signed`/`unsigned` set the
/// signedness, the width keywords set the width of an integer accumulator
/// (which is how `short int` lands on 16 bits and `long double` stays a
/// double), and `float`/`double`/`void` replace the accumulator outright.
pub fn fold_type_specs(types: &[TypeSpec], span: Span) -> Result<CType, TranslationError> {
    let mut acc = CType::int();
    for spec in types.iter().rev() {
        acc = apply_spec(spec, acc, span)?;
    }
    Ok(acc)
}

fn apply_spec(spec: &TypeSpec, acc: CType, span: Span) -> Result<CType, TranslationError> {
    match spec {
        TypeSpec::Signed => Ok(set_signedness(acc, Signedness::Signed)),
        TypeSpec::Unsigned => Ok(set_signedness(acc, Signedness::Unsigned)),
        TypeSpec::Char => Ok(set_width(acc, IntWidth::W8)),
        TypeSpec::Short => Ok(set_width(acc, IntWidth::W16)),
        TypeSpec::Int => Ok(set_width(acc, IntWidth::W32)),
        TypeSpec::Long => Ok(set_width(acc, IntWidth::Word)),
        TypeSpec::Float => Ok(CType::Float(FloatWidth::W32)),
        TypeSpec::Double => Ok(CType::Float(FloatWidth::W64)),
        TypeSpec::Void => Ok(CType::Void),
        TypeSpec::Struct(_) | TypeSpec::Union(_) | TypeSpec::Enum(_) => {
            Err(TranslationError::UnsupportedTypeSpecifier {
                specifier: spec.keyword().to_string(),
                span,
            })
        }
    }
}

fn set_signedness(acc: CType, s: Signedness) -> CType {
    match acc {
        CType::Int(_, w) => CType::Int(s, w),
        // `signed`/`unsigned` next to a non-integer specifier is not valid
        // C; fall back to adjusting the default int.
        _ => CType::Int(s, IntWidth::W32),
    }
}

fn set_width(acc: CType, w: IntWidth) -> CType {
    match acc {
        CType::Int(s, _) => CType::Int(s, w),
        // Width keywords only shape integer accumulators; `long double`
        // keeps the double it folded into.
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TypeSpec::*;

    fn fold(specs: &[TypeSpec]) -> CType {
        fold_type_specs(specs, Span::dummy()).unwrap()
    }

    #[test]
    fn test_defaults_and_simple_specs() {
        assert_eq!(fold(&[]), CType::int());
        assert_eq!(fold(&[Int]), CType::int());
        assert_eq!(fold(&[Void]), CType::Void);
        assert_eq!(fold(&[Float]), CType::Float(FloatWidth::W32));
        assert_eq!(fold(&[Double]), CType::Float(FloatWidth::W64));
    }

    #[test]
    fn test_char_is_signed_by_default() {
        assert_eq!(fold(&[Char]), CType::Int(Signedness::Signed, IntWidth::W8));
    }

    #[test]
    fn test_long_is_word_width() {
        assert_eq!(fold(&[Long]), CType::Int(Signedness::Signed, IntWidth::Word));
        assert_eq!(fold(&[Long, Int]), CType::Int(Signedness::Signed, IntWidth::Word));
        assert_eq!(fold(&[Unsigned, Long]), CType::Int(Signedness::Unsigned, IntWidth::Word));
    }

    #[test]
    fn test_second_long_has_no_distinct_effect() {
        // `long long` folds to word-width exactly like `long`
        assert_eq!(fold(&[Long, Long]), CType::Int(Signedness::Signed, IntWidth::Word));
        assert_eq!(
            fold(&[Unsigned, Long, Long]),
            CType::Int(Signedness::Unsigned, IntWidth::Word)
        );
        assert_eq!(
            fold(&[Long, Long, Int]),
            CType::Int(Signedness::Signed, IntWidth::Word)
        );
    }

    #[test]
    fn test_signedness_order_irrelevant() {
        let u8t = CType::Int(Signedness::Unsigned, IntWidth::W8);
        assert_eq!(fold(&[Unsigned, Char]), u8t);
        assert_eq!(fold(&[Char, Unsigned]), u8t);
        assert_eq!(fold(&[Signed, Char]), CType::Int(Signedness::Signed, IntWidth::W8));
    }

    #[test]
    fn test_width_with_int_keyword() {
        assert_eq!(fold(&[Short, Int]), CType::Int(Signedness::Signed, IntWidth::W16));
        assert_eq!(fold(&[Unsigned, Short, Int]), CType::Int(Signedness::Unsigned, IntWidth::W16));
    }

    #[test]
    fn test_long_double_stays_double() {
        assert_eq!(fold(&[Long, Double]), CType::Float(FloatWidth::W64));
    }

    #[test]
    fn test_aggregate_specifier_rejected() {
        let err = fold_type_specs(&[Struct(Some("p".to_string()))], Span::dummy()).unwrap_err();
        assert!(matches!(err, TranslationError::UnsupportedTypeSpecifier { .. }));
    }

    #[test]
    fn test_partition_keeps_source_order() {
        let specs = vec![
            DeclSpecifier::Storage(StorageClass::Static),
            DeclSpecifier::Qualifier(TypeQualifier::Const),
            DeclSpecifier::Type(Unsigned),
            DeclSpecifier::Type(Int),
        ];
        let p = partition(&specs);
        assert_eq!(p.storage, vec![StorageClass::Static]);
        assert_eq!(p.qualifiers, vec![TypeQualifier::Const]);
        assert_eq!(p.types, vec![Unsigned, Int]);
        assert!(p.require_plain(Span::dummy()).is_err());
    }
}
