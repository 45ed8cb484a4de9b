//! The C type model used throughout the translator.
//!
//! Only the types the translator can carry through to Rust are represented:
//! integers at explicit bit widths (with "word" standing for the target's
//! pointer-sized integer), IEEE floats, `void`, and function-returning-T.
//! The conversion rules that make C arithmetic meaningful — integer
//! promotion (C99 6.3.1.1) and the usual arithmetic conversions
//! (C99 6.3.1.8) — live here as well, so the expression lowerer can stay a
//! plain tree walk.

/// Signedness of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Width of an integer type. `Word` is the target's pointer-sized integer
/// (C `long` maps here, independent of host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    Word,
}

/// Width of a floating-point type. The derived order makes the wider float
/// compare greater, which `usual_arithmetic` relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FloatWidth {
    W32,
    W64,
}

/// Represents C types in the translator.
///
/// Every non-void value the expression lowerer produces carries an `Int` or
/// `Float`; `Void` appears only for statement-like expressions and the
/// `void` keyword, and `Function` only as the type of a name being called.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CType {
    Int(Signedness, IntWidth),
    Float(FloatWidth),
    Void,
    /// Function returning the carried type. Parameter types are not tracked;
    /// call sites trust the call syntax.
    Function(Box<CType>),
}

impl CType {
    /// Shorthand for C `int`, the default type of the specifier fold and of
    /// integer literals.
    pub fn int() -> CType {
        CType::Int(Signedness::Signed, IntWidth::W32)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, CType::Int(_, _))
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, CType::Float(_))
    }

    pub fn is_arithmetic(&self) -> bool {
        self.is_integer() || self.is_floating()
    }

    /// Apply C integer promotion (C99 6.3.1.1p2): any integer narrower than
    /// 32 bits becomes `int`. Word-width integers and all non-integers are
    /// unchanged.
    pub fn promoted(&self) -> CType {
        match self {
            CType::Int(_, IntWidth::W8 | IntWidth::W16) => CType::int(),
            other => other.clone(),
        }
    }

    /// Apply the usual arithmetic conversions (C99 6.3.1.8) to a pair of
    /// arithmetic operand types, yielding the common type.
    ///
    /// Callers must pass arithmetic types; `Void`/`Function` operands are
    /// rejected before this point. The rule order is the contract:
    /// floats dominate (wider float wins), then both sides are promoted,
    /// then same-signedness picks the wider width, and a signedness mismatch
    /// picks the wider operand with ties going to the unsigned one.
    pub fn usual_arithmetic(a: &CType, b: &CType) -> CType {
        match (a, b) {
            (CType::Float(fa), CType::Float(fb)) => CType::Float(*fa.max(fb)),
            (CType::Float(_), _) => a.clone(),
            (_, CType::Float(_)) => b.clone(),
            _ => {
                let pa = a.promoted();
                let pb = b.promoted();
                if pa == pb {
                    return pa;
                }
                match (pa, pb) {
                    (CType::Int(sa, wa), CType::Int(sb, wb)) => {
                        if sa == sb {
                            CType::Int(sa, wa.max(wb))
                        } else if wa == wb {
                            CType::Int(Signedness::Unsigned, wa)
                        } else if wa > wb {
                            CType::Int(sa, wa)
                        } else {
                            CType::Int(sb, wb)
                        }
                    }
                    (pa, _) => pa,
                }
            }
        }
    }

    /// The Rust spelling of this type, or `None` for function types, which
    /// have no emitted name.
    pub fn rust_name(&self) -> Option<&'static str> {
        match self {
            CType::Int(Signedness::Signed, IntWidth::W8) => Some("i8"),
            CType::Int(Signedness::Signed, IntWidth::W16) => Some("i16"),
            CType::Int(Signedness::Signed, IntWidth::W32) => Some("i32"),
            CType::Int(Signedness::Signed, IntWidth::Word) => Some("isize"),
            CType::Int(Signedness::Unsigned, IntWidth::W8) => Some("u8"),
            CType::Int(Signedness::Unsigned, IntWidth::W16) => Some("u16"),
            CType::Int(Signedness::Unsigned, IntWidth::W32) => Some("u32"),
            CType::Int(Signedness::Unsigned, IntWidth::Word) => Some("usize"),
            CType::Float(FloatWidth::W32) => Some("f32"),
            CType::Float(FloatWidth::W64) => Some("f64"),
            CType::Void => Some("()"),
            CType::Function(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Signedness::{Signed, Unsigned};

    #[test]
    fn test_promotion_widens_narrow_ints_to_int() {
        for s in [Signed, Unsigned] {
            assert_eq!(CType::Int(s, IntWidth::W8).promoted(), CType::int());
            assert_eq!(CType::Int(s, IntWidth::W16).promoted(), CType::int());
        }
        // 32-bit and word-width integers are not promoted
        assert_eq!(CType::Int(Unsigned, IntWidth::W32).promoted(), CType::Int(Unsigned, IntWidth::W32));
        assert_eq!(CType::Int(Signed, IntWidth::Word).promoted(), CType::Int(Signed, IntWidth::Word));
        assert_eq!(CType::Float(FloatWidth::W32).promoted(), CType::Float(FloatWidth::W32));
    }

    #[test]
    fn test_promotion_idempotent() {
        let all = [
            CType::Int(Signed, IntWidth::W8),
            CType::Int(Unsigned, IntWidth::W8),
            CType::Int(Signed, IntWidth::W16),
            CType::Int(Unsigned, IntWidth::W16),
            CType::Int(Signed, IntWidth::W32),
            CType::Int(Unsigned, IntWidth::W32),
            CType::Int(Signed, IntWidth::Word),
            CType::Int(Unsigned, IntWidth::Word),
            CType::Float(FloatWidth::W32),
            CType::Float(FloatWidth::W64),
        ];
        for t in &all {
            assert_eq!(t.promoted().promoted(), t.promoted());
        }
    }

    #[test]
    fn test_usual_floats_dominate() {
        let f32t = CType::Float(FloatWidth::W32);
        let f64t = CType::Float(FloatWidth::W64);
        assert_eq!(CType::usual_arithmetic(&f32t, &f64t), f64t);
        assert_eq!(CType::usual_arithmetic(&f64t, &f32t), f64t);
        assert_eq!(CType::usual_arithmetic(&CType::int(), &f32t), f32t);
        assert_eq!(CType::usual_arithmetic(&f64t, &CType::Int(Unsigned, IntWidth::Word)), f64t);
    }

    #[test]
    fn test_usual_mixed_signedness() {
        // int + unsigned int -> unsigned int (equal width, unsigned wins)
        assert_eq!(
            CType::usual_arithmetic(&CType::int(), &CType::Int(Unsigned, IntWidth::W32)),
            CType::Int(Unsigned, IntWidth::W32)
        );
        // int + unsigned word -> unsigned word (wider operand wins)
        assert_eq!(
            CType::usual_arithmetic(&CType::int(), &CType::Int(Unsigned, IntWidth::Word)),
            CType::Int(Unsigned, IntWidth::Word)
        );
        // signed word + unsigned int -> signed word (wider operand wins)
        assert_eq!(
            CType::usual_arithmetic(&CType::Int(Signed, IntWidth::Word), &CType::Int(Unsigned, IntWidth::W32)),
            CType::Int(Signed, IntWidth::Word)
        );
    }

    #[test]
    fn test_usual_narrow_operands_promote_first() {
        // char + char -> int
        let c = CType::Int(Signed, IntWidth::W8);
        assert_eq!(CType::usual_arithmetic(&c, &c), CType::int());
        // unsigned short + int -> int (both promote to int)
        let us = CType::Int(Unsigned, IntWidth::W16);
        assert_eq!(CType::usual_arithmetic(&us, &CType::int()), CType::int());
    }

    #[test]
    fn test_usual_commutative() {
        let all = [
            CType::Int(Signed, IntWidth::W8),
            CType::Int(Unsigned, IntWidth::W8),
            CType::Int(Signed, IntWidth::W16),
            CType::Int(Unsigned, IntWidth::W16),
            CType::Int(Signed, IntWidth::W32),
            CType::Int(Unsigned, IntWidth::W32),
            CType::Int(Signed, IntWidth::Word),
            CType::Int(Unsigned, IntWidth::Word),
            CType::Float(FloatWidth::W32),
            CType::Float(FloatWidth::W64),
        ];
        for a in &all {
            for b in &all {
                assert_eq!(
                    CType::usual_arithmetic(a, b),
                    CType::usual_arithmetic(b, a),
                    "usual({:?}, {:?}) not commutative",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_rust_names_are_distinct() {
        // Emitting and re-reading a type name must round-trip, so every
        // admitted type needs a distinct spelling.
        let all = [
            CType::Int(Signed, IntWidth::W8),
            CType::Int(Unsigned, IntWidth::W8),
            CType::Int(Signed, IntWidth::W16),
            CType::Int(Unsigned, IntWidth::W16),
            CType::Int(Signed, IntWidth::W32),
            CType::Int(Unsigned, IntWidth::W32),
            CType::Int(Signed, IntWidth::Word),
            CType::Int(Unsigned, IntWidth::Word),
            CType::Float(FloatWidth::W32),
            CType::Float(FloatWidth::W64),
            CType::Void,
        ];
        let mut names: Vec<&str> = all.iter().map(|t| t.rust_name().unwrap()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_rust_name_spellings() {
        assert_eq!(CType::Int(Signed, IntWidth::W8).rust_name(), Some("i8"));
        assert_eq!(CType::Int(Unsigned, IntWidth::Word).rust_name(), Some("usize"));
        assert_eq!(CType::Int(Signed, IntWidth::Word).rust_name(), Some("isize"));
        assert_eq!(CType::Float(FloatWidth::W64).rust_name(), Some("f64"));
        assert_eq!(CType::Void.rust_name(), Some("()"));
        assert_eq!(CType::Function(Box::new(CType::int())).rust_name(), None);
    }
}
