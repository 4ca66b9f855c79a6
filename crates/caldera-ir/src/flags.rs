//! Attribute flags shared by classes, traits, type parameters, and functions,
//! plus the three-value (+ sentinel) variance lattice.

use bitflags::bitflags;

bitflags! {
    /// Flags attached to a `Class`/`Trait` definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassFlags: u16 {
        const FINAL        = 1 << 0;
        const ABSTRACT     = 1 << 1;
        const ARRAY        = 1 << 2;
        const ARRAY_FINAL  = 1 << 3;
        const PUBLIC       = 1 << 4;
        const PROTECTED    = 1 << 5;
        const PRIVATE      = 1 << 6;
    }
}

bitflags! {
    /// Flags attached to a `Function` definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FunctionFlags: u16 {
        const METHOD      = 1 << 0;
        const STATIC      = 1 << 1;
        const CONSTRUCTOR = 1 << 2;
        const OVERRIDE    = 1 << 3;
        const ABSTRACT    = 1 << 4;
        const FINAL       = 1 << 5;
        const EXTERN      = 1 << 6;
        const PUBLIC      = 1 << 7;
        const PROTECTED   = 1 << 8;
        const PRIVATE     = 1 << 9;
    }
}

bitflags! {
    /// Attribute flags on a `TypeParameter` (separate from its variance).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeParameterFlags: u8 {
        const STATIC = 1 << 0;
        const EXTERN = 1 << 1;
    }
}

bitflags! {
    /// The single flag a `Type` value can carry. Only object types
    /// (`ClassType`, `VariableType`, `ExistentialType`) may set it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        const NULLABLE = 1 << 0;
    }
}

/// Declaration-site variance of a type parameter, plus the `Bivariant`
/// sentinel used only as the seed of variance composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    Invariant,
    Covariant,
    Contravariant,
    /// Seed value for `compose`; absorbed by the first real variance it's
    /// composed with. Never appears on a declared type parameter.
    Bivariant,
}

impl Variance {
    /// Composes the effective variance of a nested position: `self` is the
    /// variance of the outer position, `inner` is the variance declared at
    /// the type parameter occupying it. `Invariant` absorbs; flipping
    /// `Covariant` through a `Contravariant` position yields `Contravariant`
    /// and vice versa.
    #[must_use]
    pub fn compose(self, inner: Variance) -> Variance {
        match (self, inner) {
            (Variance::Bivariant, v) => v,
            (_, Variance::Invariant) | (Variance::Invariant, _) => Variance::Invariant,
            (Variance::Covariant, v) => v,
            (Variance::Contravariant, Variance::Covariant) => Variance::Contravariant,
            (Variance::Contravariant, Variance::Contravariant) => Variance::Covariant,
            (v, Variance::Bivariant) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_absorbs() {
        assert_eq!(
            Variance::Covariant.compose(Variance::Invariant),
            Variance::Invariant
        );
        assert_eq!(
            Variance::Invariant.compose(Variance::Covariant),
            Variance::Invariant
        );
    }

    #[test]
    fn bivariant_seed_is_identity() {
        assert_eq!(
            Variance::Bivariant.compose(Variance::Contravariant),
            Variance::Contravariant
        );
    }

    #[test]
    fn contravariant_flips_covariant() {
        assert_eq!(
            Variance::Contravariant.compose(Variance::Covariant),
            Variance::Contravariant
        );
    }

    #[test]
    fn contravariant_through_contravariant_is_covariant() {
        assert_eq!(
            Variance::Contravariant.compose(Variance::Contravariant),
            Variance::Covariant
        );
    }
}
