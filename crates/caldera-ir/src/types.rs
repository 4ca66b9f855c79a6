//! The closed type family. Types are immutable value objects: `with_flag`/
//! `without_flag` return a modified copy rather than mutating in place.
//!
//! This module only contains the operations that are purely structural
//! (substitution, variable collection, existential closing, alpha-aware
//! equivalence). Operations that need the definition table — `lub`, `glb`,
//! `substitute_for_base`, `is_subtype_of` — live in `caldera-solver`, which
//! re-exports everything here so callers see one `Type` API.

use crate::flags::TypeFlags;
use crate::ids::{TypeDefnId, TypeParameterId};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn width_bits(self) -> u32 {
        match self {
            PrimitiveKind::Unit | PrimitiveKind::Bool | PrimitiveKind::I8 => 8,
            PrimitiveKind::I16 => 16,
            PrimitiveKind::I32 | PrimitiveKind::F32 => 32,
            PrimitiveKind::I64 | PrimitiveKind::F64 => 64,
        }
    }

    /// Whether `value` (already parsed as the widest integer type) fits in
    /// this primitive's width. Only meaningful for the integer kinds.
    #[must_use]
    pub fn fits_i64(self, value: i64) -> bool {
        match self {
            PrimitiveKind::I8 => i8::try_from(value).is_ok(),
            PrimitiveKind::I16 => i16::try_from(value).is_ok(),
            PrimitiveKind::I32 => i32::try_from(value).is_ok(),
            PrimitiveKind::I64 => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassType {
    pub class: TypeDefnId,
    pub type_args: Vec<Type>,
    pub flags: TypeFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableType {
    pub type_parameter: TypeParameterId,
    pub flags: TypeFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistentialType {
    pub vars: Vec<TypeParameterId>,
    pub inner: Box<Type>,
}

/// The closed type family: bottom (`NoType`), top (`AnyType`), primitives,
/// nominal class instantiations, type-parameter references, and
/// existentials closing over one or more type parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Bottom of the lattice. Inhabits no values; the type of `throw`/`return`.
    NoType,
    /// Top of the lattice. Not a legal type for fields/locals/returns; used
    /// only as a sentinel meaning "could not combine".
    AnyType,
    Primitive(PrimitiveKind),
    Class(ClassType),
    Variable(VariableType),
    Existential(ExistentialType),
}

impl Type {
    #[must_use]
    pub fn class(class: TypeDefnId, type_args: Vec<Type>) -> Self {
        Type::Class(ClassType {
            class,
            type_args,
            flags: TypeFlags::empty(),
        })
    }

    #[must_use]
    pub fn variable(type_parameter: TypeParameterId) -> Self {
        Type::Variable(VariableType {
            type_parameter,
            flags: TypeFlags::empty(),
        })
    }

    /// Closes `inner` over `vars`, discarding variables `inner` doesn't
    /// reference and deduplicating the rest by first occurrence. If no
    /// variable survives, returns `inner` unwrapped rather than an empty
    /// existential — `forsome [] String == String`.
    #[must_use]
    pub fn close_existential(vars: &[TypeParameterId], inner: Type) -> Type {
        let used = inner.find_variables();
        let mut seen = FxHashSet::default();
        let kept: Vec<TypeParameterId> = vars
            .iter()
            .copied()
            .filter(|v| used.contains(v) && seen.insert(*v))
            .collect();
        if kept.is_empty() {
            inner
        } else {
            Type::Existential(ExistentialType {
                vars: kept,
                inner: Box::new(inner),
            })
        }
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Variable(_) | Type::Existential(_))
    }

    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// Only object types may be nullable; existential nullability is
    /// propagated from the inner type (`ExistentialType.flags == inner.flags`).
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Class(c) => c.flags.contains(TypeFlags::NULLABLE),
            Type::Variable(v) => v.flags.contains(TypeFlags::NULLABLE),
            Type::Existential(e) => e.inner.is_nullable(),
            Type::NoType | Type::AnyType | Type::Primitive(_) => false,
        }
    }

    #[must_use]
    pub fn with_flag(&self, flag: TypeFlags) -> Type {
        match self {
            Type::Class(c) => Type::Class(ClassType {
                flags: c.flags | flag,
                ..c.clone()
            }),
            Type::Variable(v) => Type::Variable(VariableType {
                flags: v.flags | flag,
                ..v.clone()
            }),
            Type::Existential(e) => Type::Existential(ExistentialType {
                vars: e.vars.clone(),
                inner: Box::new(e.inner.with_flag(flag)),
            }),
            other => other.clone(),
        }
    }

    #[must_use]
    pub fn without_flag(&self, flag: TypeFlags) -> Type {
        match self {
            Type::Class(c) => Type::Class(ClassType {
                flags: c.flags & !flag,
                ..c.clone()
            }),
            Type::Variable(v) => Type::Variable(VariableType {
                flags: v.flags & !flag,
                ..v.clone()
            }),
            Type::Existential(e) => Type::Existential(ExistentialType {
                vars: e.vars.clone(),
                inner: Box::new(e.inner.without_flag(flag)),
            }),
            other => other.clone(),
        }
    }

    /// Replaces each `VariableType(p)` with `replacements[i]` for
    /// `p == params[i]`. Recurses into class type arguments and the
    /// existential's inner type, but never into its bound variables.
    #[must_use]
    pub fn substitute(&self, params: &[TypeParameterId], replacements: &[Type]) -> Type {
        debug_assert_eq!(params.len(), replacements.len());
        match self {
            Type::Variable(v) => {
                if let Some(pos) = params.iter().position(|p| *p == v.type_parameter) {
                    let replacement = replacements[pos].clone();
                    if v.flags.contains(TypeFlags::NULLABLE) {
                        replacement.with_flag(TypeFlags::NULLABLE)
                    } else {
                        replacement
                    }
                } else {
                    self.clone()
                }
            }
            Type::Class(c) => {
                let new_args: Vec<Type> = c
                    .type_args
                    .iter()
                    .map(|a| a.substitute(params, replacements))
                    .collect();
                if new_args == c.type_args {
                    self.clone()
                } else {
                    Type::Class(ClassType {
                        class: c.class,
                        type_args: new_args,
                        flags: c.flags,
                    })
                }
            }
            Type::Existential(e) => {
                let new_inner = e.inner.substitute(params, replacements);
                if new_inner == *e.inner {
                    self.clone()
                } else {
                    Type::Existential(ExistentialType {
                        vars: e.vars.clone(),
                        inner: Box::new(new_inner),
                    })
                }
            }
            Type::NoType | Type::AnyType | Type::Primitive(_) => self.clone(),
        }
    }

    /// The set of type parameters referenced through `VariableType`s inside
    /// this type (existential-bound variables still count: `find_variables`
    /// is what `close` uses to decide which ones to keep).
    #[must_use]
    pub fn find_variables(&self) -> FxHashSet<TypeParameterId> {
        let mut out = FxHashSet::default();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut FxHashSet<TypeParameterId>) {
        match self {
            Type::Variable(v) => {
                out.insert(v.type_parameter);
            }
            Type::Class(c) => {
                for arg in &c.type_args {
                    arg.collect_variables(out);
                }
            }
            Type::Existential(e) => e.inner.collect_variables(out),
            Type::NoType | Type::AnyType | Type::Primitive(_) => {}
        }
    }

    /// Structural equivalence modulo alpha-renaming of existential
    /// variables. Reflexive, symmetric, transitive (§8 property 1-ish, but
    /// this is the building block `is_subtype_of` is defined from).
    #[must_use]
    pub fn is_equivalent(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Existential(a), Type::Existential(b)) => {
                if a.vars.len() != b.vars.len() {
                    return false;
                }
                let renamed = rename_vars(&b.inner, &b.vars, &a.vars);
                a.inner.is_equivalent(&renamed)
            }
            _ => self == other,
        }
    }
}

/// Renames every `VariableType` bound to `from[i]` into `to[i]`, used to
/// align two existentials' bound variables before comparing their inner
/// types structurally.
fn rename_vars(ty: &Type, from: &[TypeParameterId], to: &[TypeParameterId]) -> Type {
    match ty {
        Type::Variable(v) => {
            if let Some(pos) = from.iter().position(|p| *p == v.type_parameter) {
                Type::Variable(VariableType {
                    type_parameter: to[pos],
                    flags: v.flags,
                })
            } else {
                ty.clone()
            }
        }
        Type::Class(c) => Type::Class(ClassType {
            class: c.class,
            type_args: c
                .type_args
                .iter()
                .map(|a| rename_vars(a, from, to))
                .collect(),
            flags: c.flags,
        }),
        Type::Existential(e) => Type::Existential(ExistentialType {
            vars: e.vars.clone(),
            inner: Box::new(rename_vars(&e.inner, from, to)),
        }),
        Type::NoType | Type::AnyType | Type::Primitive(_) => ty.clone(),
    }
}
