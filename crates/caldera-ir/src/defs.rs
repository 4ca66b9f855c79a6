//! The read-only definition tables: `Class`/`Trait` (unified as
//! `ObjectTypeDefn`, since both are vertices in the same subtype graph and
//! share the full-supertype-list machinery), `TypeParameter`, `Function`,
//! `Field`, `Global`, and `Variable`.
//!
//! These are produced by an upstream declaration pass (out of scope here)
//! and are mutated exactly twice by the passes in this workspace:
//! `ObjectTypeDefn::supertypes` is replaced with its full transitive list by
//! inheritance analysis, and `Function::overrides`/`overridden_by` are
//! populated by the same pass.

use crate::flags::{ClassFlags, FunctionFlags, TypeParameterFlags, Variance};
use crate::ids::{FieldId, FunctionId, GlobalId, TypeDefnId, TypeParameterId, VariableId};
use crate::types::{ClassType, Type};
use caldera_common::{Atom, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefnKind {
    Class,
    Trait,
}

/// A class or trait. Both are vertices of the same subtype graph: a trait
/// simply can't be the first (class) entry of another definition's
/// `supertypes`, which `caldera-binder` enforces.
#[derive(Debug, Clone)]
pub struct ObjectTypeDefn {
    pub id: TypeDefnId,
    pub kind: DefnKind,
    pub name: Atom,
    /// Declaration-site location, for diagnostics raised against this
    /// definition (`InheritanceError`, visibility/override `TypeError`s).
    pub span: Span,
    pub type_parameters: Vec<TypeParameterId>,
    /// Direct supertypes until inheritance analysis runs; the full
    /// transitive ancestry list (depth-first pre-order, each ancestor once)
    /// afterwards.
    pub supertypes: Vec<ClassType>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<FunctionId>,
    pub constructors: Vec<FunctionId>,
    pub flags: ClassFlags,
    /// Present iff `flags` contains `ARRAY`; the element type of an array
    /// class, from its `arrayelements` declaration.
    pub element_type: Option<Type>,
}

impl ObjectTypeDefn {
    #[must_use]
    pub fn is_trait(&self) -> bool {
        self.kind == DefnKind::Trait
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
    }
}

#[derive(Debug, Clone)]
pub struct TypeParameter {
    pub id: TypeParameterId,
    pub name: Atom,
    pub span: Span,
    /// Must be non-nullable, non-existential, non-primitive.
    pub upper_bound: Type,
    /// Must be non-nullable, non-existential, non-primitive; `lower <: upper`.
    pub lower_bound: Type,
    pub variance: Variance,
    pub flags: TypeParameterFlags,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub id: FunctionId,
    pub name: Atom,
    pub span: Span,
    pub declaring_class: Option<TypeDefnId>,
    pub type_parameters: Vec<TypeParameterId>,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
    pub flags: FunctionFlags,
    /// Populated by inheritance analysis: the base methods this one overrides.
    pub overrides: Vec<FunctionId>,
    /// Populated by inheritance analysis: for each deriving class that
    /// overrides this method, the overriding `FunctionId`.
    pub overridden_by: rustc_hash::FxHashMap<TypeDefnId, FunctionId>,
}

impl Function {
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.flags.contains(FunctionFlags::METHOD)
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(FunctionFlags::STATIC)
    }

    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.flags.contains(FunctionFlags::CONSTRUCTOR)
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub name: Atom,
    pub declaring_class: TypeDefnId,
    pub ty: Type,
    pub is_mutable: bool,
    pub flags: FunctionFlags,
}

#[derive(Debug, Clone)]
pub struct Global {
    pub id: GlobalId,
    pub name: Atom,
    pub ty: Type,
    pub is_mutable: bool,
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VariableId,
    pub name: Atom,
    pub ty: Type,
    pub is_mutable: bool,
}
