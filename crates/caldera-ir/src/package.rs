//! `Package`: the arenas backing one compiled package, plus the
//! `PackageLoader` collaborator used for cross-package name resolution.

use crate::defs::{Field, Function, Global, ObjectTypeDefn, TypeParameter, Variable};
use crate::ids::{FieldId, FunctionId, GlobalId, TypeDefnId, TypeParameterId, VariableId};
use caldera_common::Atom;

/// The `Option[X]`/`Tuple_k[X1..Xk]` classes used by destructuring-pattern
/// resolution, present only when `AnalysisOptions::is_using_std` is set.
#[derive(Debug, Clone)]
pub struct StdSurface {
    pub option_class: TypeDefnId,
    /// `tuple_classes[0]` is `Tuple2`, `tuple_classes[1]` is `Tuple3`, etc.
    pub tuple_classes: Vec<TypeDefnId>,
}

impl StdSurface {
    /// `Tuple_k` for `k >= 2`, i.e. the tuple class used for a
    /// `k`-element destructuring pattern.
    #[must_use]
    pub fn tuple_class(&self, k: usize) -> Option<TypeDefnId> {
        k.checked_sub(2).and_then(|i| self.tuple_classes.get(i).copied())
    }
}

/// One compiled package: its definition arenas plus the well-known root and
/// bottom class ids every type in the package is ultimately rooted at.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: Atom,
    pub classes: Vec<ObjectTypeDefn>,
    pub type_parameters: Vec<TypeParameter>,
    pub functions: Vec<Function>,
    pub fields: Vec<Field>,
    pub globals: Vec<Global>,
    pub variables: Vec<Variable>,
    /// The root class every class/trait is ultimately rooted at (its
    /// `supertypes` list, after inheritance analysis, is empty).
    pub root_class: TypeDefnId,
    /// "Nothing": the bottom class. `ClassType(nothing_class, [], Nullable)`
    /// is the canonical null-literal type.
    pub nothing_class: TypeDefnId,
    pub std_surface: Option<StdSurface>,
}

impl Package {
    #[must_use]
    pub fn class(&self, id: TypeDefnId) -> &ObjectTypeDefn {
        &self.classes[id.index()]
    }

    #[must_use]
    pub fn class_mut(&mut self, id: TypeDefnId) -> &mut ObjectTypeDefn {
        &mut self.classes[id.index()]
    }

    #[must_use]
    pub fn type_parameter(&self, id: TypeParameterId) -> &TypeParameter {
        &self.type_parameters[id.index()]
    }

    #[must_use]
    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.index()]
    }

    #[must_use]
    pub fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    #[must_use]
    pub fn global(&self, id: GlobalId) -> &Global {
        &self.globals[id.index()]
    }

    #[must_use]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    /// The class of a definition's first direct (or, post-inheritance-analysis,
    /// first transitive) supertype, i.e. its superclass. `None` for the root
    /// class itself.
    #[must_use]
    pub fn superclass_of(&self, id: TypeDefnId) -> Option<TypeDefnId> {
        self.class(id).supertypes.first().map(|sty| sty.class)
    }

    #[must_use]
    pub fn is_derived_from(&self, derived: TypeDefnId, base: TypeDefnId) -> bool {
        derived == base || self.class(derived).supertypes.iter().any(|s| s.class == base)
    }
}

/// Read-only collaborator exposing other packages' top-level exports for
/// cross-package name resolution. Implemented by the package manager the
/// core doesn't own.
pub trait PackageLoader {
    fn package_names(&self) -> Vec<Atom>;
    fn load_package(&self, name: Atom) -> Option<&Package>;
}

/// A `PackageLoader` with no other packages, for compiling a single
/// self-contained package (most tests, and any program with no imports).
pub struct EmptyPackageLoader;

impl PackageLoader for EmptyPackageLoader {
    fn package_names(&self) -> Vec<Atom> {
        Vec::new()
    }

    fn load_package(&self, _name: Atom) -> Option<&Package> {
        None
    }
}
