//! Shared package fixtures for the lattice's integration tests.

use caldera_ir::{
    ClassFlags, ClassType, DefnKind, ObjectTypeDefn, Package, Type, TypeDefnId, TypeFlags,
    TypeParameter, TypeParameterFlags, TypeParameterId, Variance,
};

pub fn class_type(id: u32, type_args: Vec<Type>) -> ClassType {
    ClassType {
        class: TypeDefnId::new(id),
        type_args,
        flags: TypeFlags::empty(),
    }
}

fn root_sty() -> ClassType {
    class_type(0, vec![])
}

fn object_class(
    id: u32,
    type_parameters: Vec<TypeParameterId>,
    supertypes: Vec<ClassType>,
) -> ObjectTypeDefn {
    ObjectTypeDefn {
        id: TypeDefnId::new(id),
        kind: DefnKind::Class,
        name: caldera_common::Interner::default().intern("C"),
        span: caldera_common::Span::dummy(),
        type_parameters,
        supertypes,
        fields: Vec::new(),
        methods: Vec::new(),
        constructors: Vec::new(),
        flags: ClassFlags::empty(),
        element_type: None,
    }
}

fn covariant_type_parameter(id: u32, upper_bound: Type) -> TypeParameter {
    TypeParameter {
        id: TypeParameterId::new(id),
        name: caldera_common::Interner::default().intern("T"),
        span: caldera_common::Span::dummy(),
        upper_bound,
        lower_bound: Type::NoType,
        variance: Variance::Covariant,
        flags: TypeParameterFlags::empty(),
    }
}

/// `class Root; class Nothing <: Root; class A[+T] <: Root;`
/// `class B <: A[B], Root; class C <: A[C], Root`.
///
/// Ids: 0 = Root, 1 = Nothing, 2 = A, 3 = B, 4 = C; `A`'s own type
/// parameter is id 0.
pub fn f_bounded_package() -> Package {
    Package {
        name: caldera_common::Interner::default().intern("test"),
        classes: vec![
            object_class(0, vec![], vec![]),
            object_class(1, vec![], vec![root_sty()]),
            object_class(2, vec![TypeParameterId::new(0)], vec![root_sty()]),
            object_class(
                3,
                vec![],
                vec![class_type(2, vec![Type::class(3, vec![])]), root_sty()],
            ),
            object_class(
                4,
                vec![],
                vec![class_type(2, vec![Type::class(4, vec![])]), root_sty()],
            ),
        ],
        type_parameters: vec![covariant_type_parameter(0, Type::class(0, vec![]))],
        functions: Vec::new(),
        fields: Vec::new(),
        globals: Vec::new(),
        variables: Vec::new(),
        root_class: TypeDefnId::new(0),
        nothing_class: TypeDefnId::new(1),
        std_surface: None,
    }
}

/// `class Root; class Nothing <: Root; class A <: Root; class B <: A, Root`
/// — a plain, acyclic 3-level hierarchy for tests that must avoid
/// F-bounded recursion (e.g. transitivity generators).
pub fn linear_package() -> Package {
    Package {
        name: caldera_common::Interner::default().intern("test"),
        classes: vec![
            object_class(0, vec![], vec![]),
            object_class(1, vec![], vec![root_sty()]),
            object_class(2, vec![], vec![root_sty()]),
            object_class(3, vec![], vec![class_type(2, vec![]), root_sty()]),
        ],
        type_parameters: Vec::new(),
        functions: Vec::new(),
        fields: Vec::new(),
        globals: Vec::new(),
        variables: Vec::new(),
        root_class: TypeDefnId::new(0),
        nothing_class: TypeDefnId::new(1),
        std_surface: None,
    }
}
