//! Shared package-builder helpers for the binder's integration tests.

use caldera_ir::{
    ClassFlags, ClassType, DefnKind, Function, FunctionFlags, FunctionId, ObjectTypeDefn, Package,
    Type, TypeDefnId, TypeFlags,
};

pub fn sty(id: u32) -> ClassType {
    ClassType {
        class: TypeDefnId::new(id),
        type_args: Vec::new(),
        flags: TypeFlags::empty(),
    }
}

pub fn class(
    id: u32,
    kind: DefnKind,
    supertypes: Vec<ClassType>,
    methods: Vec<FunctionId>,
    flags: ClassFlags,
) -> ObjectTypeDefn {
    ObjectTypeDefn {
        id: TypeDefnId::new(id),
        kind,
        name: caldera_common::Interner::default().intern(&format!("C{id}")),
        span: caldera_common::Span::dummy(),
        type_parameters: Vec::new(),
        supertypes,
        fields: Vec::new(),
        methods,
        constructors: Vec::new(),
        flags,
        element_type: None,
    }
}

pub fn method(
    id: u32,
    name: &str,
    declaring_class: TypeDefnId,
    flags: FunctionFlags,
    interner: &mut caldera_common::Interner,
) -> Function {
    Function {
        id: FunctionId::new(id),
        name: interner.intern(name),
        span: caldera_common::Span::dummy(),
        declaring_class: Some(declaring_class),
        type_parameters: Vec::new(),
        parameter_types: Vec::new(),
        return_type: Type::class(TypeDefnId::new(0), Vec::new()),
        flags,
        overrides: Vec::new(),
        overridden_by: rustc_hash::FxHashMap::default(),
    }
}

pub fn empty_package(name: &mut caldera_common::Interner, classes: Vec<ObjectTypeDefn>) -> Package {
    Package {
        name: name.intern("test"),
        classes,
        type_parameters: Vec::new(),
        functions: Vec::new(),
        fields: Vec::new(),
        globals: Vec::new(),
        variables: Vec::new(),
        root_class: TypeDefnId::new(0),
        nothing_class: TypeDefnId::new(99),
        std_surface: None,
    }
}
