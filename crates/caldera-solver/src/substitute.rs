//! The two definition-table-dependent substitutions: rewriting a type in
//! terms of one of its ancestors (`substitute_for_base`) and the inverse,
//! rewriting an inherited member's type into the deriving class's own type
//! arguments (`substitute_for_inheritance`).

use caldera_ir::{ClassType, Package, Type, TypeDefnId, TypeFlags};

/// `selfType` instantiated as an instance of `base`, one of its (post
/// inheritance-analysis) ancestors. Returns `selfType` unchanged if it's
/// already an instance of `base`.
///
/// Applied across existentials by rewriting the inner type and re-closing
/// over the same bound variables.
#[must_use]
pub fn substitute_for_base(pkg: &Package, self_type: &Type, base: TypeDefnId) -> Type {
    match self_type {
        Type::Class(c) => substitute_class_for_base(pkg, c, base),
        Type::Existential(e) => {
            let inner = substitute_for_base(pkg, &e.inner, base);
            Type::close_existential(&e.vars, inner)
        }
        other => other.clone(),
    }
}

fn substitute_class_for_base(pkg: &Package, self_type: &ClassType, base: TypeDefnId) -> Type {
    if self_type.class == base {
        return Type::Class(self_type.clone());
    }
    let defn = pkg.class(self_type.class);
    let mut matches = defn.supertypes.iter().filter(|sty| sty.class == base);
    let sty = matches
        .next()
        .expect("substitute_for_base: base is not an ancestor of self_type's class");
    debug_assert!(
        matches.next().is_none(),
        "substitute_for_base: base appears more than once in the full supertype list"
    );
    let result = Type::Class(sty.clone()).substitute(&defn.type_parameters, &self_type.type_args);
    if self_type.flags.contains(TypeFlags::NULLABLE) {
        result.with_flag(TypeFlags::NULLABLE)
    } else {
        result.without_flag(TypeFlags::NULLABLE)
    }
}

/// Rewrites `ty` — the declared type of a member inherited from `base` —
/// into `deriving`'s own type arguments. The inverse direction of
/// `substitute_for_base`, used when a binding is copied from a base scope
/// into a deriving class's scope.
#[must_use]
pub fn substitute_for_inheritance(
    pkg: &Package,
    ty: &Type,
    deriving: TypeDefnId,
    base: TypeDefnId,
) -> Type {
    debug_assert!(pkg.is_derived_from(deriving, base));
    if deriving == base {
        return ty.clone();
    }
    let deriving_defn = pkg.class(deriving);
    let sty = deriving_defn
        .supertypes
        .iter()
        .find(|sty| sty.class == base)
        .expect("substitute_for_inheritance: base is not a supertype of deriving");
    let base_defn = pkg.class(base);
    ty.substitute(&base_defn.type_parameters, &sty.type_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldera_ir::{ClassFlags, DefnKind, ObjectTypeDefn, TypeParameter, TypeParameterFlags,
        TypeParameterId, Variance};

    fn tp(id: u32, upper: Type) -> TypeParameter {
        TypeParameter {
            id: TypeParameterId::new(id),
            name: caldera_common::Interner::default().intern("T"),
            span: caldera_common::Span::dummy(),
            upper_bound: upper,
            lower_bound: Type::NoType,
            variance: Variance::Covariant,
            flags: TypeParameterFlags::empty(),
        }
    }

    fn class(
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

    /// `class Root; class Box[T] <: Root; class StringBox <: Box[String]`
    /// (`String` modeled as class id 3, no type parameters).
    fn boxed_package() -> Package {
        let root = TypeDefnId::new(0);
        let box_id = TypeDefnId::new(1);
        let string_id = TypeDefnId::new(3);
        let t = TypeParameterId::new(0);
        Package {
            name: caldera_common::Interner::default().intern("test"),
            classes: vec![
                class(0, vec![], vec![]),
                class(
                    1,
                    vec![t],
                    vec![ClassType {
                        class: root,
                        type_args: vec![],
                        flags: TypeFlags::empty(),
                    }],
                ),
                class(
                    2,
                    vec![],
                    vec![
                        ClassType {
                            class: box_id,
                            type_args: vec![Type::class(string_id, vec![])],
                            flags: TypeFlags::empty(),
                        },
                        ClassType {
                            class: root,
                            type_args: vec![],
                            flags: TypeFlags::empty(),
                        },
                    ],
                ),
                class(3, vec![], vec![]),
            ],
            type_parameters: vec![tp(0, Type::class(root, vec![]))],
            functions: Vec::new(),
            fields: Vec::new(),
            globals: Vec::new(),
            variables: Vec::new(),
            root_class: root,
            nothing_class: TypeDefnId::new(99),
            std_surface: None,
        }
    }

    #[test]
    fn substitute_for_base_rewrites_own_type_args_into_base() {
        let pkg = boxed_package();
        let string_box = Type::class(TypeDefnId::new(2), vec![]);
        let as_box = substitute_for_base(&pkg, &string_box, TypeDefnId::new(1));
        assert_eq!(
            as_box,
            Type::class(TypeDefnId::new(1), vec![Type::class(TypeDefnId::new(3), vec![])])
        );
    }

    #[test]
    fn substitute_for_base_is_identity_on_self() {
        let pkg = boxed_package();
        let box_string = Type::class(
            TypeDefnId::new(1),
            vec![Type::class(TypeDefnId::new(3), vec![])],
        );
        let same = substitute_for_base(&pkg, &box_string, TypeDefnId::new(1));
        assert_eq!(same, box_string);
    }
}
