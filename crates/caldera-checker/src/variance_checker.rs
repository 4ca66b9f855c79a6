//! §4.3 "Variance checks on member signatures": in a class with a covariant
//! type parameter `+T`, `T` may appear in a constructor parameter, a method
//! return, or a final field type, but not in a method parameter or a mutable
//! field type. Contravariant `-T` mirrors these (method parameter and
//! mutable field allowed, method return and final field forbidden).
//! Constructor parameters are exempt for both variances — a constructor is
//! never called virtually, so the variance-soundness argument restricting
//! ordinary method parameters doesn't apply to it.
//!
//! A standalone pass over the whole package, the same shape as
//! `visibility_checker::check_public_surface_visibility`: member signatures
//! don't change after inheritance analysis, so there's no need to run this
//! per-expression during the AST walk.

use crate::error::TypeError;
use caldera_ir::{ClassFlags, ObjectTypeDefn, Package, Type, TypeParameterId, Variance};

fn references(ty: &Type, tp: TypeParameterId) -> bool {
    ty.find_variables().contains(&tp)
}

/// `covariant == true` forbids `tp` in a directly-declared method's
/// parameter types; `covariant == false` (contravariant) forbids it in the
/// return type instead.
fn check_methods(
    pkg: &Package,
    defn: &ObjectTypeDefn,
    tp: TypeParameterId,
    covariant: bool,
    errors: &mut Vec<TypeError>,
) {
    for &fn_id in &defn.methods {
        let f = pkg.function(fn_id);
        if f.declaring_class != Some(defn.id) {
            continue;
        }
        let violates = if covariant {
            f.parameter_types.iter().any(|p| references(p, tp))
        } else {
            references(&f.return_type, tp)
        };
        if violates {
            errors.push(TypeError::VarianceViolation {
                span: f.span,
                type_parameter: tp,
            });
        }
    }
}

/// `covariant == true` forbids `tp` in a mutable field's type; `covariant ==
/// false` forbids it in an immutable (final) field's type.
fn check_fields(
    pkg: &Package,
    defn: &ObjectTypeDefn,
    tp: TypeParameterId,
    covariant: bool,
    errors: &mut Vec<TypeError>,
) {
    for &field_id in &defn.fields {
        let f = pkg.field(field_id);
        if f.declaring_class != defn.id {
            continue;
        }
        let forbidden_position = if covariant { f.is_mutable } else { !f.is_mutable };
        if forbidden_position && references(&f.ty, tp) {
            errors.push(TypeError::VarianceViolation {
                span: defn.span,
                type_parameter: tp,
            });
        }
    }
}

/// "Array-element types require variance consistency with mutability: a
/// mutable array-element type forces invariance of its element parameter."
fn check_array_element_variance(pkg: &Package, defn: &ObjectTypeDefn, errors: &mut Vec<TypeError>) {
    if !defn.flags.contains(ClassFlags::ARRAY) || defn.flags.contains(ClassFlags::ARRAY_FINAL) {
        return;
    }
    let Some(element_type) = &defn.element_type else {
        return;
    };
    for tp in element_type.find_variables() {
        if pkg.type_parameter(tp).variance != Variance::Invariant {
            errors.push(TypeError::ArrayElementVarianceViolation { span: defn.span });
        }
    }
}

/// Runs every member-signature and array-element variance check over `pkg`.
pub fn check_member_variance(pkg: &Package) -> Vec<TypeError> {
    let mut errors = Vec::new();
    for defn in &pkg.classes {
        for &tp_id in &defn.type_parameters {
            match pkg.type_parameter(tp_id).variance {
                Variance::Covariant => {
                    check_methods(pkg, defn, tp_id, true, &mut errors);
                    check_fields(pkg, defn, tp_id, true, &mut errors);
                }
                Variance::Contravariant => {
                    check_methods(pkg, defn, tp_id, false, &mut errors);
                    check_fields(pkg, defn, tp_id, false, &mut errors);
                }
                Variance::Invariant | Variance::Bivariant => {}
            }
        }
        check_array_element_variance(pkg, defn, &mut errors);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldera_common::{Interner, Span};
    use caldera_ir::{
        DefnKind, Field, FieldId, Function, FunctionFlags, FunctionId, TypeDefnId, TypeFlags,
        TypeParameter, TypeParameterFlags, TypeParameterId,
    };

    fn root_sty() -> caldera_ir::ClassType {
        caldera_ir::ClassType {
            class: TypeDefnId::new(0),
            type_args: Vec::new(),
            flags: TypeFlags::empty(),
        }
    }

    fn covariant_tp(id: u32) -> TypeParameter {
        TypeParameter {
            id: TypeParameterId::new(id),
            name: Interner::default().intern("T"),
            span: Span::dummy(),
            upper_bound: Type::class(TypeDefnId::new(0), Vec::new()),
            lower_bound: Type::NoType,
            variance: Variance::Covariant,
            flags: TypeParameterFlags::empty(),
        }
    }

    /// `class Box[+T] { def set(x: T): Unit }` — a covariant parameter in a
    /// method parameter position is rejected.
    #[test]
    fn covariant_parameter_in_method_is_rejected() {
        let mut interner = Interner::default();
        let set_method = Function {
            id: FunctionId::new(0),
            name: interner.intern("set"),
            span: Span::dummy(),
            declaring_class: Some(TypeDefnId::new(1)),
            type_parameters: Vec::new(),
            parameter_types: vec![Type::variable(TypeParameterId::new(0))],
            return_type: Type::Primitive(caldera_ir::PrimitiveKind::Unit),
            flags: FunctionFlags::METHOD,
            overrides: Vec::new(),
            overridden_by: rustc_hash::FxHashMap::default(),
        };
        let box_class = ObjectTypeDefn {
            id: TypeDefnId::new(1),
            kind: DefnKind::Class,
            name: interner.intern("Box"),
            span: Span::dummy(),
            type_parameters: vec![TypeParameterId::new(0)],
            supertypes: vec![root_sty()],
            fields: Vec::new(),
            methods: vec![FunctionId::new(0)],
            constructors: Vec::new(),
            flags: ClassFlags::empty(),
            element_type: None,
        };
        let pkg = Package {
            name: interner.intern("test"),
            classes: vec![
                ObjectTypeDefn {
                    id: TypeDefnId::new(0),
                    kind: DefnKind::Class,
                    name: interner.intern("Root"),
                    span: Span::dummy(),
                    type_parameters: Vec::new(),
                    supertypes: Vec::new(),
                    fields: Vec::new(),
                    methods: Vec::new(),
                    constructors: Vec::new(),
                    flags: ClassFlags::empty(),
                    element_type: None,
                },
                box_class,
            ],
            type_parameters: vec![covariant_tp(0)],
            functions: vec![set_method],
            fields: Vec::new(),
            globals: Vec::new(),
            variables: Vec::new(),
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(0),
            std_surface: None,
        };

        let errors = check_member_variance(&pkg);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], TypeError::VarianceViolation { .. }));
    }

    /// `class Box[+T](x: T) { val x: T }` (a final field) — allowed.
    #[test]
    fn covariant_in_final_field_is_allowed() {
        let mut interner = Interner::default();
        let field = Field {
            id: FieldId::new(0),
            name: interner.intern("x"),
            declaring_class: TypeDefnId::new(1),
            ty: Type::variable(TypeParameterId::new(0)),
            is_mutable: false,
            flags: FunctionFlags::empty(),
        };
        let box_class = ObjectTypeDefn {
            id: TypeDefnId::new(1),
            kind: DefnKind::Class,
            name: interner.intern("Box"),
            span: Span::dummy(),
            type_parameters: vec![TypeParameterId::new(0)],
            supertypes: vec![root_sty()],
            fields: vec![FieldId::new(0)],
            methods: Vec::new(),
            constructors: Vec::new(),
            flags: ClassFlags::empty(),
            element_type: None,
        };
        let pkg = Package {
            name: interner.intern("test"),
            classes: vec![
                ObjectTypeDefn {
                    id: TypeDefnId::new(0),
                    kind: DefnKind::Class,
                    name: interner.intern("Root"),
                    span: Span::dummy(),
                    type_parameters: Vec::new(),
                    supertypes: Vec::new(),
                    fields: Vec::new(),
                    methods: Vec::new(),
                    constructors: Vec::new(),
                    flags: ClassFlags::empty(),
                    element_type: None,
                },
                box_class,
            ],
            type_parameters: vec![covariant_tp(0)],
            functions: Vec::new(),
            fields: vec![field],
            globals: Vec::new(),
            variables: Vec::new(),
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(0),
            std_surface: None,
        };

        assert!(check_member_variance(&pkg).is_empty());
    }
}
