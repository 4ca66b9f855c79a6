//! `lub`/`glb` and the subtyping relation derived from them.
//!
//! Both functions take a visited-pair stack so recursion through an
//! F-bounded cycle (`class B <: A[B]; class C <: A[C]`) terminates: on
//! re-entry with a pair already on the stack, object pairs fall back to a
//! safe bound (the root class for `lub`, the bottom class for `glb`)
//! instead of trying to construct the true (infinite) fixed point.

use crate::common_base::{find_common_base_class, find_common_upper_bound};
use crate::substitute::substitute_for_base;
use caldera_ir::{ClassType, Package, Type, TypeFlags, TypeParameterId, Variance, VariableType};

type Stack = Vec<(Type, Type)>;

fn on_stack(stack: &Stack, a: &Type, b: &Type) -> bool {
    stack.iter().any(|(l, r)| l == a && r == b)
}

fn set_nullable(ty: Type, nullable: bool) -> Type {
    if nullable {
        ty.with_flag(TypeFlags::NULLABLE)
    } else {
        ty.without_flag(TypeFlags::NULLABLE)
    }
}

/// Peels a `VariableType` down to the `ClassType` its upper-bound chain
/// eventually resolves to. Only ever called once existentials have already
/// been stripped from `ty`, so the chain terminates in a `ClassType`.
fn peel_to_class(pkg: &Package, mut ty: Type) -> ClassType {
    loop {
        match ty {
            Type::Class(c) => return c,
            Type::Variable(v) => ty = pkg.type_parameter(v.type_parameter).upper_bound.clone(),
            _ => unreachable!("peel_to_class called on a non-object type"),
        }
    }
}

/// Least upper bound of `a` and `b` on the subtype lattice. Returns
/// `Type::AnyType` when no combination is possible — never a legal type
/// for a field, local, or return, only a sentinel meaning "could not
/// combine".
#[must_use]
pub fn lub(pkg: &Package, a: &Type, b: &Type) -> Type {
    lub_rec(pkg, a, b, &mut Vec::new())
}

fn lub_rec(pkg: &Package, a: &Type, b: &Type, stack: &mut Stack) -> Type {
    if on_stack(stack, a, b) {
        return if a.is_object() && b.is_object() {
            Type::class(pkg.root_class, Vec::new())
        } else {
            Type::AnyType
        };
    }
    if a.is_equivalent(b) {
        return a.clone();
    }
    if matches!(a, Type::AnyType) {
        return b.clone();
    }
    if matches!(b, Type::AnyType) {
        return a.clone();
    }
    if matches!(a, Type::NoType) {
        return b.clone();
    }
    if matches!(b, Type::NoType) {
        return a.clone();
    }
    if matches!(a, Type::Existential(_)) || matches!(b, Type::Existential(_)) {
        return lub_existential(pkg, a, b, stack);
    }
    if a.is_object() && b.is_object() {
        return lub_object(pkg, a, b, stack);
    }
    Type::AnyType
}

fn lub_existential(pkg: &Package, a: &Type, b: &Type, stack: &mut Stack) -> Type {
    stack.push((a.clone(), b.clone()));
    let (a_vars, a_inner): (&[TypeParameterId], &Type) = match a {
        Type::Existential(e) => (&e.vars, &e.inner),
        _ => (&[], a),
    };
    let (b_vars, b_inner): (&[TypeParameterId], &Type) = match b {
        Type::Existential(e) => (&e.vars, &e.inner),
        _ => (&[], b),
    };
    let inner_lub = lub_rec(pkg, a_inner, b_inner, stack);
    stack.pop();
    let mut vars = a_vars.to_vec();
    vars.extend_from_slice(b_vars);
    Type::close_existential(&vars, inner_lub)
}

fn lub_object(pkg: &Package, a: &Type, b: &Type, stack: &mut Stack) -> Type {
    let nullable = a.is_nullable() || b.is_nullable();

    if let (Type::Variable(va), Type::Variable(vb)) = (a, b) {
        if let Some(shared) = find_common_upper_bound(pkg, va.type_parameter, vb.type_parameter) {
            return set_nullable(
                Type::Variable(VariableType {
                    type_parameter: shared,
                    flags: TypeFlags::empty(),
                }),
                nullable,
            );
        }
    }
    if let Type::Class(c) = a {
        if c.class == pkg.nothing_class {
            return set_nullable(b.clone(), nullable);
        }
    }
    if let Type::Class(c) = b {
        if c.class == pkg.nothing_class {
            return set_nullable(a.clone(), nullable);
        }
    }

    let left0 = peel_to_class(pkg, a.clone());
    let right0 = peel_to_class(pkg, b.clone());
    let mut base = find_common_base_class(pkg, left0.class, right0.class);
    while let Some(base_id) = base {
        let left = substitute_for_base(pkg, &Type::Class(left0.clone()), base_id);
        let right = substitute_for_base(pkg, &Type::Class(right0.clone()), base_id);
        let (Type::Class(left_c), Type::Class(right_c)) = (&left, &right) else {
            unreachable!("substitute_for_base of a ClassType always yields a ClassType");
        };

        let defn = pkg.class(base_id);
        let mut combined_args = Vec::with_capacity(defn.type_parameters.len());
        let mut ok = true;
        for (i, tp_id) in defn.type_parameters.iter().enumerate() {
            let variance = pkg.type_parameter(*tp_id).variance;
            let l_arg = &left_c.type_args[i];
            let r_arg = &right_c.type_args[i];
            let combined = match variance {
                Variance::Invariant => {
                    if l_arg == r_arg {
                        l_arg.clone()
                    } else {
                        Type::AnyType
                    }
                }
                Variance::Covariant => {
                    stack.push((a.clone(), b.clone()));
                    let combined = lub_rec(pkg, l_arg, r_arg, stack);
                    stack.pop();
                    combined
                }
                Variance::Contravariant => {
                    stack.push((a.clone(), b.clone()));
                    let combined = glb_rec(pkg, l_arg, r_arg, stack);
                    stack.pop();
                    combined
                }
                Variance::Bivariant => {
                    unreachable!("a declared type parameter is never Bivariant")
                }
            };
            if matches!(combined, Type::AnyType) {
                ok = false;
                break;
            }
            combined_args.push(combined);
        }
        if ok {
            return set_nullable(Type::class(base_id, combined_args), nullable);
        }
        base = pkg.superclass_of(base_id);
    }
    Type::AnyType
}

/// Greatest lower bound of `a` and `b`. Not a true lattice meet for
/// disjoint primitives (`I32` and `String` have no shared lower bound
/// beyond `NoType`), so `glb` returning `NoType` doesn't imply an error —
/// callers decide what that means.
#[must_use]
pub fn glb(pkg: &Package, a: &Type, b: &Type) -> Type {
    glb_rec(pkg, a, b, &mut Vec::new())
}

fn glb_rec(pkg: &Package, a: &Type, b: &Type, stack: &mut Stack) -> Type {
    if on_stack(stack, a, b) {
        return if a.is_object() && b.is_object() {
            Type::class(pkg.nothing_class, Vec::new())
        } else {
            Type::NoType
        };
    }
    if a.is_equivalent(b) {
        return a.clone();
    }
    if matches!(a, Type::NoType) {
        return a.clone();
    }
    if matches!(b, Type::NoType) {
        return b.clone();
    }
    if is_subtype_of(pkg, a, b) {
        return a.clone();
    }
    if is_subtype_of(pkg, b, a) {
        return b.clone();
    }
    if a.is_object() && b.is_object() {
        let nullable = a.is_nullable() && b.is_nullable();
        return set_nullable(Type::class(pkg.nothing_class, Vec::new()), nullable);
    }
    Type::NoType
}

/// `isSubtypeOf(a, b) := lub(a, b) ≡ b`.
#[must_use]
pub fn is_subtype_of(pkg: &Package, a: &Type, b: &Type) -> bool {
    lub(pkg, a, b).is_equivalent(b)
}

/// Neither side is equivalent to their `lub` — there is no value both
/// types could describe at once.
#[must_use]
pub fn is_disjoint(pkg: &Package, a: &Type, b: &Type) -> bool {
    let joined = lub(pkg, a, b);
    !a.is_equivalent(&joined) && !b.is_equivalent(&joined)
}
