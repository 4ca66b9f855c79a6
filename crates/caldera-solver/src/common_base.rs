//! Nearest-common-ancestor walks over the (single-inheritance) class chain
//! and over type-parameter upper bounds.
//!
//! Both classes and type parameters form a tree under their respective
//! "one parent" relation (`superclass_of`, `upper_bound` while it stays
//! variable-typed), so the nearest common ancestor seen while walking up
//! from either side is the same regardless of which side the walk starts
//! from.

use caldera_common::limits::MAX_SUPERCLASS_WALK;
use caldera_ir::{Package, Type, TypeDefnId, TypeParameterId};
use rustc_hash::FxHashSet;

fn class_chain(pkg: &Package, start: TypeDefnId) -> Vec<TypeDefnId> {
    let mut chain = vec![start];
    let mut current = start;
    for _ in 0..MAX_SUPERCLASS_WALK {
        match pkg.superclass_of(current) {
            Some(next) => {
                chain.push(next);
                current = next;
            }
            None => break,
        }
    }
    chain
}

/// The nearest class that both `a` and `b` derive from, if any. `None` when
/// the two classes belong to disjoint ancestor chains (only possible if the
/// package's root class itself isn't shared, which well-formed packages
/// never produce, but this is still a partial operation — `lub` falls
/// through to `AnyType` on `None`).
#[must_use]
pub fn find_common_base_class(pkg: &Package, a: TypeDefnId, b: TypeDefnId) -> Option<TypeDefnId> {
    let b_chain: FxHashSet<TypeDefnId> = class_chain(pkg, b).into_iter().collect();
    class_chain(pkg, a).into_iter().find(|c| b_chain.contains(c))
}

fn type_parameter_chain(pkg: &Package, start: TypeParameterId) -> Vec<TypeParameterId> {
    let mut chain = vec![start];
    let mut current = start;
    for _ in 0..MAX_SUPERCLASS_WALK {
        match &pkg.type_parameter(current).upper_bound {
            Type::Variable(v) => {
                chain.push(v.type_parameter);
                current = v.type_parameter;
            }
            _ => break,
        }
    }
    chain
}

/// The nearest type parameter both `a` and `b` are (transitively, while
/// remaining variable-typed) upper-bounded by.
#[must_use]
pub fn find_common_upper_bound(
    pkg: &Package,
    a: TypeParameterId,
    b: TypeParameterId,
) -> Option<TypeParameterId> {
    let b_chain: FxHashSet<TypeParameterId> = type_parameter_chain(pkg, b).into_iter().collect();
    type_parameter_chain(pkg, a)
        .into_iter()
        .find(|c| b_chain.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldera_ir::{ClassFlags, ClassType, DefnKind, ObjectTypeDefn, TypeFlags};

    fn leaf_class(id: u32, supertypes: Vec<ClassType>) -> ObjectTypeDefn {
        ObjectTypeDefn {
            id: TypeDefnId::new(id),
            kind: DefnKind::Class,
            name: caldera_common::Interner::default().intern(&format!("C{id}")),
            span: caldera_common::Span::dummy(),
            type_parameters: Vec::new(),
            supertypes,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            flags: ClassFlags::empty(),
            element_type: None,
        }
    }

    fn sty(id: u32) -> ClassType {
        ClassType {
            class: TypeDefnId::new(id),
            type_args: Vec::new(),
            flags: TypeFlags::empty(),
        }
    }

    fn test_package(classes: Vec<ObjectTypeDefn>) -> Package {
        Package {
            name: caldera_common::Interner::default().intern("test"),
            classes,
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

    /// 0: Root, 1: Nothing, 2: A <: Root, 3: B <: A, 4: C <: A.
    fn diamond_package() -> Package {
        test_package(vec![
            leaf_class(0, vec![]),
            leaf_class(1, vec![sty(0)]),
            leaf_class(2, vec![sty(0)]),
            leaf_class(3, vec![sty(2), sty(0)]),
            leaf_class(4, vec![sty(2), sty(0)]),
        ])
    }

    #[test]
    fn common_base_of_siblings_is_shared_parent() {
        let pkg = diamond_package();
        let common = find_common_base_class(&pkg, TypeDefnId::new(3), TypeDefnId::new(4));
        assert_eq!(common, Some(TypeDefnId::new(2)));
    }

    #[test]
    fn common_base_of_class_with_itself_is_itself() {
        let pkg = diamond_package();
        let common = find_common_base_class(&pkg, TypeDefnId::new(3), TypeDefnId::new(3));
        assert_eq!(common, Some(TypeDefnId::new(3)));
    }

    #[test]
    fn common_base_of_ancestor_and_descendant_is_ancestor() {
        let pkg = diamond_package();
        let common = find_common_base_class(&pkg, TypeDefnId::new(3), TypeDefnId::new(0));
        assert_eq!(common, Some(TypeDefnId::new(0)));
    }
}
