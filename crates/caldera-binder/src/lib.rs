//! Subtype/inheritance graph construction, override resolution, and
//! inherited-binding propagation over a single package's definition table.
//!
//! `analyze_inheritance` runs the five steps in order: build the subtype
//! graph and reject locally-invalid declarations, check it for cycles,
//! build the inheritance graph and a topological order over it, compute
//! each definition's full transitive supertype list, then resolve
//! overrides and propagate inherited bindings. Each step can report more
//! than one definition's errors; a failing definition is skipped in later
//! steps rather than aborting the whole package.

pub mod error;
pub mod graph;
pub mod overrides;
pub mod subtype_graph;
pub mod supertypes;
pub mod vertex;

pub use error::InheritanceError;
pub use graph::Graph;
pub use vertex::Vertex;

use caldera_ir::Package;
use rustc_hash::FxHashSet;

/// Runs the full five-step pipeline against `pkg`, mutating its
/// `supertypes` lists and `overrides`/`overridden_by` edges in place.
/// Returns every error collected across every definition; a non-empty
/// result means some definitions were left with a partial (but never
/// inconsistent) supertype list or override set.
pub fn analyze_inheritance(pkg: &mut Package) -> Vec<InheritanceError> {
    let mut errors = Vec::new();

    let (subtype_graph, subtype_errors) = subtype_graph::build_subtype_graph(pkg);
    errors.extend(subtype_errors);
    if subtype_graph.is_cyclic() {
        errors.push(InheritanceError::CyclicSubtypeGraph {
            defn: pkg.root_class,
            span: pkg.class(pkg.root_class).span,
        });
        return errors;
    }

    let inheritance_graph = supertypes::build_inheritance_graph(pkg);
    let order = inheritance_graph.topological_sort();
    let local_ids: FxHashSet<_> = pkg.classes.iter().map(|c| c.id).collect();
    let order: Vec<_> = order.into_iter().filter(|id| local_ids.contains(id)).collect();

    let (bases, supertype_errors) = supertypes::build_full_supertype_lists(pkg, &order);
    errors.extend(supertype_errors);

    let override_errors = overrides::resolve_overrides_and_inherit(pkg, &order, &bases);
    errors.extend(override_errors);

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldera_common::{Interner, Span};
    use caldera_ir::{
        ClassFlags, ClassType, DefnKind, Function, FunctionFlags, FunctionId, ObjectTypeDefn,
        TypeDefnId, TypeFlags,
    };

    fn class(
        id: u32,
        kind: DefnKind,
        supertypes: Vec<ClassType>,
        methods: Vec<FunctionId>,
        flags: ClassFlags,
    ) -> ObjectTypeDefn {
        ObjectTypeDefn {
            id: TypeDefnId::new(id),
            kind,
            name: Interner::default().intern(&format!("C{id}")),
            span: Span::dummy(),
            type_parameters: Vec::new(),
            supertypes,
            fields: Vec::new(),
            methods,
            constructors: Vec::new(),
            flags,
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

    fn method(
        id: u32,
        name: &str,
        declaring_class: TypeDefnId,
        flags: FunctionFlags,
        interner: &mut Interner,
    ) -> Function {
        Function {
            id: FunctionId::new(id),
            name: interner.intern(name),
            span: Span::dummy(),
            declaring_class: Some(declaring_class),
            type_parameters: Vec::new(),
            parameter_types: Vec::new(),
            return_type: caldera_ir::Type::class(TypeDefnId::new(0), Vec::new()),
            flags,
            overrides: Vec::new(),
            overridden_by: rustc_hash::FxHashMap::default(),
        }
    }

    /// `abstract class F { abstract def apply(): Root }`,
    /// `class S <: F { override def apply(): Root = ... }`.
    #[test]
    fn override_closure_links_both_sides() {
        let mut interner = Interner::default();
        let apply_base = method(
            0,
            "apply",
            TypeDefnId::new(1),
            FunctionFlags::METHOD | FunctionFlags::ABSTRACT,
            &mut interner,
        );
        let apply_override = method(
            1,
            "apply",
            TypeDefnId::new(2),
            FunctionFlags::METHOD | FunctionFlags::OVERRIDE,
            &mut interner,
        );

        let mut pkg = Package {
            name: interner.intern("test"),
            classes: vec![
                class(0, DefnKind::Class, vec![], Vec::new(), ClassFlags::empty()),
                class(
                    1,
                    DefnKind::Class,
                    vec![sty(0)],
                    vec![FunctionId::new(0)],
                    ClassFlags::ABSTRACT,
                ),
                class(
                    2,
                    DefnKind::Class,
                    vec![sty(1)],
                    vec![FunctionId::new(1)],
                    ClassFlags::empty(),
                ),
            ],
            type_parameters: Vec::new(),
            functions: vec![apply_base, apply_override],
            fields: Vec::new(),
            globals: Vec::new(),
            variables: Vec::new(),
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(99),
            std_surface: None,
        };

        let errors = analyze_inheritance(&mut pkg);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(pkg.function(FunctionId::new(1)).overrides, vec![FunctionId::new(0)]);
        assert_eq!(
            pkg.function(FunctionId::new(0)).overridden_by.get(&TypeDefnId::new(2)),
            Some(&FunctionId::new(1))
        );
    }

    #[test]
    fn every_ancestor_appears_exactly_once_after_analysis() {
        let mut interner = Interner::default();
        let mut pkg = Package {
            name: interner.intern("test"),
            classes: vec![
                class(0, DefnKind::Class, vec![], Vec::new(), ClassFlags::empty()),
                class(1, DefnKind::Class, vec![sty(0)], Vec::new(), ClassFlags::empty()),
                class(2, DefnKind::Class, vec![sty(1)], Vec::new(), ClassFlags::empty()),
            ],
            type_parameters: Vec::new(),
            functions: Vec::new(),
            fields: Vec::new(),
            globals: Vec::new(),
            variables: Vec::new(),
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(99),
            std_surface: None,
        };
        let errors = analyze_inheritance(&mut pkg);
        assert!(errors.is_empty());
        let ancestors = &pkg.class(TypeDefnId::new(2)).supertypes;
        let mut seen = FxHashSet::default();
        for sty in ancestors {
            assert!(seen.insert(sty.class), "duplicate ancestor {:?}", sty.class);
        }
        assert_eq!(ancestors.len(), 2);
    }
}
