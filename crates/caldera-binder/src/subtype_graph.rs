//! Step 1 of inheritance analysis: build the subtype graph over every
//! class/trait and type parameter in the package, rejecting declarations
//! that can never be legal supertypes regardless of what else the package
//! contains, then check the whole graph for cycles.

use crate::error::InheritanceError;
use crate::graph::Graph;
use crate::vertex::Vertex;
use caldera_ir::{Package, Type, TypeFlags};

/// Builds the subtype graph and reports the supertype declarations that are
/// locally invalid (self-supertype, nullable supertype, inheriting
/// `Nothing`, inheriting a `final` class). Edges for a rejected declaration
/// are still added — a single malformed declaration shouldn't hide a
/// genuine cycle elsewhere in the same package — except self-loops, which
/// would otherwise manufacture a redundant `CyclicSubtypeGraph` on top of
/// the `SelfSupertype` already reported.
#[must_use]
pub fn build_subtype_graph(pkg: &Package) -> (Graph<Vertex>, Vec<InheritanceError>) {
    let mut graph = Graph::default();
    let mut errors = Vec::new();

    for defn in &pkg.classes {
        graph.add_vertex(Vertex::Defn(defn.id));
        for sty in &defn.supertypes {
            if sty.class == defn.id {
                errors.push(InheritanceError::SelfSupertype {
                    defn: defn.id,
                    span: defn.span,
                });
                continue;
            }
            if sty.flags.contains(TypeFlags::NULLABLE) {
                errors.push(InheritanceError::NullableSupertype {
                    defn: defn.id,
                    span: defn.span,
                });
            }
            if sty.class == pkg.nothing_class {
                errors.push(InheritanceError::InheritsNothing {
                    defn: defn.id,
                    span: defn.span,
                });
            } else if pkg.class(sty.class).is_final() {
                errors.push(InheritanceError::InheritsFinalClass {
                    defn: defn.id,
                    base: sty.class,
                    span: defn.span,
                });
            }
            graph.add_edge(Vertex::Defn(defn.id), Vertex::Defn(sty.class));
        }
    }

    for tp in &pkg.type_parameters {
        graph.add_vertex(Vertex::TypeParam(tp.id));
        if let Type::Variable(v) = &tp.upper_bound {
            graph.add_edge(Vertex::TypeParam(tp.id), Vertex::TypeParam(v.type_parameter));
        }
    }

    (graph, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldera_common::{Interner, Span};
    use caldera_ir::{ClassFlags, ClassType, DefnKind, ObjectTypeDefn, TypeDefnId};

    fn leaf(id: u32, supertypes: Vec<ClassType>, flags: ClassFlags) -> ObjectTypeDefn {
        ObjectTypeDefn {
            id: TypeDefnId::new(id),
            kind: DefnKind::Class,
            name: Interner::default().intern(&format!("C{id}")),
            span: Span::dummy(),
            type_parameters: Vec::new(),
            supertypes,
            fields: Vec::new(),
            methods: Vec::new(),
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

    fn pkg(classes: Vec<ObjectTypeDefn>) -> Package {
        Package {
            name: Interner::default().intern("test"),
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

    #[test]
    fn well_formed_hierarchy_has_no_errors_and_no_cycle() {
        let p = pkg(vec![
            leaf(0, vec![], ClassFlags::empty()),
            leaf(1, vec![sty(0)], ClassFlags::empty()),
            leaf(2, vec![sty(0)], ClassFlags::empty()),
        ]);
        let (graph, errors) = build_subtype_graph(&p);
        assert!(errors.is_empty());
        assert!(!graph.is_cyclic());
    }

    #[test]
    fn self_supertype_is_reported_and_does_not_manufacture_a_cycle_error() {
        let mut a = leaf(2, vec![], ClassFlags::empty());
        a.supertypes.push(sty(2));
        let p = pkg(vec![leaf(0, vec![], ClassFlags::empty()), leaf(1, vec![sty(0)], ClassFlags::empty()), a]);
        let (_graph, errors) = build_subtype_graph(&p);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], InheritanceError::SelfSupertype { .. }));
    }

    #[test]
    fn mutual_cycle_is_caught() {
        let a = leaf(2, vec![sty(3)], ClassFlags::empty());
        let b = leaf(3, vec![sty(2)], ClassFlags::empty());
        let p = pkg(vec![
            leaf(0, vec![], ClassFlags::empty()),
            leaf(1, vec![sty(0)], ClassFlags::empty()),
            a,
            b,
        ]);
        let (graph, _errors) = build_subtype_graph(&p);
        assert!(graph.is_cyclic());
    }

    #[test]
    fn inheriting_nothing_is_rejected() {
        let p = pkg(vec![
            leaf(0, vec![], ClassFlags::empty()),
            leaf(1, vec![sty(0)], ClassFlags::empty()),
            leaf(2, vec![sty(1)], ClassFlags::empty()),
        ]);
        let (_graph, errors) = build_subtype_graph(&p);
        assert!(errors
            .iter()
            .any(|e| matches!(e, InheritanceError::InheritsNothing { .. })));
    }

    #[test]
    fn inheriting_a_final_class_is_rejected() {
        let p = pkg(vec![
            leaf(0, vec![], ClassFlags::empty()),
            leaf(1, vec![sty(0)], ClassFlags::empty()),
            leaf(2, vec![sty(0)], ClassFlags::FINAL),
            leaf(3, vec![sty(2)], ClassFlags::empty()),
        ]);
        let (_graph, errors) = build_subtype_graph(&p);
        assert!(errors
            .iter()
            .any(|e| matches!(e, InheritanceError::InheritsFinalClass { .. })));
    }
}
