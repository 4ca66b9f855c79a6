//! Steps 2 and 4 of inheritance analysis: the inheritance graph (base to
//! derived edges, topologically sorted) and the full transitive supertype
//! list each class/trait gets rewritten to.

use crate::error::InheritanceError;
use crate::graph::Graph;
use caldera_common::{limits::MAX_SUPERCLASS_WALK, Span};
use caldera_ir::{ClassType, Package, Type, TypeDefnId, TypeFlags};
use rustc_hash::{FxHashMap, FxHashSet};

/// Edges point base→derived, unlike the subtype graph's derived→base
/// edges, so a topological order lists every base before its derivers.
#[must_use]
pub fn build_inheritance_graph(pkg: &Package) -> Graph<TypeDefnId> {
    let mut graph = Graph::default();
    for defn in &pkg.classes {
        graph.add_vertex(defn.id);
        for sty in &defn.supertypes {
            graph.add_edge(sty.class, defn.id);
        }
    }
    graph
}

fn record_ancestor(
    defn: TypeDefnId,
    span: Span,
    sty: ClassType,
    full: &mut Vec<ClassType>,
    seen: &mut FxHashMap<TypeDefnId, ClassType>,
) -> Result<(), InheritanceError> {
    match seen.get(&sty.class) {
        Some(existing) if existing.type_args != sty.type_args => {
            Err(InheritanceError::InconsistentDiamond {
                defn,
                ancestor: sty.class,
                span,
            })
        }
        Some(_) => Ok(()),
        None => {
            seen.insert(sty.class, sty.clone());
            full.push(sty);
            Ok(())
        }
    }
}

/// Builds the full supertype list for one definition, given that every
/// definition earlier in topological order already has its full list
/// installed. Returns the deduplicated direct base ids (`bases`) alongside
/// mutating `pkg.class_mut(id).supertypes` in place.
fn build_one(pkg: &mut Package, id: TypeDefnId) -> Result<Vec<TypeDefnId>, InheritanceError> {
    let (kind, span, explicit) = {
        let defn = pkg.class(id);
        (defn.kind, defn.span, defn.supertypes.clone())
    };

    let mut seen_explicit = FxHashSet::default();
    for sty in &explicit {
        if !seen_explicit.insert(sty.class) {
            return Err(InheritanceError::DuplicateSupertype {
                defn: id,
                base: sty.class,
                span,
            });
        }
    }

    let mut adjusted: Vec<ClassType> = Vec::new();
    if let Some(first) = explicit.first() {
        if pkg.class(first.class).is_trait() {
            use caldera_ir::DefnKind;
            match kind {
                DefnKind::Class => adjusted.push(ClassType {
                    class: pkg.root_class,
                    type_args: Vec::new(),
                    flags: TypeFlags::empty(),
                }),
                DefnKind::Trait => {
                    let trait_defn = pkg.class(first.class);
                    if let Some(trait_first) = trait_defn.supertypes.first().cloned() {
                        let substituted = Type::Class(trait_first)
                            .substitute(&trait_defn.type_parameters, &first.type_args);
                        if let Type::Class(c) = substituted {
                            adjusted.push(c);
                        }
                    }
                }
            }
        }
        adjusted.extend(explicit.iter().cloned());
    }

    if let Some(head) = adjusted.first() {
        if pkg.class(head.class).is_final() {
            return Err(InheritanceError::InheritsFinalClass {
                defn: id,
                base: head.class,
                span,
            });
        }
    }

    for (i, sty) in adjusted.iter().enumerate().skip(1) {
        if !pkg.class(sty.class).is_trait() {
            return Err(InheritanceError::SupertypeOrderViolation { defn: id, span });
        }
        let trait_base = pkg.class(sty.class).supertypes.first().map(|s| s.class);
        if let Some(trait_base) = trait_base {
            let head_class = adjusted[0].class;
            if !pkg.is_derived_from(head_class, trait_base) && !pkg.is_derived_from(trait_base, head_class)
            {
                return Err(InheritanceError::InconsistentTraitBaseClass {
                    defn: id,
                    trait_id: sty.class,
                    span,
                });
            }
        }
    }

    let mut full = Vec::new();
    let mut seen = FxHashMap::default();
    for direct in &adjusted {
        record_ancestor(id, span, direct.clone(), &mut full, &mut seen)?;
        let base_defn = pkg.class(direct.class);
        let base_type_parameters = base_defn.type_parameters.clone();
        let base_ancestors = base_defn.supertypes.clone();
        for (steps, ancestor) in base_ancestors.into_iter().enumerate() {
            if steps > MAX_SUPERCLASS_WALK {
                break;
            }
            let substituted = Type::Class(ancestor).substitute(&base_type_parameters, &direct.type_args);
            if let Type::Class(c) = substituted {
                record_ancestor(id, span, c, &mut full, &mut seen)?;
            }
        }
    }

    let bases: Vec<TypeDefnId> = adjusted.iter().map(|s| s.class).collect();
    pkg.class_mut(id).supertypes = full;
    Ok(bases)
}

/// Runs step 4 over every definition in topological order (base before
/// derived), recording one `InheritanceError` per failing definition and
/// continuing with the rest — a malformed class shouldn't block analysis
/// of unrelated siblings.
pub fn build_full_supertype_lists(
    pkg: &mut Package,
    order: &[TypeDefnId],
) -> (FxHashMap<TypeDefnId, Vec<TypeDefnId>>, Vec<InheritanceError>) {
    let mut bases = FxHashMap::default();
    let mut errors = Vec::new();
    for &id in order {
        match build_one(pkg, id) {
            Ok(direct_bases) => {
                bases.insert(id, direct_bases);
            }
            Err(e) => errors.push(e),
        }
    }
    (bases, errors)
}
