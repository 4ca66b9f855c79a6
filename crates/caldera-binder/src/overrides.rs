//! Step 5 of inheritance analysis: override resolution and inherited-binding
//! propagation.

use crate::error::InheritanceError;
use caldera_ir::{ClassFlags, DefnKind, FunctionFlags, FunctionId, Package, TypeDefnId};
use caldera_solver::{is_subtype_of, substitute_for_inheritance};
use rustc_hash::{FxHashMap, FxHashSet};

/// Whether `candidate` (declared on `deriving`) may override `base_method`
/// (declared on `base_class`): same arity of parameters and type
/// parameters, parameter types equal after substituting `base_class`'s type
/// parameters for `deriving`'s type arguments, and a covariant return type.
fn may_override(
    pkg: &Package,
    candidate: FunctionId,
    base_method: FunctionId,
    deriving: TypeDefnId,
    base_class: TypeDefnId,
) -> bool {
    let cand = pkg.function(candidate);
    let base_fn = pkg.function(base_method);
    if cand.parameter_types.len() != base_fn.parameter_types.len()
        || cand.type_parameters.len() != base_fn.type_parameters.len()
    {
        return false;
    }
    for (p, bp) in cand.parameter_types.iter().zip(base_fn.parameter_types.iter()) {
        let expected = substitute_for_inheritance(pkg, bp, deriving, base_class);
        if !p.is_equivalent(&expected) {
            return false;
        }
    }
    let expected_return = substitute_for_inheritance(pkg, &base_fn.return_type, deriving, base_class);
    is_subtype_of(pkg, &cand.return_type, &expected_return)
}

/// Runs step 5 over every definition in topological order, recording one
/// `InheritanceError` per failing definition.
pub fn resolve_overrides_and_inherit(
    pkg: &mut Package,
    order: &[TypeDefnId],
    bases: &FxHashMap<TypeDefnId, Vec<TypeDefnId>>,
) -> Vec<InheritanceError> {
    let mut errors = Vec::new();
    let empty = Vec::new();
    for &id in order {
        let base_ids = bases.get(&id).unwrap_or(&empty);
        if let Err(e) = resolve_one(pkg, id, base_ids) {
            errors.push(e);
        }
    }
    errors
}

fn resolve_one(pkg: &mut Package, id: TypeDefnId, base_ids: &[TypeDefnId]) -> Result<(), InheritanceError> {
    let span = pkg.class(id).span;
    let local_methods = pkg.class(id).methods.clone();

    let mut overridden_this_round: FxHashSet<FunctionId> = FxHashSet::default();
    let mut resolved_overrides: Vec<(FunctionId, Vec<FunctionId>)> = Vec::new();

    for &fn_id in &local_methods {
        let func = pkg.function(fn_id);
        if func.is_constructor() || func.is_static() {
            continue;
        }
        let name = func.name;

        let mut overrides = Vec::new();
        for &base_id in base_ids {
            let base_methods = pkg.class(base_id).methods.clone();
            let candidate_base_fn = base_methods.into_iter().find(|&base_fn_id| {
                if base_fn_id == fn_id {
                    return false;
                }
                let base_func = pkg.function(base_fn_id);
                if base_func.name != name || base_func.is_constructor() || base_func.is_static() {
                    return false;
                }
                may_override(pkg, fn_id, base_fn_id, id, base_id)
            });
            let Some(base_fn_id) = candidate_base_fn else {
                continue;
            };
            let base_func = pkg.function(base_fn_id);
            if base_func.flags.contains(FunctionFlags::FINAL) {
                return Err(InheritanceError::OverridesFinalMethod {
                    method: fn_id,
                    base_method: base_fn_id,
                    span,
                });
            }
            // Checked and recorded immediately, not deferred past the rest of
            // this fn_id's base_ids: a diamond can reach the same inherited
            // base_fn_id (unmodified) via two different direct bases in this
            // very loop, and only an eager `overridden_by` update lets the
            // second path see that the first already claimed it.
            if base_func.overridden_by.contains_key(&id) {
                return Err(InheritanceError::DuplicateOverride {
                    method: fn_id,
                    base_method: base_fn_id,
                    span,
                });
            }
            pkg.function_mut(base_fn_id).overridden_by.insert(id, fn_id);
            overrides.push(base_fn_id);
        }

        let func = pkg.function(fn_id);
        let has_override_flag = func.flags.contains(FunctionFlags::OVERRIDE);
        if has_override_flag && overrides.is_empty() {
            return Err(InheritanceError::OverrideFlagWithoutOverride { method: fn_id, span });
        }
        if !has_override_flag && !overrides.is_empty() {
            return Err(InheritanceError::OverridesWithoutOverrideFlag { method: fn_id, span });
        }

        if !overrides.is_empty() {
            overridden_this_round.extend(overrides.iter().copied());
            resolved_overrides.push((fn_id, overrides));
        }
    }

    for (fn_id, overrides) in resolved_overrides {
        pkg.function_mut(fn_id).overrides = overrides;
    }

    let local_method_names: FxHashSet<_> = local_methods.iter().map(|&f| pkg.function(f).name).collect();
    let local_field_names: FxHashSet<_> = pkg.class(id).fields.iter().map(|&f| pkg.field(f).name).collect();
    let had_own_fields = !pkg.class(id).fields.is_empty();

    let mut to_add_methods = Vec::new();
    let mut added_method_names: FxHashSet<_> = FxHashSet::default();
    let mut to_add_fields = Vec::new();
    let mut added_field_names: FxHashSet<_> = FxHashSet::default();

    for &base_id in base_ids {
        for &base_fn_id in &pkg.class(base_id).methods.clone() {
            let base_func = pkg.function(base_fn_id);
            if base_func.is_constructor()
                || overridden_this_round.contains(&base_fn_id)
                || local_method_names.contains(&base_func.name)
                || !added_method_names.insert(base_func.name)
            {
                continue;
            }
            to_add_methods.push(base_fn_id);
        }
        for &base_field_id in &pkg.class(base_id).fields.clone() {
            let f = pkg.field(base_field_id);
            if local_field_names.contains(&f.name) || !added_field_names.insert(f.name) {
                continue;
            }
            to_add_fields.push(base_field_id);
        }
    }

    if pkg.class(id).kind == DefnKind::Class && !pkg.class(id).is_abstract() {
        for &m in local_methods.iter().chain(to_add_methods.iter()) {
            if pkg.function(m).flags.contains(FunctionFlags::ABSTRACT) {
                return Err(InheritanceError::AbstractMethodNotImplemented {
                    class: id,
                    method: m,
                    span,
                });
            }
        }
    }

    if let Some(superclass_id) = pkg.superclass_of(id) {
        if pkg.class(superclass_id).flags.contains(ClassFlags::ARRAY) {
            if had_own_fields {
                return Err(InheritanceError::ArrayDescendantAddsFields { defn: id, span });
            }
            if let (Some(own), Some(super_elem)) = (
                pkg.class(id).element_type.clone(),
                pkg.class(superclass_id).element_type.clone(),
            ) {
                let expected = substitute_for_inheritance(pkg, &super_elem, id, superclass_id);
                if !own.is_equivalent(&expected) {
                    return Err(InheritanceError::ArrayDescendantChangesElementType { defn: id, span });
                }
            }
        }
    }

    let propagated_flags = pkg.superclass_of(id).map(|s| pkg.class(s).flags);

    let defn = pkg.class_mut(id);
    defn.methods.extend(to_add_methods);
    defn.fields.extend(to_add_fields);
    if defn.kind == DefnKind::Class {
        if let Some(super_flags) = propagated_flags {
            if super_flags.contains(ClassFlags::ARRAY) {
                defn.flags.insert(ClassFlags::ARRAY);
            }
            if super_flags.contains(ClassFlags::ARRAY_FINAL) {
                defn.flags.insert(ClassFlags::ARRAY_FINAL);
            }
        }
    }

    Ok(())
}
