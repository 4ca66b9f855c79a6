//! Generic overload resolution, shared by call checking, constructor calls,
//! and operator desugaring: filter the candidate set down to the viable
//! ones, then pick the most specific survivor.

use crate::context::CheckerState;
use crate::error::TypeError;
use caldera_common::Span;
use caldera_ir::{FunctionId, NodeId, Type, TypeParameterId};
use caldera_solver::{is_subtype_of, lub, substitute_for_base};
use rustc_hash::FxHashMap;

/// A viable candidate: the function chosen, its type arguments (explicit or
/// inferred), and its parameter/return types with those arguments
/// substituted in — the substituted parameters are what specificity
/// comparison and the caller's argument-assignability checks both need.
pub(crate) struct Viable {
    pub function: FunctionId,
    pub type_args: Vec<Type>,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
}

impl<'a> CheckerState<'a> {
    /// Resolves `candidates` against `explicit_type_args` (`None` when the
    /// call site gave none, triggering inference) and `arg_types`. Returns
    /// the winning candidate, or raises `NoViableOverload`/`AmbiguousOverload`
    /// and returns `None`.
    pub(crate) fn resolve_overload(
        &mut self,
        node: NodeId,
        span: Span,
        candidates: &[FunctionId],
        receiver: Option<&Type>,
        explicit_type_args: Option<&[Type]>,
        arg_types: &[Type],
    ) -> Option<Viable> {
        let viable: Vec<Viable> = candidates
            .iter()
            .filter_map(|&f| self.try_candidate(f, receiver, explicit_type_args, arg_types))
            .collect();

        match viable.len() {
            0 => {
                self.error(TypeError::NoViableOverload { node, span });
                None
            }
            1 => Some(viable.into_iter().next().unwrap()),
            _ => match self.most_specific(&viable) {
                Some(idx) => Some(viable.into_iter().nth(idx).unwrap()),
                None => {
                    self.error(TypeError::AmbiguousOverload {
                        node,
                        span,
                        candidates: viable.iter().map(|v| v.function).collect(),
                    });
                    None
                }
            },
        }
    }

    fn try_candidate(
        &self,
        function: FunctionId,
        receiver: Option<&Type>,
        explicit_type_args: Option<&[Type]>,
        arg_types: &[Type],
    ) -> Option<Viable> {
        let f = self.pkg.function(function);
        if f.parameter_types.len() != arg_types.len() {
            return None;
        }

        // Substitute the *class's* type arguments first (a method's own
        // declared signature is expressed in terms of its declaring class's
        // type parameters, independent of the function's own generics).
        let (declared_params, declared_return) = match (receiver, f.declaring_class) {
            (Some(r), Some(declaring)) => (
                f.parameter_types
                    .iter()
                    .map(|p| self.instantiate_member_type(r, declaring, p))
                    .collect::<Vec<_>>(),
                self.instantiate_member_type(r, declaring, &f.return_type),
            ),
            _ => (f.parameter_types.clone(), f.return_type.clone()),
        };

        let type_args = match explicit_type_args {
            Some(explicit) => {
                if explicit.len() != f.type_parameters.len() {
                    return None;
                }
                for (&tp, arg) in f.type_parameters.iter().zip(explicit) {
                    let bound = self.pkg.type_parameter(tp).upper_bound.clone();
                    let bound = bound.substitute(&f.type_parameters, explicit);
                    if !is_subtype_of(&self.pkg, arg, &bound) {
                        return None;
                    }
                }
                explicit.to_vec()
            }
            None if f.type_parameters.is_empty() => Vec::new(),
            None => self.infer_type_args(&f.type_parameters, &declared_params, arg_types)?,
        };

        let substituted_params: Vec<Type> = declared_params
            .iter()
            .map(|p| p.substitute(&f.type_parameters, &type_args))
            .collect();
        if substituted_params
            .iter()
            .zip(arg_types)
            .any(|(p, a)| !is_subtype_of(&self.pkg, a, p))
        {
            return None;
        }

        let return_type = declared_return.substitute(&f.type_parameters, &type_args);
        Some(Viable {
            function,
            type_args,
            parameter_types: substituted_params,
            return_type,
        })
    }

    /// Unifies each declared parameter against its argument's type to infer
    /// a binding for every one of `type_parameters`, failing the candidate
    /// (rather than raising an error — another overload may still fit) when
    /// a parameter is never constrained or two occurrences disagree beyond
    /// what `lub` can reconcile into a legal type.
    fn infer_type_args(
        &self,
        type_parameters: &[TypeParameterId],
        declared_params: &[Type],
        arg_types: &[Type],
    ) -> Option<Vec<Type>> {
        let mut bindings: FxHashMap<TypeParameterId, Type> = FxHashMap::default();
        for (param, arg) in declared_params.iter().zip(arg_types) {
            self.unify(type_parameters, param, arg, &mut bindings);
        }
        type_parameters
            .iter()
            .map(|tp| bindings.get(tp).cloned())
            .collect()
    }

    fn unify(
        &self,
        type_parameters: &[TypeParameterId],
        param: &Type,
        arg: &Type,
        bindings: &mut FxHashMap<TypeParameterId, Type>,
    ) {
        match param {
            Type::Variable(v) if type_parameters.contains(&v.type_parameter) => {
                let merged = match bindings.get(&v.type_parameter) {
                    Some(existing) => lub(&self.pkg, existing, arg),
                    None => arg.clone(),
                };
                bindings.insert(v.type_parameter, merged);
            }
            Type::Class(c) => {
                let aligned = substitute_for_base(&self.pkg, arg, c.class);
                if let Type::Class(ac) = aligned {
                    for (p, a) in c.type_args.iter().zip(&ac.type_args) {
                        self.unify(type_parameters, p, a, bindings);
                    }
                }
            }
            _ => {}
        }
    }

    /// `i` dominates `j` when every one of `i`'s (substituted) parameter
    /// types is a subtype of `j`'s corresponding parameter — `i` accepts no
    /// more than `j` does, so it's the more specific signature.
    fn dominates(&self, i: &Viable, j: &Viable) -> bool {
        i.parameter_types
            .iter()
            .zip(&j.parameter_types)
            .all(|(pi, pj)| is_subtype_of(&self.pkg, pi, pj))
    }

    /// The usual "most specific applicable method" rule: the candidate that
    /// dominates every other viable candidate and isn't dominated back by
    /// any of them (ruling out two candidates with identical parameter
    /// types, which dominate each other and must stay ambiguous — this is
    /// also how a static and a non-static overload with the same signature
    /// fall out as ambiguous, with no dedicated rule needed).
    fn most_specific(&self, viable: &[Viable]) -> Option<usize> {
        (0..viable.len()).find(|&i| {
            (0..viable.len()).all(|j| {
                i == j
                    || (self.dominates(&viable[i], &viable[j]) && !self.dominates(&viable[j], &viable[i]))
            })
        })
    }
}
