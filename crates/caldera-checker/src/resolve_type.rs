//! Resolves a parsed `TypeNode`/`TypeArgNode` (the surface syntax for a type
//! annotation or a class-pattern argument) against scope into an IR `Type`.
//!
//! A `_` type argument allocates a fresh existential variable via
//! `CheckerState::fresh_existential_var`; the caller collects those into
//! `fresh` and closes the result over them when the surrounding construct
//! (a class-pattern type test) calls for an existential.

use crate::context::CheckerState;
use crate::error::ScopeError;
use caldera_common::Span;
use caldera_ir::{DefnInfo, NodeId, ScopeId, Type, TypeArgNode, TypeFlags, TypeNode, TypeParameterId};

impl<'a> CheckerState<'a> {
    pub(crate) fn resolve_type_node(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        type_node: &TypeNode,
        fresh: &mut Vec<TypeParameterId>,
    ) -> Type {
        let Some(bindings) = self.scopes.lookup(scope, type_node.class_name) else {
            self.scope_error(ScopeError::UnresolvedName { node, span });
            return Type::AnyType;
        };
        let defn_info = bindings.first().cloned();
        let base = match defn_info {
            Some(DefnInfo::Class(id)) | Some(DefnInfo::Trait(id)) => {
                let type_parameters = self.pkg.class(id).type_parameters.clone();
                if type_parameters.len() != type_node.args.len() {
                    self.scope_error(ScopeError::UnresolvedName { node, span });
                    return Type::AnyType;
                }
                let args = type_node
                    .args
                    .iter()
                    .map(|a| self.resolve_type_arg(scope, node, span, a, fresh))
                    .collect();
                Type::class(id, args)
            }
            Some(DefnInfo::TypeParameter(id)) => Type::variable(id),
            _ => {
                self.scope_error(ScopeError::UnresolvedName { node, span });
                return Type::AnyType;
            }
        };
        if type_node.nullable {
            base.with_flag(TypeFlags::NULLABLE)
        } else {
            base
        }
    }

    fn resolve_type_arg(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        arg: &TypeArgNode,
        fresh: &mut Vec<TypeParameterId>,
    ) -> Type {
        match arg {
            TypeArgNode::Explicit(inner) => self.resolve_type_node(scope, node, span, inner, fresh),
            TypeArgNode::Wildcard => {
                let var = self.fresh_existential_var(span);
                fresh.push(var);
                Type::variable(var)
            }
        }
    }
}
