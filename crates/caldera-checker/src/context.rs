//! `CheckerState`: the mutable state threaded through every `check_*`
//! method, plus the small stacks (enclosing class, enclosing function) that
//! give `this`, `return`, and visibility checks their context.

use crate::error::{ScopeError, TypeError};
use caldera_common::{AnalysisOptions, Atom, Interner, Span};
use caldera_ir::{
    DefnInfo, NodeId, Package, ScopeId, ScopeTable, Type, TypeDefnId, TypeParameter,
    TypeParameterFlags, TypeParameterId, Variance,
};
use rustc_hash::FxHashMap;

/// The enclosing function being checked, used to accumulate the types of
/// its `return` statements for return-type inference/checking.
#[derive(Debug)]
pub(crate) struct FunctionFrame {
    pub declaring_class: Option<TypeDefnId>,
    pub declared_return_type: Type,
    pub is_constructor: bool,
}

/// The enclosing class/trait being checked, carrying the `this` type
/// (the class applied to its own type parameters, as `VariableType`s) for
/// member-body checks.
#[derive(Debug)]
pub(crate) struct ClassFrame {
    pub class: TypeDefnId,
    pub this_type: Type,
}

pub struct CheckerState<'a> {
    /// Owned rather than borrowed: opening a class-pattern wildcard (`_`)
    /// allocates a fresh skolem type parameter that has to live somewhere,
    /// and the definition tables are otherwise read-only to this pass, so a
    /// single clone up front is cheaper than a side table every lookup has
    /// to consult.
    pub pkg: Package,
    pub scopes: &'a ScopeTable,
    pub options: &'a AnalysisOptions,
    /// The same interner that produced every `Atom` in `pkg`/`scopes` —
    /// borrowed mutably so well-known names (`String`, the wildcard `_`)
    /// intern to the atoms those tables already use, rather than to a
    /// private numbering that would never compare equal.
    interner: &'a mut Interner,

    pub(crate) node_types: FxHashMap<NodeId, Type>,
    pub(crate) node_defn_info: FxHashMap<NodeId, DefnInfo>,

    pub(crate) type_errors: Vec<TypeError>,
    pub(crate) scope_errors: Vec<ScopeError>,

    pub(crate) class_stack: Vec<ClassFrame>,
    pub(crate) function_stack: Vec<FunctionFrame>,

    wildcard_name: Atom,
}

impl<'a> CheckerState<'a> {
    #[must_use]
    pub fn new(
        pkg: &Package,
        scopes: &'a ScopeTable,
        options: &'a AnalysisOptions,
        interner: &'a mut Interner,
    ) -> Self {
        let wildcard_name = interner.intern("_");
        Self {
            pkg: pkg.clone(),
            scopes,
            options,
            interner,
            node_types: FxHashMap::default(),
            node_defn_info: FxHashMap::default(),
            type_errors: Vec::new(),
            scope_errors: Vec::new(),
            class_stack: Vec::new(),
            function_stack: Vec::new(),
            wildcard_name,
        }
    }

    /// Interns `name` against the shared interner, for looking up a
    /// well-known binding (e.g. `String`) by source text.
    pub(crate) fn well_known(&mut self, name: &str) -> Atom {
        self.interner.intern(name)
    }

    /// Resolves an operator's `Atom` back to its source spelling, needed
    /// only to detect the trailing `:` that marks a right-associative
    /// operator.
    pub(crate) fn atom_text(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    /// Looks up a well-known class by source name (`String`, `Exception`)
    /// in `scope`, the same way a type annotation naming it would resolve.
    pub(crate) fn resolve_well_known_class(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        name: &str,
    ) -> Type {
        let atom = self.well_known(name);
        match self.scopes.lookup(scope, atom).and_then(|b| b.first()).cloned() {
            Some(DefnInfo::Class(id)) | Some(DefnInfo::Trait(id)) => Type::class(id, Vec::new()),
            _ => {
                self.scope_error(ScopeError::UnresolvedName { node, span });
                Type::AnyType
            }
        }
    }

    /// Allocates a fresh skolem type parameter for a class-pattern wildcard
    /// (`C[_]`), bounded by the package's root/bottom classes since a
    /// wildcard carries no explicit bound. Not a declared type parameter —
    /// it exists only for the duration of the existential it closes over.
    pub(crate) fn fresh_existential_var(&mut self, span: Span) -> TypeParameterId {
        let id = TypeParameterId::new(self.pkg.type_parameters.len() as u32);
        self.pkg.type_parameters.push(TypeParameter {
            id,
            name: self.wildcard_name,
            span,
            upper_bound: Type::class(self.pkg.root_class, Vec::new()),
            lower_bound: Type::class(self.pkg.nothing_class, Vec::new()),
            variance: Variance::Invariant,
            flags: TypeParameterFlags::empty(),
        });
        id
    }

    pub fn into_errors(self) -> (Vec<TypeError>, Vec<ScopeError>) {
        (self.type_errors, self.scope_errors)
    }

    pub(crate) fn error(&mut self, err: TypeError) {
        tracing::debug!(?err, "type error");
        self.type_errors.push(err);
    }

    pub(crate) fn scope_error(&mut self, err: ScopeError) {
        tracing::debug!(?err, "scope error");
        self.scope_errors.push(err);
    }

    pub(crate) fn record_type(&mut self, node: NodeId, ty: Type) -> Type {
        self.node_types.insert(node, ty.clone());
        ty
    }

    pub(crate) fn record_defn_info(&mut self, node: NodeId, info: DefnInfo) {
        self.node_defn_info.insert(node, info);
    }

    #[must_use]
    pub fn node_type(&self, node: NodeId) -> Option<&Type> {
        self.node_types.get(&node)
    }

    #[must_use]
    pub fn node_defn_info(&self, node: NodeId) -> Option<&DefnInfo> {
        self.node_defn_info.get(&node)
    }

    /// Every expression node typed so far, for a caller draining the whole
    /// pass's output rather than looking up one node at a time.
    #[must_use]
    pub fn node_types(&self) -> &FxHashMap<NodeId, Type> {
        &self.node_types
    }

    #[must_use]
    pub fn node_defn_infos(&self) -> &FxHashMap<NodeId, DefnInfo> {
        &self.node_defn_info
    }

    pub(crate) fn push_class(&mut self, class: TypeDefnId) {
        let defn = self.pkg.class(class);
        let type_args = defn
            .type_parameters
            .iter()
            .map(|&tp| Type::variable(tp))
            .collect();
        self.class_stack.push(ClassFrame {
            class,
            this_type: Type::class(class, type_args),
        });
    }

    pub(crate) fn pop_class(&mut self) {
        self.class_stack.pop();
    }

    #[must_use]
    pub(crate) fn current_class(&self) -> Option<TypeDefnId> {
        self.class_stack.last().map(|f| f.class)
    }

    #[must_use]
    pub(crate) fn this_type(&self) -> Option<&Type> {
        self.class_stack.last().map(|f| &f.this_type)
    }

    pub(crate) fn push_function(
        &mut self,
        declared_return_type: Type,
        is_constructor: bool,
    ) {
        self.function_stack.push(FunctionFrame {
            declaring_class: self.current_class(),
            declared_return_type,
            is_constructor,
        });
    }

    pub(crate) fn pop_function(&mut self) {
        self.function_stack.pop();
    }

    #[must_use]
    pub(crate) fn current_function(&self) -> Option<&FunctionFrame> {
        self.function_stack.last()
    }

    /// The scope a given AST node was assigned during parsing/binding, or
    /// `None` if it isn't scope-bearing (not every expression pushes a
    /// scope; lookups walk up from the nearest enclosing one instead).
    #[must_use]
    pub(crate) fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.scopes.node_scope.get(&node).copied()
    }
}
