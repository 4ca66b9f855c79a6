//! The AST-directed type checker (`TypeAnalyzer`): assigns a type to every
//! expression and pattern node, resolves overloaded calls, checks variance
//! and visibility of member signatures, and records use/definition edges.
//!
//! [`analyze_types`] is the single entry point: it type-checks every
//! function body and global initializer in the package (headers are assumed
//! already installed by the upstream declaration pass — §5's forward-
//! reference pre-pass — and inheritance analysis is assumed to have already
//! run, per §4.3's dependency on `caldera-binder` having completed), then
//! runs the two signature-only passes (member variance, public-surface
//! visibility) that don't need an AST walk at all.

pub mod call_checker;
pub mod context;
pub mod control_flow;
pub mod error;
pub mod literals;
pub mod match_checker;
pub mod operator_checker;
pub mod overload;
pub mod property_access;
pub mod resolve_type;
pub mod scope_resolve;
pub mod try_checker;
pub mod variance_checker;
pub mod visibility_checker;

pub use context::CheckerState;
pub use error::{ScopeError, SubtypeContext, TypeError};
pub use variance_checker::check_member_variance;
pub use visibility_checker::check_public_surface_visibility;

use caldera_common::{AnalysisOptions, Interner, Span};
use caldera_ir::{DefnInfo, Expr, ExprKind, FunctionBody, GlobalInit, NodeId, Package, ScopeId, ScopeTable, Type};
use caldera_solver::is_subtype_of;
use rustc_hash::FxHashMap;

/// Everything the pass produced: a type and definition-info edge per
/// expression node it visited, and the errors raised along the way. A
/// non-empty `type_errors`/`scope_errors` means some nodes were left with a
/// best-effort (`AnyType`) type rather than a checked one.
#[derive(Debug, Default)]
pub struct TypeAnalysisResult {
    pub node_types: FxHashMap<NodeId, Type>,
    pub node_defn_info: FxHashMap<NodeId, DefnInfo>,
    pub type_errors: Vec<TypeError>,
    pub scope_errors: Vec<ScopeError>,
}

/// Type-checks every function body and global initializer in `pkg`,
/// following §5's single-threaded, per-declaration-in-source-order
/// processing (the order `function_bodies`/`global_inits` are given in).
#[must_use]
pub fn analyze_types(
    pkg: &Package,
    scopes: &ScopeTable,
    options: &AnalysisOptions,
    interner: &mut Interner,
    function_bodies: &[FunctionBody],
    global_inits: &[GlobalInit],
) -> TypeAnalysisResult {
    let mut state = CheckerState::new(pkg, scopes, options, interner);

    for fb in function_bodies {
        let f = state.pkg.function(fb.function).clone();
        if let Some(class) = f.declaring_class {
            state.push_class(class);
        }
        state.push_function(f.return_type.clone(), f.is_constructor());
        state.check_expr(fb.scope, &fb.body);
        state.pop_function();
        if f.declaring_class.is_some() {
            state.pop_class();
        }
    }

    for gi in global_inits {
        let declared = state.pkg.global(gi.global).ty.clone();
        let init_ty = state.check_expr(gi.scope, &gi.init);
        if !is_subtype_of(&state.pkg, &init_ty, &declared) {
            state.error(TypeError::SubtypeViolation {
                node: gi.init.id,
                span: gi.init.span,
                context: SubtypeContext::FieldInit,
            });
        }
    }

    let node_types = state.node_types().clone();
    let node_defn_info = state.node_defn_infos().clone();
    let mut variance_errors = check_member_variance(&state.pkg);
    let visibility_errors = check_public_surface_visibility(&state.pkg);
    let (mut type_errors, scope_errors) = state.into_errors();
    type_errors.append(&mut variance_errors);
    type_errors.extend(visibility_errors);

    TypeAnalysisResult {
        node_types,
        node_defn_info,
        type_errors,
        scope_errors,
    }
}

impl<'a> CheckerState<'a> {
    /// Dispatches on `expr`'s kind to the matching `check_*` method and
    /// records the result against `expr.id`. Every `check_*` method takes
    /// the node/span explicitly rather than an `&Expr` so pattern bodies
    /// (which aren't themselves `Expr`s) can share the same helpers.
    pub(crate) fn check_expr(&mut self, scope: ScopeId, expr: &Expr) -> Type {
        let ty = match &expr.kind {
            ExprKind::Literal(lit) => self.check_literal(expr.id, expr.span, lit),
            ExprKind::StringLiteral(_) => self.check_string_literal(scope, expr.id, expr.span),
            ExprKind::This => self.check_this(expr.id, expr.span),
            ExprKind::Identifier(name) => self.resolve_identifier(scope, expr.id, expr.span, *name),
            ExprKind::PropertyAccess { receiver, name } => {
                let receiver_ty = self.check_expr(scope, receiver);
                self.check_property_access(expr.id, expr.span, &receiver_ty, *name)
            }
            ExprKind::Call { callee, type_args, args } => {
                self.check_call(scope, expr.id, expr.span, callee, type_args, args)
            }
            ExprKind::NewArray { class_name, type_args, count } => {
                self.check_new_array(scope, expr.id, expr.span, *class_name, type_args, count)
            }
            ExprKind::Binary { op, left, right } => {
                self.check_binary(scope, expr.id, expr.span, *op, left, right)
            }
            ExprKind::Unary { op, operand } => self.check_unary(scope, expr.id, expr.span, *op, operand),
            ExprKind::Assign { target, value } => self.check_assign(scope, expr.id, expr.span, target, value),
            ExprKind::CompoundAssign { op, target, value } => {
                self.check_compound_assign(scope, expr.id, expr.span, *op, target, value)
            }
            ExprKind::Block { scope: block_scope, stmts } => self.check_block(expr.id, *block_scope, stmts),
            ExprKind::If { cond, then_branch, else_branch } => {
                self.check_if(scope, expr.id, cond, then_branch, else_branch)
            }
            ExprKind::Match { scope: match_scope, scrutinee, cases } => {
                self.check_match(expr.id, expr.span, *match_scope, scrutinee, cases)
            }
            ExprKind::Try { body, catches, finally } => {
                self.check_try(scope, expr.id, expr.span, body, catches, finally)
            }
            ExprKind::Return(value) => self.check_return(scope, expr.id, expr.span, value),
            ExprKind::Throw(value) => self.check_throw(scope, expr.id, expr.span, value),
            ExprKind::VarDecl { annotation, init, .. } => {
                self.check_var_decl(scope, expr.id, expr.span, annotation, init)
            }
        };
        self.record_type(expr.id, ty)
    }

    /// `this` resolves to the enclosing class applied to its own type
    /// parameters; used outside any class body, it has no referent.
    fn check_this(&mut self, node: NodeId, span: Span) -> Type {
        match self.this_type() {
            Some(ty) => ty.clone(),
            None => {
                self.scope_error(ScopeError::UnresolvedName { node, span });
                Type::AnyType
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caldera_common::{AnalysisOptions, PackageId, Span};
    use caldera_ir::{
        ClassFlags, ClassType, DefnKind, Function, FunctionFlags, FunctionId, Literal,
        ObjectTypeDefn, PrimitiveKind, TypeDefnId, TypeFlags,
    };

    fn root_sty() -> ClassType {
        ClassType {
            class: TypeDefnId::new(0),
            type_args: Vec::new(),
            flags: TypeFlags::empty(),
        }
    }

    /// `Object` at id 0, `Nothing` at id 1 — kept contiguous with whatever
    /// other classes a test pushes after these, since `Package::class`
    /// indexes its arena directly by id rather than searching for it.
    fn root_and_nothing(interner: &mut Interner) -> Vec<ObjectTypeDefn> {
        vec![
            ObjectTypeDefn {
                id: TypeDefnId::new(0),
                kind: DefnKind::Class,
                name: interner.intern("Object"),
                span: Span::dummy(),
                type_parameters: Vec::new(),
                supertypes: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
                flags: ClassFlags::empty(),
                element_type: None,
            },
            ObjectTypeDefn {
                id: TypeDefnId::new(1),
                kind: DefnKind::Class,
                name: interner.intern("Nothing"),
                span: Span::dummy(),
                type_parameters: Vec::new(),
                supertypes: vec![root_sty()],
                fields: Vec::new(),
                methods: Vec::new(),
                constructors: Vec::new(),
                flags: ClassFlags::empty(),
                element_type: None,
            },
        ]
    }

    /// §8: `def f(x: i32): i32 = f(x)` — `f.parameterTypes == [I32]`,
    /// `f.returnType == I32`, no errors.
    #[test]
    fn recursive_function_typechecks_with_no_errors() {
        let mut interner = Interner::default();
        let mut classes = root_and_nothing(&mut interner);
        let f = Function {
            id: FunctionId::new(0),
            name: interner.intern("f"),
            span: Span::dummy(),
            declaring_class: None,
            type_parameters: Vec::new(),
            parameter_types: vec![Type::Primitive(PrimitiveKind::I32)],
            return_type: Type::Primitive(PrimitiveKind::I32),
            flags: FunctionFlags::empty(),
            overrides: Vec::new(),
            overridden_by: rustc_hash::FxHashMap::default(),
        };
        classes.sort_by_key(|c| c.id.index());
        let pkg = Package {
            name: interner.intern("test"),
            classes,
            type_parameters: Vec::new(),
            functions: vec![f],
            fields: Vec::new(),
            globals: Vec::new(),
            variables: vec![caldera_ir::Variable {
                id: caldera_ir::VariableId::new(0),
                name: interner.intern("x"),
                ty: Type::Primitive(PrimitiveKind::I32),
                is_mutable: false,
            }],
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(1),
            std_surface: None,
        };

        let mut scopes = ScopeTable::default();
        let fn_scope = scopes.push_scope(None);
        let x_atom = interner.intern("x");
        let f_atom = interner.intern("f");
        scopes.bind(fn_scope, x_atom, DefnInfo::Variable(caldera_ir::VariableId::new(0)));
        scopes.bind(fn_scope, f_atom, DefnInfo::Function(FunctionId::new(0)));

        let x_ref = Expr {
            id: NodeId::new(0),
            span: Span::dummy(),
            kind: ExprKind::Identifier(x_atom),
        };
        let call = Expr {
            id: NodeId::new(1),
            span: Span::dummy(),
            kind: ExprKind::Call {
                callee: Box::new(Expr {
                    id: NodeId::new(2),
                    span: Span::dummy(),
                    kind: ExprKind::Identifier(f_atom),
                }),
                type_args: Vec::new(),
                args: vec![x_ref],
            },
        };

        let mut pkg_interner = interner;
        let options = AnalysisOptions::new(PackageId::new(0));
        let result = analyze_types(
            &pkg,
            &scopes,
            &options,
            &mut pkg_interner,
            &[FunctionBody {
                function: FunctionId::new(0),
                scope: fn_scope,
                body: call,
            }],
            &[],
        );

        assert!(result.type_errors.is_empty(), "{:?}", result.type_errors);
        assert!(result.scope_errors.is_empty(), "{:?}", result.scope_errors);
        assert_eq!(
            result.node_types.get(&NodeId::new(1)),
            Some(&Type::Primitive(PrimitiveKind::I32))
        );
    }

    /// §8: `class A; class B <: A; def f(bar: B): A = bar` — typed OK.
    #[test]
    fn subtype_return_typechecks() {
        let mut interner = Interner::default();
        let mut classes = root_and_nothing(&mut interner);
        let class_a = ObjectTypeDefn {
            id: TypeDefnId::new(2),
            kind: DefnKind::Class,
            name: interner.intern("A"),
            span: Span::dummy(),
            type_parameters: Vec::new(),
            supertypes: vec![root_sty()],
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            flags: ClassFlags::empty(),
            element_type: None,
        };
        let class_b = ObjectTypeDefn {
            id: TypeDefnId::new(3),
            kind: DefnKind::Class,
            name: interner.intern("B"),
            span: Span::dummy(),
            type_parameters: Vec::new(),
            supertypes: vec![
                ClassType {
                    class: TypeDefnId::new(2),
                    type_args: Vec::new(),
                    flags: TypeFlags::empty(),
                },
                root_sty(),
            ],
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            flags: ClassFlags::empty(),
            element_type: None,
        };
        classes.push(class_a);
        classes.push(class_b);
        classes.sort_by_key(|c| c.id.index());

        let bar_var = caldera_ir::Variable {
            id: caldera_ir::VariableId::new(0),
            name: interner.intern("bar"),
            ty: Type::class(TypeDefnId::new(3), Vec::new()),
            is_mutable: false,
        };
        let f = Function {
            id: FunctionId::new(0),
            name: interner.intern("f"),
            span: Span::dummy(),
            declaring_class: None,
            type_parameters: Vec::new(),
            parameter_types: vec![Type::class(TypeDefnId::new(3), Vec::new())],
            return_type: Type::class(TypeDefnId::new(2), Vec::new()),
            flags: FunctionFlags::empty(),
            overrides: Vec::new(),
            overridden_by: rustc_hash::FxHashMap::default(),
        };
        let pkg = Package {
            name: interner.intern("test"),
            classes,
            type_parameters: Vec::new(),
            functions: vec![f],
            fields: Vec::new(),
            globals: Vec::new(),
            variables: vec![bar_var],
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(1),
            std_surface: None,
        };

        let mut scopes = ScopeTable::default();
        let fn_scope = scopes.push_scope(None);
        let bar_atom = interner.intern("bar");
        scopes.bind(fn_scope, bar_atom, DefnInfo::Variable(caldera_ir::VariableId::new(0)));

        let body = Expr {
            id: NodeId::new(0),
            span: Span::dummy(),
            kind: ExprKind::Identifier(bar_atom),
        };

        let mut pkg_interner = interner;
        let options = AnalysisOptions::new(PackageId::new(0));
        let result = analyze_types(
            &pkg,
            &scopes,
            &options,
            &mut pkg_interner,
            &[FunctionBody {
                function: FunctionId::new(0),
                scope: fn_scope,
                body,
            }],
            &[],
        );

        assert!(result.type_errors.is_empty(), "{:?}", result.type_errors);
        assert!(result.scope_errors.is_empty(), "{:?}", result.scope_errors);
    }

    /// A bare integer literal past its declared width is rejected.
    #[test]
    fn literal_widening_past_width_is_an_error() {
        let mut interner = Interner::default();
        let classes = root_and_nothing(&mut interner);
        let global = caldera_ir::Global {
            id: caldera_ir::GlobalId::new(0),
            name: interner.intern("g"),
            ty: Type::Primitive(PrimitiveKind::I8),
            is_mutable: false,
        };
        let pkg = Package {
            name: interner.intern("test"),
            classes,
            type_parameters: Vec::new(),
            functions: Vec::new(),
            fields: Vec::new(),
            globals: vec![global],
            variables: Vec::new(),
            root_class: TypeDefnId::new(0),
            nothing_class: TypeDefnId::new(1),
            std_surface: None,
        };
        let mut scopes = ScopeTable::default();
        let scope = scopes.push_scope(None);
        let body = Expr {
            id: NodeId::new(0),
            span: Span::dummy(),
            kind: ExprKind::Literal(Literal::Int {
                value: 1000,
                suffix: Some(PrimitiveKind::I8),
            }),
        };
        let mut global_interner = interner;
        let options = AnalysisOptions::new(PackageId::new(0));
        let result = analyze_types(
            &pkg,
            &scopes,
            &options,
            &mut global_interner,
            &[],
            &[GlobalInit {
                global: caldera_ir::GlobalId::new(0),
                scope,
                init: body,
            }],
        );
        assert!(result
            .type_errors
            .iter()
            .any(|e| matches!(e, TypeError::LiteralWidensPastWidth { .. })));
    }
}
