//! Minimal stand-ins for the two external collaborators the checker walks:
//! the already-parsed AST and the scope table. Lexing, layout, and parsing
//! are out of scope here, but the checker still needs *some* shape to walk,
//! so this models exactly the surface §4.3 of the design describes (and no
//! more — no token/trivia/layout information).

use crate::ids::{FieldId, FunctionId, GlobalId, TypeDefnId, TypeParameterId, VariableId};
use caldera_common::{new_id, Atom, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

new_id!(NodeId, "node");
new_id!(ScopeId, "scope");

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Unit,
    Bool(bool),
    /// An integer literal with an optional width suffix (`42i32`); an
    /// unsuffixed literal defaults to `I64`.
    Int {
        value: i64,
        suffix: Option<crate::types::PrimitiveKind>,
    },
    Float {
        value: f64,
        suffix: Option<crate::types::PrimitiveKind>,
    },
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub class_name: Atom,
    pub args: Vec<TypeArgNode>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgNode {
    Explicit(TypeNode),
    /// `_` in a class pattern, introducing a fresh existential variable.
    Wildcard,
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    StringLiteral(String),
    This,
    Identifier(Atom),
    PropertyAccess {
        receiver: Box<Expr>,
        name: Atom,
    },
    Call {
        callee: Box<Expr>,
        type_args: Vec<TypeNode>,
        args: Vec<Expr>,
    },
    /// `new(n) C`.
    NewArray {
        class_name: Atom,
        type_args: Vec<TypeNode>,
        count: Box<Expr>,
    },
    Binary {
        op: Atom,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: Atom,
        operand: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `x @= y`, desugars to `x = x @ y` at type-check time.
    CompoundAssign {
        op: Atom,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Block {
        scope: ScopeId,
        stmts: Vec<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    Match {
        scope: ScopeId,
        scrutinee: Box<Expr>,
        cases: Vec<MatchCase>,
    },
    Try {
        body: Box<Expr>,
        catches: Vec<MatchCase>,
        finally: Option<Box<Expr>>,
    },
    Return(Option<Box<Expr>>),
    Throw(Box<Expr>),
    VarDecl {
        name: Atom,
        annotation: Option<TypeNode>,
        is_mutable: bool,
        init: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone)]
pub struct MatchCase {
    pub scope: ScopeId,
    pub pattern: Pattern,
    pub guard: Option<Box<Expr>>,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub id: NodeId,
    pub span: Span,
    pub kind: PatternKind,
}

#[derive(Debug, Clone)]
pub enum PatternKind {
    Wildcard,
    /// A bare identifier, optionally with an explicit type annotation that
    /// must be a subtype of the scrutinee type.
    Variable {
        name: Atom,
        annotation: Option<TypeNode>,
    },
    /// `x: U` — accepted only when `U` is statically testable against the
    /// scrutinee type.
    TypeTest { binding: Option<Atom>, ty: TypeNode },
    Literal(Literal),
    /// `F(p1, .., pk)`, resolved against a free function or `try-match`
    /// method named `F`.
    Destructure {
        function_name: Atom,
        subpatterns: Vec<Pattern>,
    },
}

/// What an identifier or property-access use site resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefnInfo {
    Class(TypeDefnId),
    Trait(TypeDefnId),
    TypeParameter(TypeParameterId),
    Function(FunctionId),
    Field(FieldId),
    Global(GlobalId),
    Variable(VariableId),
    Package(Atom),
    /// More than one overload is visible; resolved further at the call site.
    Overloaded(Vec<FunctionId>),
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub bindings: FxHashMap<Atom, SmallVec<[DefnInfo; 1]>>,
}

/// A function's body, paired with the scope its parameters/`this` were
/// bound into. Not part of `Function` itself: the definition tables are the
/// declaration-pass's output, while bodies are what the checker walks after
/// every header in the package has already been installed (§5's forward-
/// reference pre-pass).
#[derive(Debug, Clone)]
pub struct FunctionBody {
    pub function: FunctionId,
    pub scope: ScopeId,
    pub body: Expr,
}

/// A global's initializer, analogous to `FunctionBody`.
#[derive(Debug, Clone)]
pub struct GlobalInit {
    pub global: GlobalId,
    pub scope: ScopeId,
    pub init: Expr,
}

/// Maps every scope-bearing AST node to a scope id, and every scope id to
/// its bindings and parent scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeTable {
    pub scopes: Vec<Scope>,
    pub node_scope: FxHashMap<NodeId, ScopeId>,
}

impl ScopeTable {
    pub fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId::new(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            ..Scope::default()
        });
        id
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn bind(&mut self, scope: ScopeId, name: Atom, info: DefnInfo) {
        self.scopes[scope.index()]
            .bindings
            .entry(name)
            .or_default()
            .push(info);
    }

    /// Walks the scope chain from `scope` looking for `name`, bounded by
    /// `caldera_common::limits::MAX_SCOPE_WALK_ITERATIONS` so a malformed
    /// chain can't hang the checker.
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: Atom) -> Option<&[DefnInfo]> {
        let mut current = Some(scope);
        let mut steps = 0usize;
        while let Some(id) = current {
            steps += 1;
            if steps > caldera_common::limits::MAX_SCOPE_WALK_ITERATIONS {
                return None;
            }
            let scope = self.scope(id);
            if let Some(bindings) = scope.bindings.get(&name) {
                return Some(bindings);
            }
            current = scope.parent;
        }
        None
    }
}
