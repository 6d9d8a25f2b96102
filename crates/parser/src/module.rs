/// Module Arena
///
/// Flattens a parsed `Program` into an arena of expression nodes addressed by
/// `ExprId` and declarations addressed by `DeclId`. Identifiers are resolved
/// against module-level declarations while lowering, in any order, so a constant
/// may refer to one declared further down (and cycles are expressible).
///
/// Later passes key their side tables on these handles; two nodes that are
/// structurally equal are still distinct entries.

use crate::ast::{BinaryOp, Expr, ExprKind, Literal, Program, Span, StmtKind, TypeName, UnaryOp};
use rustc_hash::FxHashMap;
use std::fmt;

/// Identity of an expression node inside a `Module`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

/// Identity of a declaration inside a `Module`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Literal(Literal),

    Identifier {
        name: String,
        declaration: Option<DeclId>,
    },

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },

    // Parenthesised tuples and inline arrays share one shape
    Tuple {
        components: Vec<ExprId>,
        is_inline_array: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub type_name: Option<TypeName>,
    pub value: Option<ExprId>,
    pub is_const: bool,
    pub span: Span,
}

/// Name resolution errors
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    DuplicateDeclaration {
        name: String,
        span: Span,
        previous: Span,
    },

    UndefinedIdentifier {
        name: String,
        span: Span,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::DuplicateDeclaration { name, .. } => {
                write!(f, "Identifier '{}' already declared", name)
            }
            ResolveError::UndefinedIdentifier { name, .. } => {
                write!(f, "Undeclared identifier '{}'", name)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

impl ResolveError {
    pub fn span(&self) -> &Span {
        match self {
            ResolveError::DuplicateDeclaration { span, .. } => span,
            ResolveError::UndefinedIdentifier { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Module {
    nodes: Vec<Node>,
    declarations: Vec<Declaration>,
    expressions: Vec<ExprId>,
    scope: FxHashMap<String, DeclId>,
}

impl Module {
    /// Lower a parsed program into an arena, resolving every identifier.
    pub fn lower(program: &Program) -> Result<Module, Vec<ResolveError>> {
        let mut module = Module::default();
        let mut errors = Vec::new();

        // Pass 1: declare every name so references may point forward
        for stmt in &program.statements {
            if let StmtKind::VariableDecl {
                name,
                type_hint,
                is_const,
                ..
            } = &stmt.kind
            {
                if let Some(previous) = module.scope.get(name) {
                    errors.push(ResolveError::DuplicateDeclaration {
                        name: name.clone(),
                        span: stmt.span.clone(),
                        previous: module.declarations[previous.index()].span.clone(),
                    });
                    continue;
                }
                let id = DeclId(module.declarations.len() as u32);
                module.declarations.push(Declaration {
                    name: name.clone(),
                    type_name: type_hint.clone(),
                    value: None,
                    is_const: *is_const,
                    span: stmt.span.clone(),
                });
                module.scope.insert(name.clone(), id);
            }
        }

        // Pass 2: lower initializers and expression statements
        let mut next_decl = 0;
        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::VariableDecl { name, value, .. } => {
                    let Some(&id) = module.scope.get(name) else {
                        continue;
                    };
                    // A duplicate shares its name with an earlier declaration
                    if id.index() != next_decl {
                        if let Some(value) = value {
                            module.lower_expr(value, &mut errors);
                        }
                        continue;
                    }
                    next_decl += 1;
                    if let Some(value) = value {
                        let value = module.lower_expr(value, &mut errors);
                        module.declarations[id.index()].value = Some(value);
                    }
                }
                StmtKind::Expr(expr) => {
                    let id = module.lower_expr(expr, &mut errors);
                    module.expressions.push(id);
                }
            }
        }

        if errors.is_empty() {
            Ok(module)
        } else {
            Err(errors)
        }
    }

    fn push(&mut self, kind: NodeKind, span: Span) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, span });
        id
    }

    fn lower_expr(&mut self, expr: &Expr, errors: &mut Vec<ResolveError>) -> ExprId {
        let kind = match &expr.kind {
            ExprKind::Literal(literal) => NodeKind::Literal(literal.clone()),
            ExprKind::Identifier(name) => {
                let declaration = self.scope.get(name).copied();
                if declaration.is_none() {
                    errors.push(ResolveError::UndefinedIdentifier {
                        name: name.clone(),
                        span: expr.span.clone(),
                    });
                }
                NodeKind::Identifier {
                    name: name.clone(),
                    declaration,
                }
            }
            ExprKind::Unary { op, expr: operand } => NodeKind::Unary {
                op: *op,
                operand: self.lower_expr(operand, errors),
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.lower_expr(lhs, errors);
                let rhs = self.lower_expr(rhs, errors);
                NodeKind::Binary { op: *op, lhs, rhs }
            }
            ExprKind::Tuple(items) => NodeKind::Tuple {
                components: items.iter().map(|item| self.lower_expr(item, errors)).collect(),
                is_inline_array: false,
            },
            ExprKind::Array(items) => NodeKind::Tuple {
                components: items.iter().map(|item| self.lower_expr(item, errors)).collect(),
                is_inline_array: true,
            },
        };
        self.push(kind, expr.span.clone())
    }

    pub fn node(&self, id: ExprId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(index, decl)| (DeclId(index as u32), decl))
    }

    /// Top-level expression statements, in source order
    pub fn expressions(&self) -> &[ExprId] {
        &self.expressions
    }

    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        self.scope.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
