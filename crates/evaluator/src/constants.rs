// Constant declaration pass
//
// Folds every constant initializer and top-level expression of a module and
// checks folded values against declared types.

use crate::diagnostic::{DiagnosticSink, ErrorCode};
use crate::evaluator::{ConstantEvaluator, EvalResult};
use crate::memo::EvaluationMap;
use log::{debug, info};
use parser::module::{DeclId, ExprId, Module};
use types::{TypeRef, TypeSystem};

/// How evaluation sessions are scoped across the items of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// One memo table for the whole module
    #[default]
    Shared,
    /// A fresh memo table per item
    OneShot,
}

#[derive(Debug, Clone)]
pub struct FoldedConstant {
    pub declaration: DeclId,
    pub name: String,
    pub declared_type: Option<TypeRef>,
    pub source_type: Option<TypeRef>,
    pub value: Option<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct FoldedExpression {
    pub expr: ExprId,
    pub source_type: Option<TypeRef>,
    pub value: Option<TypeRef>,
}

#[derive(Debug, Clone, Default)]
pub struct FoldedModule {
    pub constants: Vec<FoldedConstant>,
    pub expressions: Vec<FoldedExpression>,
    /// Set when a fatal diagnostic stopped the pass
    pub aborted: bool,
}

struct Folded {
    source_type: Option<TypeRef>,
    value: Option<TypeRef>,
}

fn fold<T: TypeSystem + ?Sized>(
    module: &Module,
    types: &T,
    sink: &mut dyn DiagnosticSink,
    mode: SessionMode,
    shared: &mut EvaluationMap,
    expr: ExprId,
) -> EvalResult<Folded> {
    let mut fresh = EvaluationMap::new();
    let evaluations = match mode {
        SessionMode::Shared => shared,
        SessionMode::OneShot => &mut fresh,
    };
    let mut evaluator = ConstantEvaluator::new(module, types, sink, evaluations);
    let value = evaluator.try_evaluate(expr)?;
    Ok(Folded {
        source_type: evaluator.source_type(expr),
        value,
    })
}

/// Fold a whole module.
///
/// Declarations are folded in source order, then expression statements. The
/// pass stops at the first fatal diagnostic; items folded so far are kept.
pub fn fold_constants<T: TypeSystem + ?Sized>(
    module: &Module,
    types: &T,
    sink: &mut dyn DiagnosticSink,
    mode: SessionMode,
) -> FoldedModule {
    let mut shared = EvaluationMap::new();
    let mut folded = FoldedModule::default();

    for (id, declaration) in module.declarations() {
        let Some(value) = declaration.value.filter(|_| declaration.is_const) else {
            continue;
        };
        let declared_type = types.declaration_type(id);

        let result = match fold(module, types, &mut *sink, mode, &mut shared, value) {
            Ok(result) => result,
            Err(err) => {
                debug!("stopping at constant '{}': {}", declaration.name, err);
                folded.constants.push(FoldedConstant {
                    declaration: id,
                    name: declaration.name.clone(),
                    declared_type,
                    source_type: None,
                    value: None,
                });
                folded.aborted = true;
                return folded;
            }
        };

        if let (Some(expected), Some(value_type)) = (&declared_type, &result.value) {
            if !types.is_implicitly_convertible(value_type, expected) {
                sink.type_error(
                    ErrorCode::NotConvertible,
                    module.node(value).span.clone(),
                    format!(
                        "Type {} is not implicitly convertible to expected type {}.",
                        value_type, expected
                    ),
                );
            }
        }

        folded.constants.push(FoldedConstant {
            declaration: id,
            name: declaration.name.clone(),
            declared_type,
            source_type: result.source_type,
            value: result.value,
        });
    }

    for &expr in module.expressions() {
        match fold(module, types, &mut *sink, mode, &mut shared, expr) {
            Ok(result) => folded.expressions.push(FoldedExpression {
                expr,
                source_type: result.source_type,
                value: result.value,
            }),
            Err(err) => {
                debug!("stopping at expression {:?}: {}", expr, err);
                folded.expressions.push(FoldedExpression {
                    expr,
                    source_type: None,
                    value: None,
                });
                folded.aborted = true;
                return folded;
            }
        }
    }

    info!(
        "folded {} constants and {} expressions",
        folded.constants.len(),
        folded.expressions.len()
    );
    folded
}
