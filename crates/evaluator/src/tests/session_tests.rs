// Session Reuse Tests
//
// A shared memo table lets later requests reuse folded sub-expressions
// without asking the type system again.

use super::{r, setup, CountingTypes};
use crate::diagnostic::ErrorReporter;
use crate::evaluator::{evaluate, ConstantEvaluator};
use crate::memo::EvaluationMap;

const SOURCE: &str = "const k := 2 + 3; k * 2; k * 3;";

#[test]
fn test_shared_session_reuses_constants() {
    let (module, types) = setup(SOURCE);
    let counting = CountingTypes::new(&types);
    let mut reporter = ErrorReporter::new();
    let mut map = EvaluationMap::new();
    let mut evaluator = ConstantEvaluator::new(&module, &counting, &mut reporter, &mut map);

    let exprs = module.expressions();
    assert_eq!(evaluator.evaluate(exprs[0]).unwrap().as_rational(), Some(&r(10)));
    assert_eq!(evaluator.evaluate(exprs[1]).unwrap().as_rational(), Some(&r(15)));
    // `2 + 3`, `k * 2`, `k * 3`
    assert_eq!(counting.binary_calls.get(), 3);
}

#[test]
fn test_repeat_request_costs_nothing() {
    let (module, types) = setup(SOURCE);
    let counting = CountingTypes::new(&types);
    let mut reporter = ErrorReporter::new();
    let mut map = EvaluationMap::new();
    let mut evaluator = ConstantEvaluator::new(&module, &counting, &mut reporter, &mut map);
    let expr = module.expressions()[0];

    let first = evaluator.evaluate(expr);
    let calls = counting.calls();
    let second = evaluator.evaluate(expr);
    assert_eq!(first, second);
    assert_eq!(counting.calls(), calls);
}

#[test]
fn test_one_shot_sessions_start_fresh() {
    let (module, types) = setup(SOURCE);
    let counting = CountingTypes::new(&types);
    let mut reporter = ErrorReporter::new();

    for &expr in module.expressions() {
        assert!(evaluate(&mut reporter, &module, &counting, expr).is_some());
    }
    // `2 + 3` is folded again for the second request
    assert_eq!(counting.binary_calls.get(), 4);
}

#[test]
fn test_table_outlives_evaluator() {
    let (module, types) = setup(SOURCE);
    let counting = CountingTypes::new(&types);
    let mut reporter = ErrorReporter::new();
    let mut map = EvaluationMap::new();

    for &expr in module.expressions() {
        ConstantEvaluator::new(&module, &counting, &mut reporter, &mut map).evaluate(expr);
    }
    assert_eq!(counting.binary_calls.get(), 3);
    assert!(module.expressions().iter().all(|&e| map.is_evaluated(e)));
}

#[test]
fn test_unary_results_are_reused() {
    let (module, types) = setup("const n := -4; n + 1; n + 2;");
    let counting = CountingTypes::new(&types);
    let mut reporter = ErrorReporter::new();
    let mut map = EvaluationMap::new();
    let mut evaluator = ConstantEvaluator::new(&module, &counting, &mut reporter, &mut map);

    for &expr in module.expressions() {
        evaluator.evaluate(expr);
    }
    assert_eq!(counting.unary_calls.get(), 1);
}
