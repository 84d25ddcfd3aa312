use pretty_assertions::assert_eq;

use rsprop::expression::{Expr, ExprKind};
use rsprop::generate::{random_expression, random_expression_with_value};
use rsprop::parser::parse;
use rsprop::TruthValue::{False as F, True as T};

fn depth(expr: &Expr) -> usize {
    match expr.kind() {
        ExprKind::Literal(_) | ExprKind::Variable(_) => 0,
        ExprKind::Unary(_, rhs) => 1 + depth(rhs),
        ExprKind::Binary(_, lhs, rhs) => 1 + depth(lhs).max(depth(rhs)),
    }
}

fn has_variables(expr: &Expr) -> bool {
    match expr.kind() {
        ExprKind::Literal(_) => false,
        ExprKind::Variable(_) => true,
        ExprKind::Unary(_, rhs) => has_variables(rhs),
        ExprKind::Binary(_, lhs, rhs) => has_variables(lhs) || has_variables(rhs),
    }
}

#[test]
fn test_bounds_validation() {
    assert!(random_expression(27, 3).is_err());
    assert!(random_expression(4, 0).is_err());
    assert!(random_expression(0, 1).is_ok());
    assert!(random_expression(26, 1).is_ok());
}

#[test]
fn test_depth_is_bounded() {
    for max_depth in 1..=5 {
        for _ in 0..50 {
            let expr = random_expression(4, max_depth).expect("generation");
            assert!(
                depth(&expr) <= max_depth,
                "{expr} exceeds depth {max_depth}"
            );
        }
    }
}

#[test]
fn test_zero_vars_yields_closed_expressions() {
    for _ in 0..50 {
        let expr = random_expression(0, 4).expect("generation");
        assert!(!has_variables(&expr), "{expr} contains a variable");
        assert!(expr.is_exact().expect("eval"), "{expr} must be exact");
    }
}

#[test]
fn test_targeted_generation() {
    for target in [F, T] {
        for _ in 0..10 {
            let expr = random_expression_with_value(4, 5, target).expect("generation");
            assert_eq!(expr.exact_value().expect("eval"), target);
        }
    }
}

#[test]
fn test_generated_expressions_round_trip() {
    for _ in 0..25 {
        let expr = random_expression(4, 5).expect("generation");
        let reparsed = parse(&expr.to_string())
            .expect("canonical form must parse")
            .expect("non-empty");
        assert_eq!(
            expr.values().expect("eval"),
            reparsed.values().expect("eval"),
            "value set changed for {expr}"
        );
    }
}
