use anyhow::{bail, ensure, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::rc::Rc;

use crate::expression::Expr;
use crate::operators::{BinaryOp, UnaryOp};
use crate::TruthValue;

/// Attempt cap for rejection sampling in [`random_expression_with_value`].
/// A target value can be unreachable at tight depth bounds; the cap turns
/// that case into an explicit error instead of a hang.
const MAX_ATTEMPTS: usize = 100_000;

/// Generates a random expression over at most `max_vars` distinct variables
/// (single letters `a..=z`) with tree depth at most `max_depth`.
///
/// The closer the current depth is to `max_depth`, the more likely a leaf
/// becomes; at `max_depth` only leaves are produced.
pub fn random_expression(max_vars: usize, max_depth: usize) -> Result<Rc<Expr>> {
    ensure!(max_vars <= 26, "max_vars must be <= 26");
    ensure!(max_depth > 0, "max_depth must be > 0");

    let mut rng = rand::thread_rng();

    let alphabet: Vec<char> = ('a'..='z').collect();
    let variables: Vec<Rc<Expr>> = (0..max_vars)
        .map(|_| {
            let letter = alphabet
                .choose(&mut rng)
                .copied()
                .unwrap_or('a');
            Expr::variable(&letter.to_string())
        })
        .collect::<Result<_>>()?;
    let literals = [
        Expr::literal(TruthValue::False),
        Expr::literal(TruthValue::True),
    ];

    Ok(random_subexpression(
        &mut rng, &literals, &variables, 0, max_depth,
    ))
}

fn random_subexpression<R: Rng>(
    rng: &mut R,
    literals: &[Rc<Expr>; 2],
    variables: &[Rc<Expr>],
    depth: usize,
    max_depth: usize,
) -> Rc<Expr> {
    // Probability of stopping at a leaf grows linearly with depth.
    let roll = rng.gen_range(1..=100);
    let leaf_cutoff = ((depth as f64 / max_depth as f64) * 100.0).round() as u64;
    let unary_cutoff = leaf_cutoff + (100 - leaf_cutoff) / 3;

    if roll <= leaf_cutoff {
        let leaf = if variables.is_empty() || rng.gen_bool(0.5) {
            literals.choose(rng)
        } else {
            variables.choose(rng)
        };
        leaf.cloned()
            .unwrap_or_else(|| Rc::clone(&literals[0]))
    } else if roll <= unary_cutoff {
        Expr::unary(
            UnaryOp::Negation,
            random_subexpression(rng, literals, variables, depth + 1, max_depth),
        )
    } else {
        let op = BinaryOp::ALL
            .choose(rng)
            .copied()
            .unwrap_or(BinaryOp::Conjunction);
        Expr::binary(
            op,
            random_subexpression(rng, literals, variables, depth + 1, max_depth),
            random_subexpression(rng, literals, variables, depth + 1, max_depth),
        )
    }
}

/// Generates random expressions until one has exactly the requested value.
///
/// Rejection sampling: fails after [`MAX_ATTEMPTS`] generations without a
/// hit, which can happen when `value` is unreachable within the bounds.
pub fn random_expression_with_value(
    max_vars: usize,
    max_depth: usize,
    value: TruthValue,
) -> Result<Rc<Expr>> {
    for _ in 0..MAX_ATTEMPTS {
        let expr = random_expression(max_vars, max_depth)?;
        if expr.is_exact()? && expr.exact_value()? == value {
            return Ok(expr);
        }
    }
    bail!("no expression with exact value {value} found after {MAX_ATTEMPTS} attempts");
}
