use anyhow::{bail, ensure, Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::operators::{BinaryOp, UnaryOp};
use crate::truth_table::{Slot, TruthTable};
use crate::TruthValue;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// The shape of an expression node.
pub enum ExprKind {
    Literal(TruthValue),
    Variable(String),
    Unary(UnaryOp, Rc<Expr>),
    Binary(BinaryOp, Rc<Expr>, Rc<Expr>),
}

#[derive(Debug, Clone)]
/// A propositional expression.
///
/// Expressions are immutable trees; the only post-construction write is the
/// truth-table cache, which is computed on first access and identical no
/// matter how often it is recomputed. Equality and hashing look at the tree
/// shape only, never at the cache.
pub struct Expr {
    kind: ExprKind,
    truth: RefCell<Option<Rc<TruthTable>>>,
}

impl Expr {
    pub fn literal(value: TruthValue) -> Rc<Self> {
        Rc::new(Self::from_kind(ExprKind::Literal(value)))
    }

    /// A free variable. Names must be non-empty and contain only ASCII
    /// letters.
    pub fn variable(name: &str) -> Result<Rc<Self>> {
        ensure!(!name.is_empty(), "variable name must not be empty");
        ensure!(
            name.chars().all(|c| c.is_ascii_alphabetic()),
            "variable name {name:?} must contain only letters"
        );
        Ok(Rc::new(Self::from_kind(ExprKind::Variable(
            name.to_string(),
        ))))
    }

    pub fn unary(op: UnaryOp, rhs: Rc<Self>) -> Rc<Self> {
        Rc::new(Self::from_kind(ExprKind::Unary(op, rhs)))
    }

    pub fn binary(op: BinaryOp, lhs: Rc<Self>, rhs: Rc<Self>) -> Rc<Self> {
        Rc::new(Self::from_kind(ExprKind::Binary(op, lhs, rhs)))
    }

    const fn from_kind(kind: ExprKind) -> Self {
        Self {
            kind,
            truth: RefCell::new(None),
        }
    }

    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// The truth table of this expression, computed bottom-up on first
    /// access and cached thereafter.
    pub fn truth(&self) -> Result<Rc<TruthTable>> {
        if let Some(cached) = self.truth.borrow().as_ref() {
            return Ok(Rc::clone(cached));
        }
        let table = Rc::new(self.compute_truth()?);
        *self.truth.borrow_mut() = Some(Rc::clone(&table));
        Ok(table)
    }

    fn compute_truth(&self) -> Result<TruthTable> {
        match &self.kind {
            ExprKind::Literal(value) => {
                let mut rows = FxHashMap::default();
                rows.insert(vec![*value], *value);
                TruthTable::new(vec![Slot::literal(*value)], rows)
            }
            ExprKind::Variable(name) => {
                // The identity relation over the variable's domain.
                let mut rows = FxHashMap::default();
                rows.insert(vec![TruthValue::False], TruthValue::False);
                rows.insert(vec![TruthValue::True], TruthValue::True);
                TruthTable::new(vec![Slot::variable(name)], rows)
            }
            ExprKind::Unary(op, rhs) => {
                TruthTable::join(op.join_table(), &[rhs.truth()?])
                    .map(|t| t.with_name(&self.to_string()))
            }
            ExprKind::Binary(op, lhs, rhs) => {
                TruthTable::join(op.join_table(), &[lhs.truth()?, rhs.truth()?])
                    .map(|t| t.with_name(&self.to_string()))
            }
        }
    }

    /// The set of output values the expression can take over all consistent
    /// assignments of its free variables.
    pub fn values(&self) -> Result<FxHashSet<TruthValue>> {
        Ok(self.truth()?.outputs())
    }

    /// Whether the expression has exactly one possible output value.
    pub fn is_exact(&self) -> Result<bool> {
        Ok(self.values()?.len() == 1)
    }

    /// The single output value of an exact expression. Fails if more than
    /// one value is possible.
    pub fn exact_value(&self) -> Result<TruthValue> {
        let values = self.values()?;
        if values.len() != 1 {
            bail!("expression {self} does not evaluate to a single value");
        }
        values
            .into_iter()
            .next()
            .context("expression has no output values")
    }

    pub fn is_contradiction(&self) -> Result<bool> {
        Ok(self.is_exact()? && self.exact_value()? == TruthValue::False)
    }

    pub fn is_tautology(&self) -> Result<bool> {
        Ok(self.is_exact()? && self.exact_value()? == TruthValue::True)
    }

    pub fn could_be(&self, value: TruthValue) -> Result<bool> {
        Ok(self.values()?.contains(&value))
    }

    /// The fraction of truth-table rows producing `value`.
    pub fn probability(&self, value: TruthValue) -> Result<f64> {
        Ok(self
            .truth()?
            .distribution()
            .get(&value)
            .copied()
            .unwrap_or(0.0))
    }

    /// Replaces every free variable with its bound value, failing with the
    /// variable's name if a binding is missing.
    pub fn substitute(&self, bindings: &FxHashMap<String, TruthValue>) -> Result<Rc<Self>> {
        match &self.kind {
            ExprKind::Literal(value) => Ok(Self::literal(*value)),
            ExprKind::Variable(name) => bindings
                .get(name)
                .map(|&value| Self::literal(value))
                .with_context(|| format!("value of variable {name} not specified")),
            ExprKind::Unary(op, rhs) => Ok(Self::unary(*op, rhs.substitute(bindings)?)),
            ExprKind::Binary(op, lhs, rhs) => Ok(Self::binary(
                *op,
                lhs.substitute(bindings)?,
                rhs.substitute(bindings)?,
            )),
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(value) => Display::fmt(value, f),
            ExprKind::Variable(name) => f.write_str(name),
            ExprKind::Unary(op, rhs) => match rhs.kind() {
                ExprKind::Binary(..) => write!(f, "({}{rhs})", op.symbol()),
                _ => write!(f, "{}{rhs}", op.symbol()),
            },
            ExprKind::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}
