use anyhow::{bail, ensure, Result};
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{self, Display};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::TruthValue;

static ANON_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identity of a truth-table input slot.
///
/// Two slots are the same input exactly when their tags are equal, so joins
/// deduplicate shared inputs by tag. A variable's tag is its name, a
/// literal's tag is its own value, and anonymous tags (used by the intrinsic
/// operator tables) are globally unique.
pub enum SlotTag {
    Var(String),
    Const(TruthValue),
    Anon(usize),
}

impl Display for SlotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => f.pad(name),
            Self::Const(value) => Display::fmt(value, f),
            Self::Anon(id) => f.pad(&format!("<{id}>")),
        }
    }
}

#[derive(Debug, Clone)]
/// One positional input to a [`TruthTable`]: a tag plus the ordered set of
/// values the input can take. Equality is tag equality only.
pub struct Slot {
    tag: SlotTag,
    values: Vec<TruthValue>,
}

impl Slot {
    /// Slot for a named variable, ranging over the full domain.
    pub fn variable(name: &str) -> Self {
        Self {
            tag: SlotTag::Var(name.to_string()),
            values: vec![TruthValue::False, TruthValue::True],
        }
    }

    /// Slot for a literal: a singleton domain tagged by the value itself, so
    /// equal literals share the same input during joins.
    pub fn literal(value: TruthValue) -> Self {
        Self {
            tag: SlotTag::Const(value),
            values: vec![value],
        }
    }

    /// Slot with a unique tag and the full domain, used by the intrinsic
    /// operator tables whose inputs have no identity of their own.
    pub fn anonymous() -> Self {
        Self {
            tag: SlotTag::Anon(ANON_COUNTER.fetch_add(1, Ordering::Relaxed)),
            values: vec![TruthValue::False, TruthValue::True],
        }
    }

    pub fn tag(&self) -> &SlotTag {
        &self.tag
    }

    pub fn values(&self) -> &[TruthValue] {
        &self.values
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Slot {}

#[derive(Debug, Clone)]
/// A finite relation from input-value combinations to an output value.
///
/// The table is keyed by an ordered list of [`Slot`]s; its mapping covers
/// exactly the Cartesian product of the slot domains. Tables are immutable
/// once constructed. An optional name is carried for diagnostics.
pub struct TruthTable {
    inputs: Vec<Slot>,
    rows: FxHashMap<Vec<TruthValue>, TruthValue>,
    name: Option<String>,
}

impl TruthTable {
    /// Builds a table, checking that `rows` covers the Cartesian product of
    /// the slot domains exactly. Zero-input tables are rejected.
    pub fn new(inputs: Vec<Slot>, rows: FxHashMap<Vec<TruthValue>, TruthValue>) -> Result<Self> {
        ensure!(!inputs.is_empty(), "truth table must have at least one input");

        let expected = value_combinations(&inputs);
        ensure!(
            rows.len() == expected.len(),
            "truth table has {} rows, expected {}",
            rows.len(),
            expected.len()
        );
        for combination in &expected {
            ensure!(
                rows.contains_key(combination),
                "truth table is missing a row for ({})",
                combination.iter().join(", ")
            );
        }

        Ok(Self {
            inputs,
            rows,
            name: None,
        })
    }

    /// Attaches a display name, consuming the table.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn inputs(&self) -> &[Slot] {
        &self.inputs
    }

    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// All input combinations in enumeration order (odometer order, False
    /// before True within each slot).
    pub fn combinations(&self) -> Vec<Vec<TruthValue>> {
        value_combinations(&self.inputs)
    }

    /// The output for one input combination. Fails on an arity mismatch or a
    /// combination outside the admissible domain.
    pub fn lookup(&self, values: &[TruthValue]) -> Result<TruthValue> {
        ensure!(
            values.len() == self.inputs.len(),
            "expected {} input values but got {}",
            self.inputs.len(),
            values.len()
        );
        self.rows.get(values).copied().ok_or_else(|| {
            anyhow::anyhow!(
                "no table row for input combination ({})",
                values.iter().join(", ")
            )
        })
    }

    /// The distinct output values this table can produce.
    pub fn outputs(&self) -> FxHashSet<TruthValue> {
        self.rows.values().copied().collect()
    }

    /// The fraction of rows producing each output value.
    pub fn distribution(&self) -> FxHashMap<TruthValue, f64> {
        [TruthValue::False, TruthValue::True]
            .iter()
            .map(|&value| {
                let count = self.rows.values().filter(|&&v| v == value).count();
                (value, count as f64 / self.rows.len() as f64)
            })
            .collect()
    }

    /// Joins the tables of an operator's operands under the operator's own
    /// table `join_op`, producing the table of the compound expression.
    ///
    /// The result's inputs are the distinct slots across all child tables,
    /// deduplicated by tag in first-seen order. For every combination of the
    /// union's values, each child table is looked up on the projection of the
    /// combination onto its own slots, and `join_op` maps the child outputs
    /// to the result. A slot shared between children appears once in the
    /// union, so both children always see the same value for it.
    pub fn join(join_op: &Self, children: &[Rc<Self>]) -> Result<Self> {
        ensure!(
            join_op.arity() == children.len(),
            "join operator has arity {} but {} tables were given",
            join_op.arity(),
            children.len()
        );
        if children.is_empty() {
            bail!("cannot join zero tables");
        }

        // Union of distinct slots, with each child's positions mapped into it.
        let mut union: Vec<Slot> = Vec::new();
        let mut projections: Vec<Vec<usize>> = Vec::with_capacity(children.len());
        for child in children {
            let mut indices = Vec::with_capacity(child.arity());
            for slot in child.inputs() {
                match union.iter().position(|existing| existing == slot) {
                    Some(index) => indices.push(index),
                    None => {
                        indices.push(union.len());
                        union.push(slot.clone());
                    }
                }
            }
            projections.push(indices);
        }

        let mut rows = FxHashMap::default();
        for combination in value_combinations(&union) {
            let child_outputs: Vec<TruthValue> = children
                .iter()
                .zip(&projections)
                .map(|(child, indices)| {
                    let projected: Vec<TruthValue> =
                        indices.iter().map(|&i| combination[i]).collect();
                    child.lookup(&projected)
                })
                .collect::<Result<_>>()?;
            let output = join_op.lookup(&child_outputs)?;
            rows.insert(combination, output);
        }

        Self::new(union, rows)
    }
}

/// Enumerates the Cartesian product of the slots' value domains, rightmost
/// slot varying fastest.
pub fn value_combinations(slots: &[Slot]) -> Vec<Vec<TruthValue>> {
    slots
        .iter()
        .map(|slot| slot.values().iter().copied())
        .multi_cartesian_product()
        .collect()
}
