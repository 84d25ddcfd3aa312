use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::truth_table::{Slot, TruthTable};
use crate::TruthValue;
use crate::TruthValue::{False as F, True as T};

/// The unary operators of the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negation,
}

/// The binary operators of the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Conjunction,
    Disjunction,
    ExclDisjunction,
    Implication,
    Biconditional,
}

lazy_static! {
    static ref NEGATION: TruthTable = unary_table("~", [(F, T), (T, F)]);
    static ref CONJUNCTION: TruthTable =
        binary_table("&", [(F, F, F), (F, T, F), (T, F, F), (T, T, T)]);
    static ref DISJUNCTION: TruthTable =
        binary_table("|", [(F, F, F), (F, T, T), (T, F, T), (T, T, T)]);
    static ref EXCL_DISJUNCTION: TruthTable =
        binary_table("+", [(F, F, F), (F, T, T), (T, F, T), (T, T, F)]);
    static ref IMPLICATION: TruthTable =
        binary_table("->", [(F, F, T), (F, T, T), (T, F, F), (T, T, T)]);
    static ref BICONDITIONAL: TruthTable =
        binary_table("<->", [(F, F, T), (F, T, F), (T, F, F), (T, T, T)]);
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negation => "~",
        }
    }

    pub const fn precedence(self) -> u8 {
        match self {
            Self::Negation => 4,
        }
    }

    /// The intrinsic one-input table this operator joins its operand through.
    pub fn join_table(self) -> &'static TruthTable {
        match self {
            Self::Negation => &NEGATION,
        }
    }
}

impl BinaryOp {
    pub const ALL: [Self; 5] = [
        Self::Conjunction,
        Self::Disjunction,
        Self::ExclDisjunction,
        Self::Implication,
        Self::Biconditional,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Conjunction => "&",
            Self::Disjunction => "|",
            Self::ExclDisjunction => "+",
            Self::Implication => "->",
            Self::Biconditional => "<->",
        }
    }

    /// Printing precedence; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Conjunction | Self::Disjunction => 3,
            Self::ExclDisjunction => 2,
            Self::Implication => 1,
            Self::Biconditional => 0,
        }
    }

    /// The intrinsic two-input table this operator joins its operands through.
    pub fn join_table(self) -> &'static TruthTable {
        match self {
            Self::Conjunction => &CONJUNCTION,
            Self::Disjunction => &DISJUNCTION,
            Self::ExclDisjunction => &EXCL_DISJUNCTION,
            Self::Implication => &IMPLICATION,
            Self::Biconditional => &BICONDITIONAL,
        }
    }
}

fn unary_table(symbol: &str, rows: [(TruthValue, TruthValue); 2]) -> TruthTable {
    let mut table = FxHashMap::default();
    for (input, output) in rows {
        table.insert(vec![input], output);
    }
    TruthTable::new(vec![Slot::anonymous()], table)
        .map(|t| t.with_name(symbol))
        .expect("intrinsic unary table is total")
}

fn binary_table(
    symbol: &str,
    rows: [(TruthValue, TruthValue, TruthValue); 4],
) -> TruthTable {
    let mut table = FxHashMap::default();
    for (lhs, rhs, output) in rows {
        table.insert(vec![lhs, rhs], output);
    }
    TruthTable::new(vec![Slot::anonymous(), Slot::anonymous()], table)
        .map(|t| t.with_name(symbol))
        .expect("intrinsic binary table is total")
}
