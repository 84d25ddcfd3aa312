use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use std::rc::Rc;

use rsprop::operators::{BinaryOp, UnaryOp};
use rsprop::table_io;
use rsprop::truth_table::{value_combinations, Slot, TruthTable};
use rsprop::TruthValue::{False as F, True as T};

fn variable_table(name: &str) -> Rc<TruthTable> {
    let mut rows = FxHashMap::default();
    rows.insert(vec![F], F);
    rows.insert(vec![T], T);
    Rc::new(TruthTable::new(vec![Slot::variable(name)], rows).expect("identity table is total"))
}

#[test]
fn test_operator_tables() {
    let negation = UnaryOp::Negation.join_table();
    assert_eq!(negation.lookup(&[F]).expect("row"), T);
    assert_eq!(negation.lookup(&[T]).expect("row"), F);

    let cases: Vec<(BinaryOp, [rsprop::TruthValue; 4])> = vec![
        (BinaryOp::Conjunction, [F, F, F, T]),
        (BinaryOp::Disjunction, [F, T, T, T]),
        (BinaryOp::ExclDisjunction, [F, T, T, F]),
        (BinaryOp::Implication, [T, T, F, T]),
        (BinaryOp::Biconditional, [T, F, F, T]),
    ];

    for (op, outputs) in cases {
        let table = op.join_table();
        let inputs = [[F, F], [F, T], [T, F], [T, T]];
        for (input, expected) in inputs.iter().zip(outputs) {
            assert_eq!(
                table.lookup(input).expect("row"),
                expected,
                "{} on {input:?}",
                op.symbol()
            );
        }
    }
}

#[test]
fn test_combination_order() {
    let slots = vec![Slot::variable("p"), Slot::variable("q")];
    assert_eq!(
        value_combinations(&slots),
        vec![vec![F, F], vec![F, T], vec![T, F], vec![T, T]]
    );
}

#[test]
fn test_literal_slot_has_singleton_domain() {
    let slot = Slot::literal(T);
    assert_eq!(slot.values(), &[T]);
    assert_eq!(value_combinations(&[slot]), vec![vec![T]]);
}

#[test]
fn test_join_deduplicates_shared_slots() {
    // Joining p with p must give a 2-row, not a 4-row, table.
    let joined = TruthTable::join(
        BinaryOp::Conjunction.join_table(),
        &[variable_table("p"), variable_table("p")],
    )
    .expect("join");

    assert_eq!(joined.arity(), 1);
    assert_eq!(joined.combinations().len(), 2);
    assert_eq!(joined.lookup(&[F]).expect("row"), F);
    assert_eq!(joined.lookup(&[T]).expect("row"), T);
}

#[test]
fn test_join_distinct_slots() {
    let joined = TruthTable::join(
        BinaryOp::Disjunction.join_table(),
        &[variable_table("p"), variable_table("q")],
    )
    .expect("join");

    assert_eq!(joined.arity(), 2);
    assert_eq!(joined.lookup(&[F, F]).expect("row"), F);
    assert_eq!(joined.lookup(&[F, T]).expect("row"), T);
    assert_eq!(joined.lookup(&[T, F]).expect("row"), T);
    assert_eq!(joined.lookup(&[T, T]).expect("row"), T);
}

#[test]
fn test_join_arity_mismatch() {
    let result = TruthTable::join(BinaryOp::Conjunction.join_table(), &[variable_table("p")]);
    assert!(result.is_err());
}

#[test]
fn test_lookup_errors() {
    let table = variable_table("p");

    assert!(table.lookup(&[F, T]).is_err(), "arity mismatch must fail");

    let literal = {
        let mut rows = FxHashMap::default();
        rows.insert(vec![T], T);
        TruthTable::new(vec![Slot::literal(T)], rows).expect("literal table is total")
    };
    assert!(
        literal.lookup(&[F]).is_err(),
        "inadmissible combination must fail"
    );
}

#[test]
fn test_construction_rejects_incomplete_rows() {
    let mut rows = FxHashMap::default();
    rows.insert(vec![F], F);
    let result = TruthTable::new(vec![Slot::variable("p")], rows);
    assert!(result.is_err(), "missing combination must be rejected");
}

#[test]
fn test_construction_rejects_zero_inputs() {
    let result = TruthTable::new(vec![], FxHashMap::default());
    assert!(result.is_err());
}

#[test]
fn test_distribution() {
    let table = variable_table("p");
    let distribution = table.distribution();
    assert_eq!(distribution.get(&F).copied(), Some(0.5));
    assert_eq!(distribution.get(&T).copied(), Some(0.5));

    let conjunction = TruthTable::join(
        BinaryOp::Conjunction.join_table(),
        &[variable_table("p"), variable_table("q")],
    )
    .expect("join");
    assert_eq!(conjunction.distribution().get(&T).copied(), Some(0.25));
}

#[test]
fn test_outputs() {
    let negated = TruthTable::join(UnaryOp::Negation.join_table(), &[variable_table("p")])
        .expect("join");
    let outputs = negated.outputs();
    assert!(outputs.contains(&F));
    assert!(outputs.contains(&T));
    assert_eq!(outputs.len(), 2);
}

#[test]
fn test_render_layout() {
    let table = TruthTable::join(
        BinaryOp::Conjunction.join_table(),
        &[variable_table("p"), variable_table("q")],
    )
    .expect("join")
    .with_name("(p & q)");

    let rendered = table_io::render_to_string(&table);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "p | q || (p & q)",
            "F | F || F",
            "F | T || F",
            "T | F || F",
            "T | T || T",
        ]
    );
}
