#![warn(clippy::disallowed_types)]

pub use truth_value::TruthValue;

pub mod convert;
pub mod expression;
pub mod generate;
pub mod operators;
pub mod parser;
pub mod table_io;
pub mod truth_table;

mod truth_value;
