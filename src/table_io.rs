use itertools::Itertools;
use std::io::{self, Write};

use crate::truth_table::TruthTable;

const IN_DIVIDER: &str = " | ";
const OUT_DIVIDER: &str = " || ";

/// Writes a plain-text rendering of a truth table.
///
/// The header row lists the slot tags, divided by ` | `, followed by ` || `
/// and the table's name (or `<out>`). Each value row right-aligns its cells
/// to the corresponding header width.
pub fn render<W: Write>(table: &TruthTable, writer: &mut W) -> io::Result<()> {
    let headers: Vec<String> = table
        .inputs()
        .iter()
        .map(|slot| slot.tag().to_string())
        .collect();
    writeln!(
        writer,
        "{}{}{}",
        headers.iter().join(IN_DIVIDER),
        OUT_DIVIDER,
        table.name().unwrap_or("<out>")
    )?;

    for combination in table.combinations() {
        let cells = combination
            .iter()
            .zip(&headers)
            .map(|(value, header)| format!("{value:>width$}", width = header.len()))
            .join(IN_DIVIDER);
        // The lookup cannot fail for a combination the table itself produced.
        let output = table
            .lookup(&combination)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        writeln!(writer, "{cells}{OUT_DIVIDER}{output}")?;
    }

    Ok(())
}

/// Renders a truth table to a string.
pub fn render_to_string(table: &TruthTable) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = render(table, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
