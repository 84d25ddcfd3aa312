use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use rsprop::convert;
use rsprop::parser::parse;
use rsprop::table_io;

#[derive(Parser, Debug)]
#[clap(author, version, about = "A truth-table based propositional logic engine", long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a binary file as boolean-expression text, 8 lines per byte
    Encode {
        /// The input file to encode
        #[clap(value_parser, value_name = "INPUT")]
        input: PathBuf,

        /// The output filename (must not already exist)
        #[clap(value_parser, value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Decode boolean-expression text back into a binary file
    Decode {
        /// The input file to decode
        #[clap(value_parser, value_name = "INPUT")]
        input: PathBuf,

        /// The output filename (must not already exist)
        #[clap(value_parser, value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Parse an expression and print its truth table
    Table {
        /// The expression to evaluate
        #[clap(value_parser, value_name = "EXPR")]
        expression: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Encode { input, output } => encode_file(&input, &output),
        Command::Decode { input, output } => decode_file(&input, &output),
        Command::Table { expression } => print_table(&expression),
    }
}

fn encode_file(input: &PathBuf, output: &PathBuf) -> Result<()> {
    eprintln!("Reading input...");
    let data = fs::read(input)
        .with_context(|| format!("failed to read input file {}", input.display()))?;

    let mut writer = BufWriter::new(create_new(output)?);

    eprintln!("Encoding...");
    convert::encode(&data, &mut writer)?;
    writer.flush().context("failed to write to output")?;
    Ok(())
}

fn decode_file(input: &PathBuf, output: &PathBuf) -> Result<()> {
    eprintln!("Reading input...");
    let file = File::open(input)
        .with_context(|| format!("failed to open input file {}", input.display()))?;
    let reader = BufReader::new(file);

    let mut writer = BufWriter::new(create_new(output)?);

    eprintln!("Decoding...");
    convert::decode(reader, &mut writer)?;
    writer.flush().context("failed to write to output")?;
    Ok(())
}

fn create_new(path: &PathBuf) -> Result<File> {
    File::options()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("failed to create output file {}", path.display()))
}

fn print_table(expression: &str) -> Result<()> {
    let Some(expr) = parse(expression)? else {
        bail!("no expression given");
    };

    let table = expr.truth()?;
    let mut stdout = std::io::stdout();
    table_io::render(&table, &mut stdout)?;

    let values = expr.values()?;
    let mut possible: Vec<String> = values.iter().map(ToString::to_string).collect();
    possible.sort_unstable();
    println!("possible values: {{{}}}", possible.join(", "));
    if expr.is_exact()? {
        println!("exact value: {}", expr.exact_value()?);
    }
    Ok(())
}
