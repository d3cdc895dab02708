use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Boolean network inspector - load BLIF, ISCAS89, AIGER and truth-table netlists
#[derive(Parser, Debug)]
#[command(name = "bnmodel")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Log parser details
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print model statistics
    Info(InfoCommand),
    /// Dump the whole model
    Print(PrintCommand),
    /// Evaluate one clock cycle
    Eval(EvalCommand),
}

/// Netlist file format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    /// Berkeley Logic Interchange Format
    Blif,
    /// ISCAS'89 bench
    Bench,
    /// ASCII AIGER
    Aag,
    /// Binary AIGER
    Aig,
    /// One binary truth table per line
    Truth,
}

impl Format {
    pub(crate) fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "blif" => Some(Format::Blif),
            "bench" => Some(Format::Bench),
            "aag" => Some(Format::Aag),
            "aig" => Some(Format::Aig),
            "truth" => Some(Format::Truth),
            _ => None,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Format::Blif => "BLIF",
            Format::Bench => "ISCAS89 bench",
            Format::Aag => "ASCII AIGER",
            Format::Aig => "binary AIGER",
            Format::Truth => "truth table",
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// Netlist file
    #[arg(value_name = "FILE")]
    pub(crate) file: PathBuf,

    /// Input format; inferred from the extension when omitted
    #[arg(short, long, value_enum)]
    pub(crate) format: Option<Format>,

    /// Name of the clock input created for AIGER latches
    #[arg(long, default_value = "clock", value_name = "NAME")]
    pub(crate) clock_name: String,

    /// Name of the reset input created for AIGER latches
    #[arg(long, default_value = "reset", value_name = "NAME")]
    pub(crate) reset_name: String,
}

#[derive(Parser, Debug)]
pub(crate) struct InfoCommand {
    #[command(flatten)]
    pub(crate) input: InputArgs,
}

#[derive(Parser, Debug)]
pub(crate) struct PrintCommand {
    #[command(flatten)]
    pub(crate) input: InputArgs,
}

#[derive(Parser, Debug)]
pub(crate) struct EvalCommand {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Primary input values, one 0/1 character per input
    #[arg(short, long, value_name = "BITS", default_value = "")]
    pub(crate) inputs: String,

    /// Current state, one 0/1 character per flip-flop or latch
    #[arg(short, long, value_name = "BITS", default_value = "")]
    pub(crate) state: String,
}

impl Cli {
    /// Parse command line arguments
    pub(crate) fn parse_args() -> Self {
        Cli::parse()
    }
}
