//! `bnmodel`: inspect and simulate Boolean network netlists.

mod cli;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use bn_model::{Model, ReadOptions};
use cli::{Cli, Command, Format, InputArgs};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = Cli::parse_args();
    init_logging(args.verbose);

    match args.command {
        Command::Info(cmd) => {
            let (model, format) = load(&cmd.input)?;
            print_info(&cmd.input, format, &model);
        }
        Command::Print(cmd) => {
            let (model, _) = load(&cmd.input)?;
            let mut out = io::stdout().lock();
            model.print(&mut out)?;
            out.flush()?;
        }
        Command::Eval(cmd) => {
            let (model, _) = load(&cmd.input)?;
            let inputs = parse_bits(&cmd.inputs, "--inputs")?;
            let state = parse_bits(&cmd.state, "--state")?;
            let result = model.eval(&inputs, &state)?;
            println!("outputs: {}", format_bits(&result.outputs));
            println!("next state: {}", format_bits(&result.next_state));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads the netlist named on the command line.
fn load(args: &InputArgs) -> Result<(Model, Format)> {
    let path = &args.file;
    let format = match args.format {
        Some(format) => format,
        None => {
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or_default();
            match Format::from_extension(ext) {
                Some(format) => format,
                None => bail!(
                    "cannot infer the format of {}; pass --format",
                    path.display()
                ),
            }
        }
    };

    let start_time = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(format!("Reading {}...", path.display()));

    let options = ReadOptions {
        clock_name: args.clock_name.clone(),
        reset_name: args.reset_name.clone(),
    };
    let model = match format {
        Format::Blif => Model::read_blif(path),
        Format::Bench => Model::read_iscas89(path),
        Format::Aag => Model::read_aag(path, &options),
        Format::Aig => Model::read_aig(path, &options),
        Format::Truth => Model::read_truth(path),
    };
    pb.finish_and_clear();
    let model = model.with_context(|| format!("failed to read {}", path.display()))?;

    debug!(elapsed = ?start_time.elapsed(), "loaded {}", path.display());
    Ok((model, format))
}

fn print_info(args: &InputArgs, format: Format, model: &Model) {
    println!("File: {}", args.file.display());
    println!("Format: {}", format.label());
    println!("Name: {}", model.name());
    if !model.comment().is_empty() {
        println!("Comment: {}", model.comment());
    }
    println!("Inputs: {}", model.input_num());
    println!("Outputs: {}", model.output_num());
    println!("Seqs: {}", model.seq_num());
    println!("Logic: {}", model.logic_num());
    println!("Funcs: {}", model.func_num());
    println!("Nodes: {}", model.node_num());
}

/// Parses a string of `0`/`1` characters.
fn parse_bits(s: &str, flag: &str) -> Result<Vec<bool>> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => bail!("{flag}: expected only '0' and '1', found '{c}'"),
        })
        .collect()
}

fn format_bits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
