use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lrzero::render::render;
use lrzero::scan::scan_grammar;
use lrzero::Automaton;

/// Builds the LR(0) automaton of a grammar and prints its states.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
  /// Productions such as `E:E+T`; the first one sets the start symbol
  productions: Vec<String>,

  /// File with one production per line, read after the arguments
  #[arg(short, long, value_name = "PATH")]
  file: Option<PathBuf>,

  /// Also reject states that both reduce and shift, or that complete two
  /// productions of one nonterminal
  #[arg(long)]
  strict: bool,

  /// Report progress on stderr
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let stdout = io::stdout();
  let mut out = stdout.lock();
  let code = execute(Cli::parse(), &mut out);
  let _ = out.flush();
  process::exit(code);
}

/// Runs the program, writing either the rendering or a single `ERROR:` line
/// to `out`. Returns the exit code.
fn execute(cli: Cli, out: &mut impl Write) -> i32 {
  match run(cli, &mut *out) {
    Ok(()) => 0,
    Err(err) => {
      // nothing else can be reported if stdout itself fails
      let _ = writeln!(out, "ERROR: {:#}", err);
      1
    }
  }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
  let mut lines = cli.productions;
  if let Some(path) = &cli.file {
    let text = fs::read_to_string(path)
      .with_context(|| format!("cannot read {}", path.display()))?;
    lines.extend(text.lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .map(str::to_owned));
  }
  if lines.is_empty() {
    bail!("no productions given, pass them as arguments or with --file");
  }

  let grammar = scan_grammar(&lines)?;
  if cli.verbose {
    eprintln!("scanned {} productions", grammar.productions().len());
  }

  let automaton = if cli.strict {
    Automaton::build_strict(grammar)?
  } else {
    Automaton::build(grammar)?
  };
  if cli.verbose {
    eprintln!("built {} states", automaton.len());
    for conflict in automaton.shift_reduce_conflicts() {
      eprintln!("shift/reduce in I{}: reduce {}, shift {}",
        conflict.state, automaton.bnf().prod(conflict.reduce), conflict.shift);
    }
  }

  write!(out, "{}", render(&automaton))?;
  Ok(())
}
