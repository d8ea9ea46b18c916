//! cmdtree: expand indented argument trees into shell commands and run them.
//!
//! Each document goes through up to 5 phases:
//!
//! 1. **Comments** — drop `#/*` ... `#*/` blocks
//! 2. **Raw** — turn `#%raw` ... `#%endraw` blocks into `$$` literals
//! 3. **Conditionals** — evaluate `#%if`/`#%define` directives against the macro table
//! 4. **Expand** — flatten the indentation tree, one pass per level
//! 5. **Collapse** (optional) — join argument lines into command lines
//!
//! The result is run with `sh -c`, or printed with `--dry-run`.

mod collapse;
mod comment;
mod condition;
mod conditional;
mod directive;
mod exec;
mod expand;
mod inputs;
mod levels;
mod line;
mod raw;
mod symbols;

use anyhow::Result;
use clap::Parser;
use condition::ShellProbe;
use exec::SystemShell;
use std::io::{self, Write};
use std::process::ExitCode;
use symbols::SymbolTable;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CMDTREE_LOG";

#[derive(Parser)]
#[command(
    name = "cmdtree",
    about = "Expand indented argument trees into shell commands and run them"
)]
struct Cli {
    /// Input documents: files, directories, glob patterns, or - for stdin
    #[arg(required = true)]
    documents: Vec<String>,

    /// Print the collapsed commands instead of running them
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Skip command collapsing and print the expanded lines verbatim (implies --dry-run)
    #[arg(
        long = "no-collapse",
        env = "CMDTREE_NO_COLLAPSE",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_collapse: bool,

    /// Predefine a macro as NAME or NAME=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME[=VALUE]", value_parser = symbols::parse_definition)]
    defines: Vec<(String, String)>,

    /// Remove a predefined macro (repeatable)
    #[arg(short = 'U', long = "undefine", value_name = "NAME", value_parser = symbols::parse_name)]
    undefines: Vec<String>,

    /// Shell used for command conditions and for running the result
    #[arg(long, env = "CMDTREE_SHELL", default_value = exec::DEFAULT_SHELL)]
    shell: String,
}

/// Pipeline configuration for [`preprocess`].
struct PipelineConfig {
    collapse: bool,
}

/// Core pipeline, extracted for testability.
fn preprocess(
    source: &str,
    symbols: SymbolTable,
    probe: &dyn ShellProbe,
    config: &PipelineConfig,
) -> String {
    let lines = line::split_lines(source);
    let lines = comment::strip_extended_comments(&lines);
    let lines = raw::normalize_raw_sections(&lines);
    let lines = conditional::evaluate_lines(&lines, symbols, probe);
    let lines = expand::expand_lines(&lines);
    let lines = if config.collapse {
        collapse::collapse_lines(&lines)
    } else {
        lines
    };
    tracing::debug!(lines = lines.len(), "pipeline finished");
    render(&lines)
}

fn render(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Macro table for one document: `GUI`, then `-D`, then `-U`.
fn initial_symbols(cli: &Cli, display: bool) -> SymbolTable {
    let mut symbols = SymbolTable::predefined(display);
    for (name, value) in &cli.defines {
        symbols.define(name, value);
    }
    for name in &cli.undefines {
        symbols.undefine(name);
    }
    symbols
}

/// Uncollapsed output is not a runnable script, so it is only ever printed.
fn is_dry_run(cli: &Cli) -> bool {
    cli.dry_run || cli.no_collapse
}

/// Exit code for a failed child; never reports success for a non-zero code.
fn failure_code(code: i32) -> u8 {
    match (code & 0xff) as u8 {
        0 => 1,
        byte => byte,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let display = inputs::display_available();
    let sources = inputs::filter_gui(inputs::resolve(&cli.documents)?, display);
    let documents = inputs::load(sources)?;

    let shell = SystemShell::new(&cli.shell);
    let config = PipelineConfig {
        collapse: !cli.no_collapse,
    };
    let dry_run = is_dry_run(&cli);
    if dry_run && !cli.dry_run {
        tracing::info!("collapsing disabled; printing instead of executing");
    }

    for doc in &documents {
        tracing::debug!(document = %doc.source.name(), "processing");
        let output = preprocess(&doc.text, initial_symbols(&cli, display), &shell, &config);

        if dry_run {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            continue;
        }
        if output.is_empty() {
            continue;
        }
        let code = shell.run(&output)?;
        if code != 0 {
            tracing::debug!(document = %doc.source.name(), code, "command failed");
            return Ok(ExitCode::from(failure_code(code)));
        }
    }

    Ok(ExitCode::SUCCESS)
}
