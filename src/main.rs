//! texp CLI
//!
//! Entry point for the `texp` command.

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "texp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluator for the tagged-prefix expression language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a program file and print the resulting value
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Evaluate an expression given on the command line
    Eval {
        /// Program text, e.g. '<add, <int, 3>, <int, 4>>'
        #[arg(value_name = "EXPR")]
        expr: String,
    },

    /// Parse a program file and print its tree without evaluating
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the tree as JSON instead of canonical notation
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive REPL
    Repl,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { input } => run(&input),
        Commands::Eval { expr } => eval_text(&expr),
        Commands::Parse { input, json } => parse_file(&input, json),
        Commands::Repl => repl(),
    }
}

fn read_source(input: &Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))
}

fn run(input: &Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;
    let value = texp::interpret(&source)?;

    // Only print non-void results
    match &value {
        texp::Expr::Void => {}
        v => println!("{}", v),
    }
    Ok(())
}

fn eval_text(expr: &str) -> Result<()> {
    let value = texp::interpret(expr)?;
    println!("{}", value);
    Ok(())
}

fn parse_file(input: &Path, json: bool) -> Result<()> {
    let source = read_source(input)?;
    let expr = texp::parse(&source)?;

    if json {
        let out = serde_json::to_string_pretty(&expr)
            .map_err(|e| miette::miette!("Failed to serialize tree: {}", e))?;
        println!("{}", out);
    } else {
        println!("{}", expr);
    }
    Ok(())
}

fn repl() -> Result<()> {
    println!("texp REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Definitions persist across lines; type :help for help, :quit to exit");
    println!();

    let mut rl = rustyline::DefaultEditor::new()
        .map_err(|e| miette::miette!("Failed to start line editor: {}", e))?;

    // One ambient environment for the whole session, so def and fun
    // bindings survive between lines
    let mut env = texp::Env::new();

    loop {
        let line = match rl.readline("texp> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => continue,
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => return Err(miette::miette!("Readline error: {}", e)),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":q" => break,
            ":help" | ":h" => {
                println!("Commands:");
                println!("  :help, :h    Show this help");
                println!("  :env         List the current bindings");
                println!("  :quit, :q    Exit the REPL");
                println!();
            }
            ":env" => {
                for (name, value) in env.iter() {
                    println!("  {} = {}", name, value);
                }
            }
            _ => {
                rl.add_history_entry(trimmed).ok();
                match texp::parser::parse(trimmed) {
                    Ok(expr) => match texp::eval(&expr, &mut env) {
                        Ok(texp::Expr::Void) => {}
                        Ok(value) => println!("{}", value),
                        Err(e) => eprintln!("{:?}", miette::Report::new(e)),
                    },
                    Err(e) => eprintln!("{:?}", miette::Report::new(e)),
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
