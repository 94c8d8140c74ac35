#![allow(clippy::print_stderr)]

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use drex::Session;
use drex::index::signature::method_signature;

/// Exit status when a command ran but produced no result.
const EXIT_NO_RESULT: u8 = 1;
/// Exit status when a command could not run (bad snapshot, config or token).
const EXIT_FAILURE: u8 = 2;

/// Deferred type resolution for Drupal entity storage calls.
#[derive(Parser, Debug)]
#[command(name = "drex", version, about)]
struct Cli {
    /// Project snapshot (JSON) produced by an indexer.
    #[arg(short, long, global = true, default_value = "snapshot.json")]
    snapshot: PathBuf,

    /// drex.json configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Colorize output. Defaults to whether stdout is a terminal.
    #[arg(long, global = true)]
    pretty: Option<bool>,

    /// Log provider decisions to stderr; repeat for codec and index detail.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode the deferred type of `$manager->getStorage('<identifier>')`.
    Encode {
        /// The literal entity type id.
        identifier: String,
        /// Called method; defaults to the configured factory method.
        #[arg(short, long)]
        method: Option<String>,
        /// Signatures the call resolves to; defaults to the factory
        /// interface's declaration.
        #[arg(long = "signature")]
        signatures: Vec<String>,
    },
    /// Resolve a token printed by `encode`.
    Resolve { token: String },
    /// Encode and resolve in one step.
    Infer { identifier: String },
    /// List theme hook completions.
    Themes,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    drex::tracing_config::init_tracing(cli.verbose);
    let pretty = cli.pretty.unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(pretty);

    let result = run(&cli);
    if let Err(err) = &result {
        eprintln!("{} {err:#}", "error:".red().bold());
    }
    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_NO_RESULT,
        Err(_) => EXIT_FAILURE,
    }
}

/// Returns whether the command produced a result.
fn run(cli: &Cli) -> Result<bool> {
    let session = Session::open(&cli.snapshot, cli.config.as_deref())?;

    match &cli.command {
        Command::Encode {
            identifier,
            method,
            signatures,
        } => {
            let token = encode(&session, identifier, method.as_deref(), signatures);
            print_token(cli, token.as_deref())
        }
        Command::Resolve { token } => print_resolved(cli, &session, token),
        Command::Infer { identifier } => {
            let Some(token) = encode(&session, identifier, None, &[]) else {
                return print_token(cli, None);
            };
            print_resolved(cli, &session, &token)
        }
        Command::Themes => {
            let items = session.theme_completions();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in &items {
                    println!("{}", item.label.green());
                }
            }
            Ok(!items.is_empty())
        }
    }
}

fn encode(
    session: &Session,
    identifier: &str,
    method: Option<&str>,
    signatures: &[String],
) -> Option<String> {
    let settings = &session.project().settings;
    let method = method.unwrap_or(&settings.factory_method);
    let signatures = if signatures.is_empty() {
        vec![method_signature(&settings.factory_interface, method)]
    } else {
        signatures.to_vec()
    };
    session.encode_call(method, identifier, signatures)
}

fn print_token(cli: &Cli, token: Option<&str>) -> Result<bool> {
    if cli.json {
        println!("{}", serde_json::json!({ "token": token }));
        return Ok(token.is_some());
    }
    match token {
        Some(token) => {
            println!("{token}");
            Ok(true)
        }
        None => {
            eprintln!("{}", "call site not handled by any provider".yellow());
            Ok(false)
        }
    }
}

fn print_resolved(cli: &Cli, session: &Session, token: &str) -> Result<bool> {
    if token.is_empty() {
        bail!("empty token");
    }
    let resolved = session.resolve(token);
    if cli.json {
        println!("{}", serde_json::json!({ "types": resolved }));
        return Ok(resolved.is_some());
    }
    match resolved {
        Some(types) => {
            for name in types.sorted() {
                println!("{}", name.cyan());
            }
            Ok(true)
        }
        None => {
            eprintln!("{}", "no result".yellow());
            Ok(false)
        }
    }
}

#[cfg(test)]
#[path = "../tests/cli_tests.rs"]
mod cli_tests;
