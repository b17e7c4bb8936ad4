use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use command_dispatch_engine::{DispatchConfig, Dispatcher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

/// Exit status for input or schema errors.
const REJECTED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "dispatch-shell")]
#[command(about = "Dispatch command lines to registered demonstration commands")]
#[command(version)]
struct Cli {
    /// YAML dispatch configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Print the registered routes as JSON and exit.
    #[arg(long)]
    list_routes: bool,
    /// Command line to dispatch; lines are read from stdin when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    line: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str())),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(REJECTED);
        }
    }
}

fn run(cli: Cli) -> Result<i32, String> {
    let config = match &cli.config {
        Some(path) => {
            let config = DispatchConfig::load(path)
                .map_err(|err| format!("failed to load {}: {err}", path.display()))?;
            debug!(path = %path.display(), ?config, "Loaded configuration");
            config
        }
        None => DispatchConfig::default(),
    };
    let dispatcher = commands::dispatcher(config)
        .map_err(|err| format!("failed to register commands: {err}"))?;

    if cli.list_routes {
        let routes: Vec<_> = dispatcher.routes().collect();
        let json = serde_json::to_string_pretty(&routes)
            .map_err(|err| format!("failed to serialize routes: {err}"))?;
        println!("{json}");
        return Ok(0);
    }

    if cli.line.is_empty() {
        return run_stdin(&dispatcher);
    }

    let line = join_words(&cli.line);
    let code = dispatcher.dispatch(&line).map_err(|err| err.to_string())?;
    Ok(code.unwrap_or(dispatcher.config().success_code))
}

/// Dispatches each stdin line; the exit status is that of the last
/// non-blank line.
fn run_stdin(dispatcher: &Dispatcher) -> Result<i32, String> {
    let mut status = dispatcher.config().success_code;
    for line in std::io::stdin().lock().lines() {
        let line = line.map_err(|err| format!("failed to read stdin: {err}"))?;
        match dispatcher.dispatch(&line) {
            Ok(Some(code)) => status = code,
            Ok(None) => {}
            Err(err) => {
                eprintln!("error: {err}");
                status = REJECTED;
            }
        }
    }
    Ok(status)
}

/// Rebuilds a command line from shell words, quoting words that would not
/// survive segmentation on their own.
fn join_words(words: &[String]) -> String {
    words
        .iter()
        .map(|word| quote_word(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_word(word: &str) -> String {
    let plain = !word.is_empty() && !word.chars().any(|c| c.is_whitespace() || c == '"');
    if plain {
        word.to_string()
    } else {
        format!("\"{}\"", word.replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_dispatch_core::Argument;

    #[test]
    fn test_quote_word() {
        assert_eq!(quote_word("--text"), "--text");
        assert_eq!(quote_word("hello world"), "\"hello world\"");
        assert_eq!(quote_word(""), "\"\"");
        assert_eq!(quote_word("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_join_words_survives_parsing() {
        let words: Vec<String> = ["echo", "--text", "a \"quoted\" word", "-u"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let parsed = command_dispatch_core::parse(&join_words(&words))
            .unwrap()
            .unwrap();

        assert_eq!(parsed.path.to_string(), "/echo");
        assert_eq!(
            parsed.arguments,
            vec![
                Argument::long("text", "a \"quoted\" word"),
                Argument::short("u", ""),
            ]
        );
    }
}
