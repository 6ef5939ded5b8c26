mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::time::Instant;
use tiercache::{CacheConfig, LevelConfig, LoggingConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "tiercache-cli")]
#[command(about = "Tiercache CLI - interactive multi-level cache shell", long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Extra level appended after the configured ones, as CAPACITY:POLICY
    #[arg(short = 'l', long = "level", value_name = "CAPACITY:POLICY")]
    levels: Vec<String>,

    /// Commands to execute (if not in interactive mode), separated by ';'
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

/// Command results are logged under this target and must stay visible
const SHELL_OUTPUT_DIRECTIVE: &str = "tiercache_cli=info";

/// Configured (or `RUST_LOG`) filter for library diagnostics, with the
/// shell's own output pinned to `info`
fn build_filter(logging: &LoggingConfig) -> Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;
    Ok(filter.add_directive(SHELL_OUTPUT_DIRECTIVE.parse()?))
}

/// JSON records carry plain text only
fn configure_colors(logging: &LoggingConfig) {
    if is_json(logging) {
        colored::control::set_override(false);
    }
}

fn is_json(logging: &LoggingConfig) -> bool {
    logging.format.eq_ignore_ascii_case("json")
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    configure_colors(logging);
    let filter = build_filter(logging)?;

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    if is_json(logging) {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<CacheConfig> {
    let mut config = match &args.config {
        Some(path) => CacheConfig::from_file(path)?,
        None => CacheConfig::default(),
    };

    for spec in &args.levels {
        config.levels.push(LevelConfig::parse_spec(spec)?);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args).context("Failed to load configuration")?;

    init_tracing(&config.logging)?;

    let mut shell = Shell::new(config.build_hierarchy()?);

    // Check if running in command mode or interactive mode
    if !args.command.is_empty() {
        // Command mode: execute the given commands and exit
        for parts in args.command.split(|part| part == ";") {
            let Some((cmd, cmd_args)) = parts.split_first() else {
                continue;
            };
            if Shell::is_exit(cmd) {
                break;
            }

            match shell.execute_command(cmd, cmd_args) {
                Ok(output) => info!("{}", output),
                Err(e) => {
                    error!(
                        code = shell::status_code(&e),
                        error = %e,
                        "{}",
                        format!("Error: {}", e).red()
                    );
                    std::process::exit(1);
                }
            }
        }
        Ok(())
    } else {
        // Interactive mode
        run_interactive(shell)
    }
}

fn run_interactive(mut shell: Shell) -> Result<()> {
    info!(
        "{}",
        format!("Tiercache CLI v{}", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    info!("Type {} for available commands\n", "HELP".bold());

    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = format!(
            "{}> ",
            format!("tiercache [{} levels]", shell.level_count()).green()
        );
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(&line)?;

                let parts: Vec<String> = line.split_whitespace().map(String::from).collect();
                let Some((cmd, args)) = parts.split_first() else {
                    continue;
                };

                if Shell::is_exit(cmd) {
                    info!("Exiting...");
                    break;
                }

                let start = Instant::now();
                match shell.execute_command(cmd, args) {
                    Ok(output) => {
                        let elapsed = start.elapsed();
                        info!("{}\n{}", output, format!("({:.2?})", elapsed).dimmed());
                    }
                    Err(e) => {
                        error!(
                        code = shell::status_code(&e),
                        error = %e,
                        "{}",
                        format!("Error: {}", e).red()
                    );
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                info!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                info!("Exiting...");
                break;
            }
            Err(err) => {
                error!(error = ?err, "Readline error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str, format: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
        }
    }

    #[test]
    fn test_filter_keeps_shell_output_visible() {
        let filter = build_filter(&logging("warn", "text")).unwrap();
        assert!(filter.to_string().contains(SHELL_OUTPUT_DIRECTIVE));
    }

    #[test]
    fn test_json_format_disables_colors() {
        configure_colors(&logging("info", "JSON"));
        assert_eq!("plain".red().to_string(), "plain");
        assert!(is_json(&logging("info", "json")));
        assert!(!is_json(&logging("info", "text")));
    }
}
