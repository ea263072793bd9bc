//! Command-line argument parsing.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Long options use either `--option=VALUE` or `--option VALUE` syntax. A
//! bare `--` marks the end of options; all subsequent arguments are treated
//! as positionals regardless of whether they start with `-`.
//!
//! Bad or unrecognised options return an `Err` with a human-readable message
//! that begins with `"bad usage: "`.

use anyhow::anyhow;

use crate::bench::BenchConfig;
use crate::cli::help::print_help;
use crate::cli::set_display_level;

/// Complete set of options and positionals produced by the parsing loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Benchmark configuration accumulated from the options.
    pub config: BenchConfig,
    /// `--list`: print available algorithms instead of benchmarking.
    pub list: bool,
    /// Input container file (first positional).
    pub file: Option<String>,
    /// Dataset name inside the container (second positional).
    pub dataset: Option<String>,
    /// When `true`, help was printed; the caller should exit without
    /// performing any operation.
    pub exit_early: bool,
    /// Program name (argv[0]), used by help text.
    pub exe_name: String,
}

/// Parse `std::env::args()` (skipping argv[0]).
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args()
        .next()
        .unwrap_or_else(|| crate::cli::PROGRAM_NAME.to_owned());
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&exe_name, &argv)
}

/// Parse an explicit argument list. `exe_name` is argv[0] (used for help
/// text), `argv` is argv[1..]. Callable from tests without touching
/// `std::env`.
pub fn parse_args_from(exe_name: &str, argv: &[String]) -> anyhow::Result<ParsedArgs> {
    let mut config = BenchConfig::default();
    let mut list = false;
    let mut file: Option<String> = None;
    let mut dataset: Option<String> = None;
    let mut exit_early = false;
    let mut all_arguments_are_files = false;

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = argv[arg_idx].clone();
        arg_idx += 1;

        if argument.is_empty() {
            continue;
        }

        if all_arguments_are_files || !argument.starts_with('-') || argument == "-" {
            push_positional(&mut file, &mut dataset, argument)?;
            continue;
        }

        if argument == "--" {
            all_arguments_are_files = true;
            continue;
        }

        // Split `--option=VALUE` into name and inline value.
        let (name, inline_value) = match argument.split_once('=') {
            Some((n, v)) => (n.to_owned(), Some(v.to_owned())),
            None => (argument.clone(), None),
        };

        match name.as_str() {
            "-h" | "--help" => {
                print_help(exe_name);
                exit_early = true;
                break;
            }
            "-a" | "--algorithm" => {
                let value = take_value(&name, inline_value, argv, &mut arg_idx)?;
                config.set_algorithm(&value);
            }
            "-t" | "--threads" => {
                let value = take_value(&name, inline_value, argv, &mut arg_idx)?;
                let threads = parse_number(&name, &value)? as usize;
                // 0 = auto-detect.
                config.set_threads(if threads == 0 { num_cpus::get() } else { threads });
            }
            "-l" | "--level" => {
                let value = take_value(&name, inline_value, argv, &mut arg_idx)?;
                config.set_level(parse_number(&name, &value)?);
            }
            "-s" | "--shuffle" => {
                let value = take_value(&name, inline_value, argv, &mut arg_idx)?;
                match value.as_str() {
                    "0" => config.set_shuffle(false),
                    "1" => config.set_shuffle(true),
                    other => {
                        return Err(anyhow!(
                            "bad usage: --shuffle takes 0 or 1, got {:?}",
                            other
                        ))
                    }
                };
            }
            "-i" | "--iterations" => {
                let value = take_value(&name, inline_value, argv, &mut arg_idx)?;
                config.set_iterations(parse_number(&name, &value)?);
            }
            "--list" => {
                list = true;
            }
            "-v" | "--verbose" => {
                config.set_verbose(true);
                set_display_level(3);
            }
            "-q" | "--quiet" => {
                set_display_level(1);
            }
            _ => return Err(anyhow!("bad usage: unknown option {:?}", argument)),
        }
    }

    Ok(ParsedArgs {
        config,
        list,
        file,
        dataset,
        exit_early,
        exe_name: exe_name.to_owned(),
    })
}

fn push_positional(
    file: &mut Option<String>,
    dataset: &mut Option<String>,
    argument: String,
) -> anyhow::Result<()> {
    if file.is_none() {
        *file = Some(argument);
    } else if dataset.is_none() {
        *dataset = Some(argument);
    } else {
        return Err(anyhow!("bad usage: unexpected extra argument {:?}", argument));
    }
    Ok(())
}

fn take_value(
    name: &str,
    inline_value: Option<String>,
    argv: &[String],
    arg_idx: &mut usize,
) -> anyhow::Result<String> {
    if let Some(v) = inline_value {
        return Ok(v);
    }
    if *arg_idx < argv.len() {
        let v = argv[*arg_idx].clone();
        *arg_idx += 1;
        Ok(v)
    } else {
        Err(anyhow!("bad usage: option {} requires a value", name))
    }
}

fn parse_number(name: &str, value: &str) -> anyhow::Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| anyhow!("bad usage: invalid number {:?} for option {}", value, name))
}
