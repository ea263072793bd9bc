//! Binary entry point for the `benchpress` command-line tool.
//!
//! Control flow: parse arguments, then dispatch to either the algorithm
//! listing or the benchmark run. Exit code 1 on option-parsing failure or
//! help request, 0 on success. Configuration and dataset errors are data
//! errors, not syntax errors: they get a clear message without the usage
//! text. All resources are released by RAII on every exit path.

use std::path::Path;

use benchpress::bench::{self, report};
use benchpress::cli::args::{parse_args, ParsedArgs};
use benchpress::cli::help::print_usage;
use benchpress::codec::{CodecEngine, ZstdEngine};
use benchpress::displaylevel;
use benchpress::displayout;

fn run(args: ParsedArgs) -> i32 {
    if args.list {
        let engine = ZstdEngine::new();
        displayout!("Available compression algorithms:\n");
        for algo in engine.list_algorithms() {
            displayout!("\t{}\t{}\t{}\n", algo.name, algo.version, algo.library);
        }
        return 0;
    }

    let (file, dataset) = match (args.file, args.dataset) {
        (Some(f), Some(d)) => (f, d),
        _ => {
            eprintln!("{}: missing <file> and <dataset> arguments", args.exe_name);
            print_usage(&args.exe_name);
            return 1;
        }
    };

    displaylevel!(2, "Reading from file: {}\n", file);
    displaylevel!(2, "Input dataset:     {}\n", dataset);

    match bench::bench_dataset(Path::new(&file), &dataset, &args.config) {
        Ok(metrics) => {
            report::print_summary(&metrics, &args.config);
            0
        }
        Err(e) => {
            eprintln!("{}: {}", benchpress::cli::PROGRAM_NAME, e);
            1
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", benchpress::cli::PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };

    // Help requested: nothing to do, but by convention the tool signals a
    // non-benchmark run with exit code 1.
    if args.exit_early {
        std::process::exit(1);
    }

    std::process::exit(run(args));
}
