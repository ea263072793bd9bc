//! Usage and help text.

/// One-line usage summary, printed on bad usage.
pub fn print_usage(exe_name: &str) {
    eprintln!("Usage: {} [options] <file> <dataset>", exe_name);
    eprintln!("Try `{} --help` for more information.", exe_name);
}

/// Full option listing, printed on `-h`/`--help`.
pub fn print_help(exe_name: &str) {
    println!("{} v{}", crate::cli::PROGRAM_NAME, crate::BENCHPRESS_VERSION);
    println!("Benchmark compression codecs against framed binary datasets.");
    println!();
    println!("Usage: {} [options] <file> <dataset>", exe_name);
    println!();
    println!("Available options:");
    println!("  -h, --help             Show this help");
    println!("  -a, --algorithm NAME   Compression algorithm (default: zstd)");
    println!("  -t, --threads N        Codec worker threads, 0 = auto (default: 1)");
    println!("  -l, --level N          Compression level [0..9] (default: 0)");
    println!("  -s, --shuffle 0|1      Precondition shuffle (default: 1)");
    println!("  -i, --iterations N     Passes over the input dataset (default: 1)");
    println!("      --list             List available compression algorithms");
    println!("  -v, --verbose          Print per-frame ratios and timestamps");
    println!("  -q, --quiet            Errors only");
    println!();
    println!("<file> is a BPD1 container; <dataset> names a dataset inside it.");
}
