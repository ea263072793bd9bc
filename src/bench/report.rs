//! Human-readable run summary.

use crate::bench::config::BenchConfig;
use crate::bench::metrics::BenchmarkMetrics;
use crate::displayout;

/// Print the per-run summary lines: dataset and compressed size in MB,
/// wall/user/system seconds, configuration echo, and final ratio and data
/// rate in MB/s. Results go to stdout; diagnostics elsewhere go to stderr.
pub fn print_summary(metrics: &BenchmarkMetrics, config: &BenchConfig) {
    displayout!(
        " Dataset={}MB\tCompressed={}MB\n",
        metrics.dataset_megabytes(),
        metrics.compressed_megabytes()
    );
    displayout!(
        "Time: Wall={}\tUser={}\tSystem={}\n",
        metrics.times.wall_seconds(),
        metrics.times.user_seconds(),
        metrics.times.system_seconds()
    );
    displayout!(
        "CONFIG:\talgo={}\tlevel={}\tthreads={}\n",
        config.algorithm,
        config.level,
        config.threads
    );
    match (metrics.ratio(), metrics.data_rate()) {
        (Some(ratio), Some(rate)) => {
            displayout!("RESULT:\tRatio={}\tDatarate={} MB/s\n", ratio, rate)
        }
        (Some(ratio), None) => displayout!("RESULT:\tRatio={}\tDatarate=inf MB/s\n", ratio),
        (None, Some(rate)) => displayout!("RESULT:\tRatio=inf\tDatarate={} MB/s\n", rate),
        (None, None) => displayout!("RESULT:\tRatio=inf\tDatarate=inf MB/s\n"),
    }
}
