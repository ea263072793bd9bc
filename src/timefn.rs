// timefn - wall/user/system process timer
//
// Rust's std::time::Instant is monotonic and MT-safe on all supported
// platforms and covers the wall clock. User and system CPU time come from
// getrusage(RUSAGE_SELF), which accumulates over the whole process; the
// timer snapshots it at start and reports deltas.

use std::time::Instant;

use nix::sys::resource::{getrusage, UsageWho};

/// Wall, user, and system elapsed time in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub wall_ns: u64,
    pub user_ns: u64,
    pub system_ns: u64,
}

impl CpuTimes {
    pub fn wall_seconds(&self) -> f64 {
        self.wall_ns as f64 / 1e9
    }

    pub fn user_seconds(&self) -> f64 {
        self.user_ns as f64 / 1e9
    }

    pub fn system_seconds(&self) -> f64 {
        self.system_ns as f64 / 1e9
    }
}

/// Snapshot-based timer. Construct with [`CpuTimer::start`], read with
/// [`CpuTimer::elapsed`] as often as needed; the timer itself never stops.
pub struct CpuTimer {
    wall_start: Instant,
    user_start_ns: u64,
    system_start_ns: u64,
}

impl CpuTimer {
    pub fn start() -> Self {
        let (user_ns, system_ns) = process_cpu_ns();
        CpuTimer {
            wall_start: Instant::now(),
            user_start_ns: user_ns,
            system_start_ns: system_ns,
        }
    }

    /// Elapsed wall/user/system time since [`CpuTimer::start`].
    pub fn elapsed(&self) -> CpuTimes {
        let (user_ns, system_ns) = process_cpu_ns();
        CpuTimes {
            wall_ns: self.wall_start.elapsed().as_nanos() as u64,
            user_ns: user_ns.saturating_sub(self.user_start_ns),
            system_ns: system_ns.saturating_sub(self.system_start_ns),
        }
    }
}

/// Cumulative (user, system) CPU time of the process in nanoseconds.
/// Reports zeros if rusage is unavailable rather than failing a benchmark
/// over a missing diagnostic.
fn process_cpu_ns() -> (u64, u64) {
    match getrusage(UsageWho::RUSAGE_SELF) {
        Ok(usage) => (timeval_ns(usage.user_time()), timeval_ns(usage.system_time())),
        Err(_) => (0, 0),
    }
}

fn timeval_ns(tv: nix::sys::time::TimeVal) -> u64 {
    tv.tv_sec() as u64 * 1_000_000_000 + tv.tv_usec() as u64 * 1_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_time_advances() {
        let timer = CpuTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let t = timer.elapsed();
        assert!(t.wall_ns >= 5_000_000, "wall_ns = {}", t.wall_ns);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let timer = CpuTimer::start();
        let a = timer.elapsed();
        let b = timer.elapsed();
        assert!(b.wall_ns >= a.wall_ns);
        assert!(b.user_ns >= a.user_ns);
        assert!(b.system_ns >= a.system_ns);
    }

    #[test]
    fn seconds_conversion() {
        let t = CpuTimes {
            wall_ns: 1_500_000_000,
            user_ns: 250_000_000,
            system_ns: 0,
        };
        assert!((t.wall_seconds() - 1.5).abs() < 1e-12);
        assert!((t.user_seconds() - 0.25).abs() < 1e-12);
        assert_eq!(t.system_seconds(), 0.0);
    }
}
