//! Monotonic high-resolution cycle counter.
//!
//! On x86_64 `read()` returns the raw `rdtsc` counter; everywhere else it
//! falls back to the platform's monotonic nanosecond clock
//! (`mach_absolute_time` on Apple targets, `clock_gettime(CLOCK_MONOTONIC)`
//! elsewhere). Callers never need to know which: `estimate_frequency`
//! converts whichever unit `read()` returns into "ticks per second".

use std::time::Instant;

/// Reads the counter. Units are "cycles" on x86_64, nanoseconds elsewhere;
/// callers should always go through `estimate_frequency` to convert to
/// wall-clock time rather than assuming a fixed tick rate.
#[inline(always)]
pub fn read() -> u64 {
    imp::read()
}

/// Estimates `read()`'s tick frequency by comparing elapsed OS wall-clock
/// time against elapsed ticks over a calibration window of `wait_millis`
/// milliseconds (default 100 via [`estimate_frequency_default`]).
pub fn estimate_frequency(wait_millis: u64) -> u64 {
    let os_start = Instant::now();
    let cycle_start = read();

    std::thread::sleep(std::time::Duration::from_millis(wait_millis));

    let os_elapsed = os_start.elapsed();
    let cycle_elapsed = read().wrapping_sub(cycle_start);

    let os_freq = 1_000_000_000u128; // Instant::elapsed is nanosecond-resolution
    let os_elapsed_ns = os_elapsed.as_nanos().max(1);

    ((os_freq * cycle_elapsed as u128) / os_elapsed_ns) as u64
}

/// Convenience wrapper around [`estimate_frequency`] using the 100ms
/// calibration window `spec.md` §4.A specifies as the default.
pub fn estimate_frequency_default() -> u64 {
    estimate_frequency(100)
}

#[cfg(target_arch = "x86_64")]
mod imp {
    #[inline(always)]
    pub fn read() -> u64 {
        // SAFETY: rdtsc has no preconditions; it just reads the TSC register.
        unsafe { core::arch::x86_64::_rdtsc() }
    }
}

#[cfg(all(not(target_arch = "x86_64"), target_vendor = "apple"))]
mod imp {
    use std::sync::OnceLock;

    #[inline(always)]
    #[allow(deprecated)]
    pub fn read() -> u64 {
        static TIMEBASE: OnceLock<(u64, u64)> = OnceLock::new();
        let (numer, denom) = *TIMEBASE.get_or_init(|| {
            let mut info = libc::mach_timebase_info_data_t { numer: 0, denom: 0 };
            let rc = unsafe { libc::mach_timebase_info(&mut info) };
            if rc != 0 || info.denom == 0 {
                (1, 1)
            } else {
                (info.numer as u64, info.denom as u64)
            }
        });
        let t = unsafe { libc::mach_absolute_time() } as u128;
        ((t * numer as u128) / denom as u128) as u64
    }
}

#[cfg(all(not(target_arch = "x86_64"), not(target_vendor = "apple")))]
mod imp {
    #[inline(always)]
    pub fn read() -> u64 {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        unsafe {
            libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
        }
        (ts.tv_sec as u64) * 1_000_000_000 + ts.tv_nsec as u64
    }
}
