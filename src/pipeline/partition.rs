//! Static split of the fragment list across workers.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

/// Number of threads the host can run in parallel, at least 1.
pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Worker count for a run over `files` fragments.
///
/// The hint (available parallelism when `None`) is clamped to
/// `[1, available_parallelism()]`, then to the number of files so no worker
/// starts with an empty range.
pub fn effective_workers(hint: Option<usize>, files: usize) -> usize {
    clamp_workers(hint, files, available_parallelism())
}

fn clamp_workers(hint: Option<usize>, files: usize, available: usize) -> usize {
    let available = available.max(1);
    hint.unwrap_or(available)
        .clamp(1, available)
        .min(files.max(1))
}

/// Splits `0..len` into `workers` contiguous ranges, in order.
///
/// Range sizes differ by at most one; the first `len % workers` ranges carry
/// the extra element. A `workers` of 0 is treated as 1.
///
/// ```
/// use tgroom::pipeline::partition;
///
/// assert_eq!(partition(7, 3), vec![0..3, 3..5, 5..7]);
/// assert_eq!(partition(2, 3), vec![0..1, 1..2, 2..2]);
/// ```
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let base = len / workers;
    let extra = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}
