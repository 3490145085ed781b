use std::ops::Range;

/// Splits `[0, workload_size)` into contiguous, non-overlapping ranges, one per worker.
///
/// With `q = workload_size / workers` and `r = workload_size % workers`, the first `r` ranges
/// hold `q + 1` indices and the rest hold `q`. No more ranges than indices are produced, so no
/// range is empty.
pub fn partition(workload_size: usize, workers: usize) -> Vec<Range<usize>> {
    if workload_size == 0 || workers == 0 {
        return vec![];
    }

    let workers = workers.min(workload_size);
    let base = workload_size / workers;
    let extra = workload_size % workers;

    let mut start = 0;
    (0..workers)
        .map(|worker| {
            let len = base + usize::from(worker < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}
