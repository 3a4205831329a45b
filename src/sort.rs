// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Least significant digit radix sort, serial and split across worker
//! threads.

use logger::*;
use thiserror::Error;

use std::io::Write;
use std::thread;
use std::time::Duration;

pub const MAX_BASE: u64 = 1 << 16;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("invalid base {0} (expected 2 to {})", MAX_BASE)]
    InvalidBase(u64),
    #[error("at least one worker is required")]
    InvalidWorkers,
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("worker thread panicked")]
    WorkerPanicked,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    Serial,
    Parallel,
}

impl Strategy {
    /// Small inputs are not worth splitting across threads.
    pub fn choose(len: usize, serial_threshold: usize) -> Strategy {
        if len <= serial_threshold {
            Strategy::Serial
        } else {
            Strategy::Parallel
        }
    }

    pub fn banner(self) -> &'static str {
        match self {
            Strategy::Serial => "Executing serial version",
            Strategy::Parallel => "Executing in parallel",
        }
    }
}

fn check_base(base: u64) -> Result<(), SortError> {
    if base < 2 || base > MAX_BASE {
        Err(SortError::InvalidBase(base))
    } else {
        Ok(())
    }
}

#[inline]
fn digit(value: u64, place: u64, base: u64) -> usize {
    ((value / place) % base) as usize
}

/// Place values `1, base, base^2, ...` up to the most significant digit of
/// `max`.
fn places(max: u64, base: u64) -> impl Iterator<Item = u64> {
    let mut place = Some(1u64);
    std::iter::from_fn(move || {
        let current = place.filter(|&p| max / p > 0)?;
        place = current.checked_mul(base);
        Some(current)
    })
}

/// Sorts `data` in place with one stable counting pass per digit.
pub fn radix_sort(data: &mut [u64], base: u64) -> Result<(), SortError> {
    check_base(base)?;
    let max = match data.iter().max() {
        Some(&max) => max,
        None => return Ok(()),
    };

    let mut scratch = vec![0; data.len()];
    let mut count = vec![0usize; base as usize];

    for place in places(max, base) {
        count.iter_mut().for_each(|c| *c = 0);
        for &value in data.iter() {
            count[digit(value, place, base)] += 1;
        }
        for i in 1..count.len() {
            count[i] += count[i - 1];
        }
        for &value in data.iter().rev() {
            let d = digit(value, place, base);
            count[d] -= 1;
            scratch[count[d]] = value;
        }
        data.copy_from_slice(&scratch);
    }

    Ok(())
}

/// Splits `len` items into `workers` contiguous chunks. Chunks differ in size
/// by at most one; the larger ones come first.
pub fn partition(len: usize, workers: usize) -> Vec<usize> {
    if workers == 0 {
        return Vec::new();
    }
    let per_worker = len / workers;
    let remainder = len % workers;
    (0..workers)
        .map(|id| if id < remainder { per_worker + 1 } else { per_worker })
        .collect()
}

fn bucket_by_digit(chunk: &[u64], place: u64, base: u64) -> Vec<Vec<u64>> {
    let mut buckets = vec![Vec::new(); base as usize];
    for &value in chunk {
        buckets[digit(value, place, base)].push(value);
    }
    buckets
}

/// Radix sort where each pass buckets contiguous chunks of the data on
/// separate threads. Buckets are merged digit-major then chunk-minor, which
/// keeps every pass stable.
pub fn parallel_radix_sort(data: &mut Vec<u64>, base: u64, workers: usize) -> Result<(), SortError> {
    check_base(base)?;
    if workers == 0 {
        return Err(SortError::InvalidWorkers);
    }
    let max = match data.iter().max() {
        Some(&max) => max,
        None => return Ok(()),
    };

    let sizes = partition(data.len(), workers);
    debug!("chunk sizes: {:?}", sizes);

    for place in places(max, base) {
        let chunks: &[u64] = &data[..];
        let buckets = thread::scope(|scope| -> Result<Vec<Vec<Vec<u64>>>, SortError> {
            let mut handles = Vec::with_capacity(sizes.len());
            let mut rest = chunks;
            for (id, &size) in sizes.iter().enumerate() {
                let (chunk, tail) = rest.split_at(size);
                rest = tail;
                let handle = thread::Builder::new()
                    .name(format!("sort{}", id))
                    .spawn_scoped(scope, move || bucket_by_digit(chunk, place, base))?;
                handles.push(handle);
            }
            handles
                .into_iter()
                .map(|handle| handle.join().map_err(|_| SortError::WorkerPanicked))
                .collect()
        })?;

        let mut merged = Vec::with_capacity(data.len());
        for d in 0..base as usize {
            for chunk in &buckets {
                merged.extend_from_slice(&chunk[d]);
            }
        }
        *data = merged;
        trace!("pass complete for place {}", place);
    }

    Ok(())
}

/// Sorts with the strategy picked for the input size and returns it.
pub fn execute(
    data: &mut Vec<u64>,
    base: u64,
    workers: usize,
    serial_threshold: usize,
) -> Result<Strategy, SortError> {
    check_base(base)?;
    if workers == 0 {
        return Err(SortError::InvalidWorkers);
    }
    let strategy = Strategy::choose(data.len(), serial_threshold);
    debug!("sorting {} values: {:?}", data.len(), strategy);
    match strategy {
        Strategy::Serial => radix_sort(data, base)?,
        Strategy::Parallel => parallel_radix_sort(data, base, workers)?,
    }
    Ok(strategy)
}

/// Writes the strategy banner, the elapsed time and, when given, the sorted
/// values on one line each.
pub fn report<W: Write>(
    writer: &mut W,
    strategy: Strategy,
    elapsed: Duration,
    sorted: Option<&[u64]>,
) -> std::io::Result<()> {
    writeln!(writer, "{}", strategy.banner())?;
    writeln!(writer, "Execution time: {:.6}", elapsed.as_secs_f64())?;
    if let Some(values) = sorted {
        let line = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
